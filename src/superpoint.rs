//! Fixed-size point windows and the per-layer patches built from them.

use crate::environment::Environment;
use crate::line::Line;
use crate::types::CoverError;

/// Number of points per window per layer.
pub const WINDOW_SIZE: usize = 16;

/// An overlap window of exactly 16 points on one layer, characterized by its
/// closed span `[min, max]`.
///
/// Equality is structural on the span only: two windows with different
/// interior points but identical bounds compare equal.
#[derive(Clone, Debug)]
pub struct SuperPoint {
    points: [f64; WINDOW_SIZE],
    min: f64,
    max: f64,
}

impl SuperPoint {
    pub fn new(points: &[f64]) -> Result<Self, CoverError> {
        let points: [f64; WINDOW_SIZE] = points
            .try_into()
            .map_err(|_| CoverError::MalformedWindow { got: points.len() })?;
        let mut min = points[0];
        let mut max = points[0];
        for &p in &points[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Ok(Self { points, min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn points(&self) -> &[f64; WINDOW_SIZE] {
        &self.points
    }

    /// The window's final point in storage order; the chase point of the
    /// slope-stack sweep (equals `max` for ascending input).
    #[inline]
    pub fn last_point(&self) -> f64 {
        self.points[WINDOW_SIZE - 1]
    }

    /// Inclusive span test.
    #[inline]
    pub fn contains(&self, p: f64) -> bool {
        self.min <= p && p <= self.max
    }
}

impl PartialEq for SuperPoint {
    fn eq(&self, other: &Self) -> bool {
        (self.min, self.max) == (other.min, other.max)
    }
}

/// One SuperPoint per layer, ordered by layer index; the covering unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    superpoints: Vec<SuperPoint>,
}

impl Patch {
    pub fn new(env: &Environment, superpoints: Vec<SuperPoint>) -> Result<Self, CoverError> {
        if superpoints.len() != env.layers {
            return Err(CoverError::LayerCountMismatch {
                expected: env.layers,
                got: superpoints.len(),
            });
        }
        Ok(Self { superpoints })
    }

    pub fn superpoints(&self) -> &[SuperPoint] {
        &self.superpoints
    }

    #[inline]
    pub fn superpoint(&self, layer: usize) -> &SuperPoint {
        &self.superpoints[layer]
    }

    /// True when the line's projection falls inside this patch's span on
    /// every layer.
    pub fn contains(&self, line: &Line) -> bool {
        self.superpoints
            .iter()
            .enumerate()
            .all(|(i, sp)| sp.contains(line.position(i)))
    }

    /// Span test on a single layer.
    pub fn contains_point(&self, p: f64, layer: usize) -> bool {
        self.superpoints[layer].contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f64) -> Vec<f64> {
        (0..WINDOW_SIZE).map(|k| start + k as f64).collect()
    }

    #[test]
    fn rejects_anything_but_sixteen_points() {
        assert_eq!(
            SuperPoint::new(&[0.0; 15]),
            Err(CoverError::MalformedWindow { got: 15 })
        );
        assert_eq!(
            SuperPoint::new(&[0.0; 17]),
            Err(CoverError::MalformedWindow { got: 17 })
        );
        assert!(SuperPoint::new(&window(0.0)).is_ok());
    }

    #[test]
    fn bounds_are_true_extrema_for_unsorted_input() {
        let mut pts = window(0.0);
        pts.swap(0, 9);
        pts.swap(3, 15);
        let sp = SuperPoint::new(&pts).unwrap();
        assert_eq!(sp.min(), 0.0);
        assert_eq!(sp.max(), 15.0);
        assert!(sp.contains(0.0));
        assert!(sp.contains(15.0));
        assert!(sp.contains(7.3));
        assert!(!sp.contains(-0.0001));
        assert!(!sp.contains(15.0001));
    }

    #[test]
    fn span_equality_ignores_interior_points() {
        let a = SuperPoint::new(&window(0.0)).unwrap();
        let mut pts = window(0.0);
        pts[5] = 2.5;
        pts[8] = 11.25;
        let b = SuperPoint::new(&pts).unwrap();
        assert_eq!(a, b);
        let c = SuperPoint::new(&window(1.0)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn patch_layer_count_must_match_environment() {
        let env = Environment {
            layers: 3,
            ..Environment::default()
        };
        let sps: Vec<SuperPoint> = (0..2)
            .map(|i| SuperPoint::new(&window(i as f64)).unwrap())
            .collect();
        assert_eq!(
            Patch::new(&env, sps),
            Err(CoverError::LayerCountMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn patch_equality_is_structural_per_layer() {
        let env = Environment {
            layers: 2,
            ..Environment::default()
        };
        let mk = |shuffle: bool| {
            let mut pts = window(0.0);
            if shuffle {
                pts.swap(2, 12);
            }
            let a = SuperPoint::new(&pts).unwrap();
            let b = SuperPoint::new(&window(20.0)).unwrap();
            Patch::new(&env, vec![a, b]).unwrap()
        };
        let p = mk(false);
        let q = mk(true);
        let r = mk(true);
        // Reflexive, symmetric, transitive.
        assert_eq!(p, p);
        assert_eq!(p, q);
        assert_eq!(q, p);
        assert_eq!(q, r);
        assert_eq!(p, r);

        let other = Patch::new(
            &env,
            vec![
                SuperPoint::new(&window(0.0)).unwrap(),
                SuperPoint::new(&window(21.0)).unwrap(),
            ],
        )
        .unwrap();
        assert_ne!(p, other);
    }

    #[test]
    fn patch_point_containment_is_per_layer() {
        let env = Environment {
            layers: 2,
            ..Environment::default()
        };
        let patch = Patch::new(
            &env,
            vec![
                SuperPoint::new(&window(0.0)).unwrap(),
                SuperPoint::new(&window(100.0)).unwrap(),
            ],
        )
        .unwrap();
        for k in 0..WINDOW_SIZE {
            assert!(patch.contains_point(k as f64, 0));
            assert!(patch.contains_point(100.0 + k as f64, 1));
        }
        assert!(!patch.contains_point(100.0, 0));
        assert!(!patch.contains_point(0.0, 1));
        assert!(!patch.contains_point(15.5, 0));
    }
}
