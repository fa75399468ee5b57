//! Candidate trajectories and angular sampling strategies.

use crate::environment::Environment;
use crate::types::CoverError;
use rand::Rng;

/// A candidate trajectory through the wedge, defined by apex and slope.
///
/// The projected position on layer `i` is `apex + radius(i) / slope`, the
/// detector's inverse-radius mapping of a trajectory onto its layers.
#[derive(Clone, Debug)]
pub struct Line {
    pub apex: f64,
    pub slope: f64,
    positions: Vec<f64>,
}

impl Line {
    pub fn new(env: &Environment, apex: f64, slope: f64) -> Self {
        let positions = (0..env.layers)
            .map(|i| apex + env.radius(i) / slope)
            .collect();
        Self {
            apex,
            slope,
            positions,
        }
    }

    /// Projected position on layer `i`.
    #[inline]
    pub fn position(&self, i: usize) -> f64 {
        self.positions[i]
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }
}

/// Samples candidate lines from a fixed apex across the full angular range
/// that stays inside the wedge.
///
/// The two bounding slopes run from the apex to the top-left and top-right
/// corners of the wedge at the outermost layer. Both bounding lines pass
/// through the vertical axis, so the valid angular range wraps across the π
/// discontinuity; `angle_bounds` returns the unwrapped `[lo, hi]` domain.
#[derive(Clone, Debug)]
pub struct LineGenerator {
    env: Environment,
    apex: f64,
    /// Slope to the top-left wedge corner (negative).
    slope_ll: f64,
    /// Slope to the top-right wedge corner (positive).
    slope_ul: f64,
}

impl LineGenerator {
    pub fn new(env: Environment, apex: f64) -> Result<Self, CoverError> {
        if !(-env.bottom_layer_lim < apex && apex < env.bottom_layer_lim) {
            return Err(CoverError::InvalidApex {
                apex,
                limit: env.bottom_layer_lim,
            });
        }
        let max_height = env.max_radius();
        Ok(Self {
            env,
            apex,
            slope_ll: max_height / (-env.top_layer_lim - apex),
            slope_ul: max_height / (env.top_layer_lim - apex),
        })
    }

    /// Unwrapped angular sampling domain `[lo, hi]`.
    fn angle_bounds(&self) -> (f64, f64) {
        let lo = self.slope_ul.atan();
        let hi = self.slope_ll.atan() + std::f64::consts::PI;
        (lo, hi)
    }

    fn line_at_angle(&self, theta: f64) -> Line {
        Line::new(&self.env, self.apex, theta.tan())
    }

    /// `n` angles evenly spaced across the domain, swept so the projected
    /// positions run from the left wedge edge to the right. Linear in angle,
    /// not slope, which keeps the geometric coverage uniform near vertical.
    pub fn grid_lines(&self, n: usize) -> Vec<Line> {
        let (lo, hi) = self.angle_bounds();
        linspace(hi, lo, n)
            .into_iter()
            .map(|theta| self.line_at_angle(theta))
            .collect()
    }

    /// `n` angles drawn uniformly at random from the domain.
    pub fn random_lines<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Line> {
        let (lo, hi) = self.angle_bounds();
        (0..n)
            .map(|_| self.line_at_angle(rng.gen_range(lo..hi)))
            .collect()
    }

    /// Binary-fraction placement: for each dyadic level `2^k` emit all odd
    /// numerators before moving to the next level, successively refining
    /// coverage from the domain center outwards. Emits complete levels, so
    /// the count is at least `n`.
    pub fn center_spread_lines(&self, n: usize) -> Vec<Line> {
        let (lo, hi) = self.angle_bounds();
        let range = hi - lo;
        let levels = (n as f64).log2().floor() as u32 + 1;
        let mut lines = Vec::new();
        for exp in 1..=levels {
            let denom = 1u64 << exp;
            for num in (1..denom).step_by(2) {
                let theta = lo + range * num as f64 / denom as f64;
                lines.push(self.line_at_angle(theta));
            }
        }
        lines
    }

    /// An odd number of evenly spaced samples (`n` bumped by one if even),
    /// reordered closest-to-center first before mapping into the domain.
    pub fn center_grid_lines(&self, n: usize) -> Vec<Line> {
        let n = if n % 2 == 0 { n + 1 } else { n };
        let (lo, hi) = self.angle_bounds();
        let range = hi - lo;
        let mut offsets = linspace(-0.5, 0.5, n);
        // Stable sort keeps the negative twin of each |offset| pair first.
        offsets.sort_by(|a, b| {
            a.abs()
                .partial_cmp(&b.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        offsets
            .into_iter()
            .map(|x| self.line_at_angle(lo + range * (x + 0.5)))
            .collect()
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive; `[start]` when
/// `n == 1`.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|k| start + step * k as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_env() -> Environment {
        Environment {
            layers: 5,
            radii: 1.0,
            top_layer_lim: 5.0,
            bottom_layer_lim: 1.0,
        }
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn apex_outside_bottom_range_is_rejected() {
        let env = test_env();
        assert!(LineGenerator::new(env, 0.0).is_ok());
        assert!(LineGenerator::new(env, 0.99).is_ok());
        assert_eq!(
            LineGenerator::new(env, 1.0).map(|_| ()).unwrap_err(),
            CoverError::InvalidApex {
                apex: 1.0,
                limit: 1.0
            }
        );
        assert!(LineGenerator::new(env, -3.0).is_err());
    }

    #[test]
    fn single_grid_line_projects_radius_over_slope() {
        let env = test_env();
        let gen = LineGenerator::new(env, 0.0).unwrap();
        let lines = gen.grid_lines(1);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(approx_eq(line.position(0), env.radius(0) / line.slope));
        assert!(line.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn grid_lines_sweep_left_to_right() {
        let env = test_env();
        let gen = LineGenerator::new(env, 0.0).unwrap();
        let lines = gen.grid_lines(50);
        assert_eq!(lines.len(), 50);
        let outer = env.layers - 1;
        // Endpoints land on the wedge corners at the outermost layer.
        assert!(approx_eq(lines[0].position(outer), -env.top_layer_lim));
        assert!(approx_eq(lines[49].position(outer), env.top_layer_lim));
        for w in lines.windows(2) {
            assert!(w[0].position(outer) < w[1].position(outer));
        }
    }

    #[test]
    fn grid_projection_monotonic_on_every_layer() {
        let env = test_env();
        let gen = LineGenerator::new(env, 0.3).unwrap();
        let lines = gen.grid_lines(25);
        for i in 0..env.layers {
            for w in lines.windows(2) {
                assert!(w[0].position(i) < w[1].position(i));
            }
        }
    }

    #[test]
    fn random_lines_stay_inside_the_wedge() {
        let env = test_env();
        let gen = LineGenerator::new(env, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let lines = gen.random_lines(200, &mut rng);
        assert_eq!(lines.len(), 200);
        let outer = env.layers - 1;
        for line in &lines {
            let p = line.position(outer);
            assert!(p > -env.top_layer_lim - 1e-9 && p < env.top_layer_lim + 1e-9);
        }
    }

    #[test]
    fn center_spread_emits_complete_dyadic_levels() {
        let env = test_env();
        let gen = LineGenerator::new(env, 0.0).unwrap();
        // levels 1..=7 hold 1 + 2 + ... + 64 = 127 samples.
        let lines = gen.center_spread_lines(100);
        assert_eq!(lines.len(), 127);
        // First sample is the domain midpoint.
        let (lo, hi) = gen.angle_bounds();
        assert!(approx_eq(lines[0].slope, (lo + 0.5 * (hi - lo)).tan()));
    }

    #[test]
    fn center_grid_forces_odd_count_center_first() {
        let env = test_env();
        let gen = LineGenerator::new(env, 0.0).unwrap();
        let lines = gen.center_grid_lines(10);
        assert_eq!(lines.len(), 11);
        let (lo, hi) = gen.angle_bounds();
        let mid_slope = (lo + 0.5 * (hi - lo)).tan();
        assert!(approx_eq(lines[0].slope, mid_slope));
        // Deviation from center never decreases along the sequence.
        let outer = env.layers - 1;
        let center = lines[0].position(outer);
        let mut last_dev = 0.0f64;
        for line in &lines {
            let dev = (line.position(outer) - center).abs();
            assert!(dev + 1e-9 >= last_dev);
            last_dev = dev;
        }
    }
}
