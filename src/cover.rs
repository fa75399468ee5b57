//! Cover construction: orchestrates clustering, line generation and the
//! covering algorithms, and owns the deduplicated patch sequence.

use crate::cluster::{self, ClusterKind};
use crate::environment::{DataSet, Environment};
use crate::line::{Line, LineGenerator};
use crate::superpoint::{Patch, SuperPoint, WINDOW_SIZE};
use crate::types::CoverError;
use log::debug;
use rand::Rng;
use std::str::FromStr;

/// Covering (lining) strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiningKind {
    /// Evenly spaced candidate lines with a monotonic superpoint scan.
    Grid,
    /// Uniform random candidate lines.
    Randomized,
    /// Dyadic center-spread candidate lines.
    CenterSpread,
    /// Odd-count center-first candidate lines.
    CenterGrid,
    /// Greedy sweep over raw points; needs no candidate lines or clustering.
    SlopeStack,
}

impl FromStr for LiningKind {
    type Err = CoverError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Grid" | "LeftRight" => Ok(Self::Grid),
            "Random" | "Randomized" => Ok(Self::Randomized),
            "CenterSpread" => Ok(Self::CenterSpread),
            "CenterGrid" => Ok(Self::CenterGrid),
            "SlopeStack" => Ok(Self::SlopeStack),
            other => Err(CoverError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Owns the patch cover for one environment/event pair.
///
/// Lifecycle: construct, `cluster`, then one `solve_*` call. Patches are
/// append-only through the deduplicating insertion rule; the candidate lines
/// of the last run are retained for diagnostics.
pub struct Cover {
    pub env: Environment,
    pub data: DataSet,
    patches: Vec<Patch>,
    superpoints: Vec<Vec<SuperPoint>>,
    fitting_lines: Vec<Line>,
}

impl Cover {
    pub fn new(env: Environment, data: DataSet) -> Self {
        Self {
            env,
            data,
            patches: Vec::new(),
            superpoints: Vec::new(),
            fitting_lines: Vec::new(),
        }
    }

    pub fn n_patches(&self) -> usize {
        self.patches.len()
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn superpoints(&self) -> &[Vec<SuperPoint>] {
        &self.superpoints
    }

    /// Candidate lines used by the last sampling solver.
    pub fn fitting_lines(&self) -> &[Line] {
        &self.fitting_lines
    }

    /// Partitions every layer into overlapping windows.
    pub fn cluster(&mut self, kind: ClusterKind) -> Result<(), CoverError> {
        self.superpoints = cluster::cluster(kind, &self.data)?;
        Ok(())
    }

    /// Deduplicating insertion: the first patch is always accepted; later
    /// patches are compared against the most recently accepted patch only
    /// and silently dropped when structurally equal.
    ///
    /// The last-only check is sufficient for the grid scan, whose candidates
    /// arrive in geometrically monotonic order; the other solvers run a
    /// full-history scan before calling this.
    pub fn add_patch(&mut self, patch: Patch) {
        if let Some(last) = self.patches.last() {
            if *last == patch {
                return;
            }
        }
        self.patches.push(patch);
    }

    /// Matches one line against each layer's windows, scanning from
    /// `indices[i]`; on success advances `indices` and returns the patch
    /// ingredients. Lines falling in clustering gaps return `None`.
    fn match_line(&self, line: &Line, indices: &mut [usize]) -> Option<Vec<SuperPoint>> {
        let mut ingredients = Vec::with_capacity(self.env.layers);
        for i in 0..self.env.layers {
            let layer = &self.superpoints[i];
            let found = (indices[i]..layer.len())
                .find(|&j| layer[j].contains(line.position(i)));
            match found {
                Some(j) => {
                    indices[i] = j;
                    ingredients.push(layer[j].clone());
                }
                None => return None,
            }
        }
        Some(ingredients)
    }

    fn require_clustered(&self) -> Result<(), CoverError> {
        if self.superpoints.is_empty() {
            return Err(CoverError::NotClustered);
        }
        Ok(())
    }

    /// Grid-scan cover: evenly spaced lines swept left to right, with a
    /// monotonically advancing search index per layer. Matched patches go
    /// straight through `add_patch`; the sweep order guarantees a duplicate
    /// can only ever be adjacent.
    ///
    /// Assumes position-sorted windows, i.e. left-right clustering; pair
    /// center clustering with one of the rescanning solvers instead.
    pub fn solve_grid(&mut self, apex: f64, n_lines: usize) -> Result<(), CoverError> {
        self.require_clustered()?;
        let generator = LineGenerator::new(self.env, apex)?;
        self.fitting_lines = generator.grid_lines(n_lines);

        let mut indices = vec![0usize; self.env.layers];
        for k in 0..self.fitting_lines.len() {
            let line = self.fitting_lines[k].clone();
            if let Some(ingredients) = self.match_line(&line, &mut indices) {
                self.add_patch(Patch::new(&self.env, ingredients)?);
            } else {
                debug!("grid scan: line {} (slope {:.4}) fell in a gap", k, line.slope);
            }
        }
        debug!("grid scan: {} patches from {} lines", self.n_patches(), n_lines);
        Ok(())
    }

    /// Randomized cover with the thread rng.
    pub fn solve_randomized(&mut self, apex: f64, n_lines: usize) -> Result<(), CoverError> {
        self.solve_randomized_with(&mut rand::thread_rng(), apex, n_lines)
    }

    /// Randomized cover with a caller-supplied rng (seedable in tests).
    pub fn solve_randomized_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        apex: f64,
        n_lines: usize,
    ) -> Result<(), CoverError> {
        self.require_clustered()?;
        let generator = LineGenerator::new(self.env, apex)?;
        let lines = generator.random_lines(n_lines, rng);
        self.solve_unordered(lines)
    }

    /// Center-spread cover (dyadic refinement order).
    pub fn solve_center_spread(&mut self, apex: f64, n_lines: usize) -> Result<(), CoverError> {
        self.require_clustered()?;
        let generator = LineGenerator::new(self.env, apex)?;
        let lines = generator.center_spread_lines(n_lines);
        self.solve_unordered(lines)
    }

    /// Center-grid cover (odd count, center first).
    pub fn solve_center_grid(&mut self, apex: f64, n_lines: usize) -> Result<(), CoverError> {
        self.require_clustered()?;
        let generator = LineGenerator::new(self.env, apex)?;
        let lines = generator.center_grid_lines(n_lines);
        self.solve_unordered(lines)
    }

    /// Shared path for candidate sets with no positional ordering: every
    /// layer is rescanned from the start per line, and the new candidate is
    /// checked against the full accepted history before insertion.
    fn solve_unordered(&mut self, lines: Vec<Line>) -> Result<(), CoverError> {
        self.fitting_lines = lines;
        for k in 0..self.fitting_lines.len() {
            let line = self.fitting_lines[k].clone();
            let mut indices = vec![0usize; self.env.layers];
            let Some(ingredients) = self.match_line(&line, &mut indices) else {
                debug!("unordered scan: line {} (slope {:.4}) fell in a gap", k, line.slope);
                continue;
            };
            let candidate = Patch::new(&self.env, ingredients)?;
            if !self.patches.iter().any(|p| *p == candidate) {
                self.add_patch(candidate);
            }
        }
        debug!(
            "unordered scan: {} patches from {} lines",
            self.n_patches(),
            self.fitting_lines.len()
        );
        Ok(())
    }

    /// Slope-stack cover: a greedy sweep that walks outward from the
    /// innermost window without any pre-sampled candidate lines.
    ///
    /// Each step chases the shallowest window end point (position over
    /// radius) of the last patch, recenters a window on the
    /// nearest-steepness raw point of every layer, and halts at the fixed
    /// point where the rebuilt patch equals the previous one.
    pub fn solve_slope_stack(&mut self) -> Result<(), CoverError> {
        let layers = self.env.layers;
        for row in &self.data.array {
            if row.len() < WINDOW_SIZE {
                return Err(CoverError::MalformedWindow { got: row.len() });
            }
        }

        let seed = (0..layers)
            .map(|i| SuperPoint::new(&self.data.array[i][..WINDOW_SIZE]))
            .collect::<Result<Vec<_>, _>>()?;
        let mut last = Patch::new(&self.env, seed)?;
        self.add_patch(last.clone());

        loop {
            // Shallowest window end point across layers defines the next
            // trajectory to chase.
            let mut target = f64::INFINITY;
            for i in 0..layers {
                let steepness = last.superpoint(i).last_point() / self.env.radius(i);
                if steepness < target {
                    target = steepness;
                }
            }

            let mut ingredients = Vec::with_capacity(layers);
            for i in 0..layers {
                let row = &self.data.array[i];
                let radius = self.env.radius(i);
                let mut closest = 0usize;
                let mut best = f64::INFINITY;
                for (j, &p) in row.iter().enumerate() {
                    let d = (p / radius - target).abs();
                    if d < best {
                        best = d;
                        closest = j;
                    }
                }
                let n = row.len();
                // Window centered one before the chased point, anchored at
                // the first/last 16 points near the array boundary.
                let window = if closest < 1 {
                    &row[..WINDOW_SIZE]
                } else if closest >= n - WINDOW_SIZE {
                    &row[n - WINDOW_SIZE..]
                } else {
                    &row[closest - 1..closest - 1 + WINDOW_SIZE]
                };
                ingredients.push(SuperPoint::new(window)?);
            }

            let next = Patch::new(&self.env, ingredients)?;
            if next == last {
                debug!("slope stack: fixed point after {} patches", self.n_patches());
                return Ok(());
            }
            self.add_patch(next.clone());
            last = next;
        }
    }

    /// Strategy dispatch. Slope-stack ignores the clustering selector and
    /// line count; all other linings require candidate lines and a clustered
    /// superpoint partition.
    pub fn solve(
        &mut self,
        clustering: ClusterKind,
        lining: LiningKind,
        apex: f64,
        n_lines: usize,
    ) -> Result<(), CoverError> {
        if lining == LiningKind::SlopeStack {
            return self.solve_slope_stack();
        }
        self.cluster(clustering)?;
        match lining {
            LiningKind::Grid => self.solve_grid(apex, n_lines),
            LiningKind::Randomized => self.solve_randomized(apex, n_lines),
            LiningKind::CenterSpread => self.solve_center_spread(apex, n_lines),
            LiningKind::CenterGrid => self.solve_center_grid(apex, n_lines),
            LiningKind::SlopeStack => unreachable!("handled above"),
        }
    }
}
