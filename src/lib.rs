#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod cover;
pub mod environment;
pub mod metrics;
pub mod types;

// Lower-level building blocks — public, but considered unstable internals.
pub mod cluster;
pub mod config;
pub mod line;
pub mod superpoint;

// --- High-level re-exports -------------------------------------------------

// Main entry points: cover construction + strategy selectors.
pub use crate::cluster::ClusterKind;
pub use crate::cover::{Cover, LiningKind};
pub use crate::environment::{DataSet, Environment};
pub use crate::types::CoverError;

// Covering units, generally useful downstream.
pub use crate::line::{Line, LineGenerator};
pub use crate::superpoint::{Patch, SuperPoint, WINDOW_SIZE};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use wedge_cover::prelude::*;
///
/// # fn main() -> Result<(), CoverError> {
/// let env = Environment::default();
/// let mut data = DataSet::new(env);
/// data.generate_uniform(150);
///
/// let mut cover = Cover::new(env, data);
/// cover.solve(ClusterKind::LeftRight, LiningKind::Grid, 0.0, 100)?;
/// println!("patches: {}", cover.n_patches());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::cluster::ClusterKind;
    pub use crate::cover::{Cover, LiningKind};
    pub use crate::environment::{DataSet, Environment};
    pub use crate::types::CoverError;
}
