//! Shared result and error types.

/// Errors surfaced by cover construction.
///
/// All of these are fail-fast invariant violations; none are retried
/// internally. A candidate line that matches no window on some layer is a
/// normal discard outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverError {
    /// Line generator apex outside the allowed bottom-layer range.
    InvalidApex { apex: f64, limit: f64 },
    /// A point window was built from something other than 16 points.
    MalformedWindow { got: usize },
    /// A patch was built with a superpoint count that does not match the
    /// environment's layer count.
    LayerCountMismatch { expected: usize, got: usize },
    /// Unrecognized clustering or lining strategy tag.
    UnknownStrategy(String),
    /// A covering algorithm was invoked before clustering.
    NotClustered,
    /// A downstream query was invoked before any solver produced patches.
    NotSolved,
}

impl std::fmt::Display for CoverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidApex { apex, limit } => {
                write!(f, "apex {} outside allowed range (-{}, {})", apex, limit, limit)
            }
            Self::MalformedWindow { got } => {
                write!(f, "window must hold exactly 16 points, got {}", got)
            }
            Self::LayerCountMismatch { expected, got } => {
                write!(
                    f,
                    "patch has {} superpoints, environment has {} layers",
                    got, expected
                )
            }
            Self::UnknownStrategy(tag) => write!(f, "unknown strategy tag: {}", tag),
            Self::NotClustered => write!(f, "superpoints not clustered yet; run cluster first"),
            Self::NotSolved => write!(f, "no patches yet; run a solver first"),
        }
    }
}

impl std::error::Error for CoverError {}
