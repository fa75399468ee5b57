//! Partitioning of each layer's sorted points into overlapping windows.

use crate::environment::DataSet;
use crate::superpoint::{SuperPoint, WINDOW_SIZE};
use crate::types::CoverError;
use std::str::FromStr;

/// Window advance; consecutive windows share two points.
const STEP: usize = WINDOW_SIZE - 2;

/// Clustering strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterKind {
    /// Consecutive windows swept from the array start ("LR").
    LeftRight,
    /// Windows grown outward from the detector center crossing ("C").
    Center,
}

impl FromStr for ClusterKind {
    type Err = CoverError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "LR" | "LeftRight" => Ok(Self::LeftRight),
            "C" | "Center" => Ok(Self::Center),
            other => Err(CoverError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Builds each layer's overlapping 16-point windows.
pub fn cluster(kind: ClusterKind, data: &DataSet) -> Result<Vec<Vec<SuperPoint>>, CoverError> {
    data.array
        .iter()
        .map(|layer| match kind {
            ClusterKind::LeftRight => symmetric_windows(layer),
            ClusterKind::Center => center_windows(layer),
        })
        .collect()
}

/// Emits consecutive windows advancing by `STEP` from index 0; leftover
/// points after the last full window get one final window anchored at the
/// array end, so every point lands in at least one span.
fn symmetric_windows(layer: &[f64]) -> Result<Vec<SuperPoint>, CoverError> {
    let end = layer.len();
    if end < WINDOW_SIZE {
        return Err(CoverError::MalformedWindow { got: end });
    }
    let mut out = Vec::new();
    let mut i = 0;
    while i + WINDOW_SIZE < end {
        out.push(SuperPoint::new(&layer[i..i + WINDOW_SIZE])?);
        i += STEP;
    }
    if i < end {
        out.push(SuperPoint::new(&layer[end - WINDOW_SIZE..])?);
    }
    Ok(out)
}

/// Anchors at the first non-negative coordinate backed up by half a window,
/// then sweeps windows independently toward the positive end (end-anchored
/// tail) and the negative end (start-anchored head). Coverage is symmetric
/// around the physical center rather than the array start.
fn center_windows(layer: &[f64]) -> Result<Vec<SuperPoint>, CoverError> {
    let end = layer.len();
    if end < WINDOW_SIZE {
        return Err(CoverError::MalformedWindow { got: end });
    }

    let mut first_min = 0usize;
    for &p in layer {
        if p < 0.0 {
            first_min += 1;
        } else if p > 0.0 {
            break;
        }
    }
    let anchor = first_min.saturating_sub(WINDOW_SIZE / 2);

    let mut out = Vec::new();
    let mut j = anchor;
    while j + WINDOW_SIZE < end {
        out.push(SuperPoint::new(&layer[j..j + WINDOW_SIZE])?);
        j += STEP;
    }
    if j < end {
        out.push(SuperPoint::new(&layer[end - WINDOW_SIZE..])?);
    }

    j = anchor;
    while j >= WINDOW_SIZE {
        let lo = j - STEP;
        let window = layer
            .get(lo..j + 2)
            .ok_or(CoverError::MalformedWindow { got: end - lo })?;
        out.push(SuperPoint::new(window)?);
        j -= STEP;
    }
    if j > 0 {
        out.push(SuperPoint::new(&layer[..WINDOW_SIZE])?);
    }

    Ok(out)
}
