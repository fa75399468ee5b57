//! Downstream summary metrics over a solved cover.
//!
//! These consume only the public `Cover`/`Patch` surface; they are the
//! analysis-side collaborators of the core, not part of patch construction.

use crate::cover::Cover;
use crate::line::LineGenerator;
use crate::types::CoverError;
use serde::Serialize;

/// Fraction of `n_lines` grid-sampled test lines from `apex` contained in at
/// least one patch.
pub fn acceptance(cover: &Cover, apex: f64, n_lines: usize) -> Result<f64, CoverError> {
    if cover.n_patches() == 0 {
        return Err(CoverError::NotSolved);
    }
    let generator = LineGenerator::new(cover.env, apex)?;
    let lines = generator.grid_lines(n_lines);
    let accepted = lines
        .iter()
        .filter(|line| cover.patches().iter().any(|p| p.contains(line)))
        .count();
    Ok(accepted as f64 / n_lines as f64)
}

/// Point repetition factor: for every recorded point (layer by layer, in
/// array order), the number of patches whose span on that layer contains it.
pub fn point_repetition(cover: &Cover) -> Result<Vec<u32>, CoverError> {
    if cover.n_patches() == 0 {
        return Err(CoverError::NotSolved);
    }
    let mut out = Vec::new();
    for (layer, row) in cover.data.array.iter().enumerate() {
        for &p in row {
            let n = cover
                .patches()
                .iter()
                .filter(|patch| patch.contains_point(p, layer))
                .count();
            out.push(n as u32);
        }
    }
    Ok(out)
}

/// Serializable summary of one solved cover.
#[derive(Clone, Debug, Serialize)]
pub struct CoverReport {
    pub n_patches: usize,
    pub acceptance: f64,
    pub prf_mean: f64,
    pub prf_max: u32,
}

/// Builds the JSON-ready report the demo binary emits.
pub fn report(cover: &Cover, apex: f64, n_lines: usize) -> Result<CoverReport, CoverError> {
    let acceptance = acceptance(cover, apex, n_lines)?;
    let prf = point_repetition(cover)?;
    let prf_mean = if prf.is_empty() {
        0.0
    } else {
        prf.iter().map(|&n| n as f64).sum::<f64>() / prf.len() as f64
    };
    Ok(CoverReport {
        n_patches: cover.n_patches(),
        acceptance,
        prf_mean,
        prf_max: prf.iter().copied().max().unwrap_or(0),
    })
}
