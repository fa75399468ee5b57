//! JSON run configuration for the demo driver.

use crate::cluster::ClusterKind;
use crate::cover::LiningKind;
use crate::environment::Environment;
use crate::types::CoverError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub environment: EnvironmentConfig,
    pub data: DataConfig,
    pub solve: SolveConfig,
    pub output: OutputConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            data: DataConfig::default(),
            solve: SolveConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub layers: usize,
    pub radii: f64,
    pub top_layer_lim: f64,
    pub bottom_layer_lim: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            layers: env.layers,
            radii: env.radii,
            top_layer_lim: env.top_layer_lim,
            bottom_layer_lim: env.bottom_layer_lim,
        }
    }
}

impl EnvironmentConfig {
    pub fn resolve(&self) -> Environment {
        Environment {
            layers: self.layers,
            radii: self.radii,
            top_layer_lim: self.top_layer_lim,
            bottom_layer_lim: self.bottom_layer_lim,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Synthetic points per layer.
    pub points_per_layer: usize,
    /// Extra boundary points just outside each layer edge, when set.
    pub boundary_offset: Option<f64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            points_per_layer: 150,
            boundary_offset: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Clustering tag: "LR"/"LeftRight" or "C"/"Center".
    pub clustering: String,
    /// Lining tag: "Grid", "Randomized", "CenterSpread", "CenterGrid" or
    /// "SlopeStack".
    pub lining: String,
    pub apex: f64,
    pub n_lines: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            clustering: "LeftRight".to_string(),
            lining: "SlopeStack".to_string(),
            apex: 0.0,
            n_lines: 100,
        }
    }
}

impl SolveConfig {
    /// Parses the strategy tags; unknown tags fail here, at the boundary.
    pub fn resolve(&self) -> Result<(ClusterKind, LiningKind), CoverError> {
        Ok((self.clustering.parse()?, self.lining.parse()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_a_valid_run() {
        let config = RunConfig::default();
        let env = config.environment.resolve();
        assert_eq!(env.layers, 5);
        let (clustering, lining) = config.solve.resolve().unwrap();
        assert_eq!(clustering, ClusterKind::LeftRight);
        assert_eq!(lining, LiningKind::SlopeStack);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"solve": {"lining": "CenterGrid", "n_lines": 40}}"#).unwrap();
        assert_eq!(config.solve.lining, "CenterGrid");
        assert_eq!(config.solve.n_lines, 40);
        assert_eq!(config.solve.clustering, "LeftRight");
        assert_eq!(config.data.points_per_layer, 150);
    }

    #[test]
    fn unknown_tags_fail_at_resolve() {
        let config: RunConfig =
            serde_json::from_str(r#"{"solve": {"lining": "Spiral"}}"#).unwrap();
        assert_eq!(
            config.solve.resolve(),
            Err(CoverError::UnknownStrategy("Spiral".to_string()))
        );
    }
}
