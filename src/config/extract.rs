use crate::params::{ExtractorParams, SiftParams};
use crate::types::Keypoint;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ExtractToolConfig {
    pub input: PathBuf,
    /// Keypoints in full-resolution pixel coordinates.
    pub keypoints: Vec<Keypoint>,
    #[serde(default)]
    pub extractor: ExtractorParams,
    #[serde(default)]
    pub sift: SiftParams,
    pub output: ExtractOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ExtractOutputConfig {
    pub features_json: PathBuf,
    /// Optional PNG dump of the gradient magnitude map.
    #[serde(default)]
    pub magnitude_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ExtractToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<ExtractToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
