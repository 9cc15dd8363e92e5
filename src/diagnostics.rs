//! Serializable summaries for tooling built on the extractor.
use crate::types::{Keypoint, OrientedFeatureVector};
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of a tool run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Descriptors computed for one input keypoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypointFeatures {
    pub keypoint: Keypoint,
    pub features: Vec<OrientedFeatureVector>,
}

/// Result of a whole extraction run over one image.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub width: usize,
    pub height: usize,
    pub keypoint_count: usize,
    pub feature_count: usize,
    /// Keypoints that produced no descriptor (no orientation support).
    pub unsupported_count: usize,
    pub timing: TimingBreakdown,
    pub keypoints: Vec<KeypointFeatures>,
}

impl ExtractionSummary {
    pub fn new(
        width: usize,
        height: usize,
        keypoints: &[Keypoint],
        features: Vec<Vec<OrientedFeatureVector>>,
        timing: TimingBreakdown,
    ) -> Self {
        let feature_count = features.iter().map(Vec::len).sum();
        let unsupported_count = features.iter().filter(|f| f.is_empty()).count();
        let keypoints: Vec<_> = keypoints
            .iter()
            .zip(features)
            .map(|(kp, features)| KeypointFeatures {
                keypoint: *kp,
                features,
            })
            .collect();
        Self {
            width,
            height,
            keypoint_count: keypoints.len(),
            feature_count,
            unsupported_count,
            timing,
            keypoints,
        }
    }
}
