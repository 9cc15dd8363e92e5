//! Parameter types configuring orientation assignment, sampling geometry and
//! the bundled SIFT-style provider.
//!
//! Defaults follow the classic SIFT setup: a 36-bin orientation histogram,
//! 4×4 spatial bins of 8 orientations, and a magnification of 12 (three
//! pixels per scale unit for each of the four spatial bins).

use crate::error::FeatureError;
use serde::{Deserialize, Serialize};

/// Dominant-orientation histogram settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationParams {
    /// Number of histogram bins over [0, 2π).
    pub num_bins: usize,
    /// Gaussian window sigma as a multiple of the keypoint scale.
    pub sigma_scale: f32,
    /// Sampling radius in units of the Gaussian sigma.
    pub radius_sigmas: f32,
    /// Passes of circular `[1, 1, 1] / 3` smoothing.
    pub smoothing_iterations: usize,
    /// Fraction of the global maximum a local peak must reach.
    pub peak_threshold: f32,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            num_bins: 36,
            sigma_scale: 1.5,
            radius_sigmas: 3.0,
            smoothing_iterations: 6,
            peak_threshold: 0.8,
        }
    }
}

impl OrientationParams {
    pub fn with_num_bins(mut self, num_bins: usize) -> Self {
        self.num_bins = num_bins;
        self
    }

    pub fn with_peak_threshold(mut self, peak_threshold: f32) -> Self {
        self.peak_threshold = peak_threshold;
        self
    }

    pub fn with_smoothing_iterations(mut self, iterations: usize) -> Self {
        self.smoothing_iterations = iterations;
        self
    }

    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.num_bins == 0 {
            return Err(FeatureError::InvalidParameter {
                name: "num_bins",
                value: 0.0,
            });
        }
        positive("sigma_scale", self.sigma_scale)?;
        positive("radius_sigmas", self.radius_sigmas)?;
        if !(0.0..=1.0).contains(&self.peak_threshold) {
            return Err(FeatureError::InvalidParameter {
                name: "peak_threshold",
                value: self.peak_threshold,
            });
        }
        Ok(())
    }
}

/// Settings of the gradient feature extractor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    /// Patch side in pixels per unit of keypoint scale.
    pub magnification: f32,
    pub orientation: OrientationParams,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            magnification: 12.0,
            orientation: OrientationParams::default(),
        }
    }
}

impl ExtractorParams {
    pub fn with_magnification(mut self, magnification: f32) -> Self {
        self.magnification = magnification;
        self
    }

    pub fn with_orientation(mut self, orientation: OrientationParams) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn validate(&self) -> Result<(), FeatureError> {
        if !self.magnification.is_finite() || self.magnification <= 0.0 {
            return Err(FeatureError::InvalidMagnification {
                magnification: self.magnification,
            });
        }
        self.orientation.validate()
    }
}

/// Spatial-histogram (SIFT-style) provider settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftParams {
    /// Spatial bins along each patch axis.
    pub num_spatial_bins: usize,
    /// Orientation bins per spatial cell.
    pub num_orientation_bins: usize,
    /// Clamp applied to normalized entries before renormalization.
    pub value_threshold: f32,
    /// Gaussian weighting sigma in patch units.
    pub gaussian_sigma: f32,
}

impl Default for SiftParams {
    fn default() -> Self {
        Self {
            num_spatial_bins: 4,
            num_orientation_bins: 8,
            value_threshold: 0.2,
            gaussian_sigma: 1.0,
        }
    }
}

impl SiftParams {
    /// Descriptor length `num_spatial_bins² × num_orientation_bins`.
    pub fn descriptor_len(&self) -> usize {
        self.num_spatial_bins * self.num_spatial_bins * self.num_orientation_bins
    }

    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.num_spatial_bins == 0 {
            return Err(FeatureError::InvalidParameter {
                name: "num_spatial_bins",
                value: 0.0,
            });
        }
        if self.num_orientation_bins == 0 {
            return Err(FeatureError::InvalidParameter {
                name: "num_orientation_bins",
                value: 0.0,
            });
        }
        positive("value_threshold", self.value_threshold)?;
        positive("gaussian_sigma", self.gaussian_sigma)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), FeatureError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FeatureError::InvalidParameter { name, value })
    }
}
