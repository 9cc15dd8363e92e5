use crate::error::FeatureError;
use serde::{Deserialize, Serialize};

/// Scale-space interest point in subpixel image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Detection scale (Gaussian sigma of the level the point was found on).
    pub scale: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        Self { x, y, scale }
    }

    /// Rejects non-finite positions and non-positive scales.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(FeatureError::InvalidPosition {
                x: self.x,
                y: self.y,
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(FeatureError::InvalidScale { scale: self.scale });
        }
        Ok(())
    }

    /// Nearest integer pixel, rounding half away from zero.
    #[inline]
    pub fn rounded(&self) -> (isize, isize) {
        (self.x.round() as isize, self.y.round() as isize)
    }
}

/// Fixed-length descriptor tagged with the orientation it was sampled under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedFeatureVector {
    /// Patch orientation in radians, [0, 2π).
    pub orientation: f32,
    pub values: Vec<f32>,
}

impl OrientedFeatureVector {
    pub fn new(orientation: f32, values: Vec<f32>) -> Self {
        Self {
            orientation,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Byte quantization `min(255, floor(v * scale))`, negatives clamp to zero.
    ///
    /// SIFT-style unit-norm descriptors are usually stored with `scale = 512`.
    pub fn quantize(&self, scale: f32) -> Vec<u8> {
        self.values
            .iter()
            .map(|&v| (v * scale).floor().clamp(0.0, 255.0) as u8)
            .collect()
    }
}
