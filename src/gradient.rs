//! Per-pixel gradient magnitude and orientation maps for one scale level.
//!
//! - Centred differences `gx = I(x+1, y) - I(x-1, y)`, `gy = I(x, y+1) - I(x, y-1)`
//!   with border clamping (replicate).
//! - `magnitude = sqrt(gx² + gy²)`, `orientation = atan2(−gy, gx)` in (−π, π].
//!
//! Orientations are measured counter-clockwise as the image is displayed
//! (y axis pointing up). This is the convention under which the extractor's
//! patch rotation `[cos θ, −sin θ; sin θ, cos θ]` undoes an in-plane rotation
//! of the image; external producers of maps must follow it too.
//!
//! The maps are a read-only input of the extractor; any producer may build
//! them as long as both share the same dimensions.
use crate::error::FeatureError;
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Gradient magnitude and orientation (radians) at a single scale level.
#[derive(Clone, Debug)]
pub struct OrientationMaps {
    pub magnitude: ImageF32,
    pub orientation: ImageF32,
}

impl OrientationMaps {
    /// Pair two precomputed maps, rejecting mismatched shapes.
    pub fn new(magnitude: ImageF32, orientation: ImageF32) -> Result<Self, FeatureError> {
        let maps = Self {
            magnitude,
            orientation,
        };
        maps.check_dimensions()?;
        Ok(maps)
    }

    /// Compute the maps from an intensity image.
    pub fn from_image(l: &ImageF32) -> Self {
        let w = l.w;
        let h = l.h;
        let mut magnitude = ImageF32::new(w, h);
        let mut orientation = ImageF32::new(w, h);
        if w == 0 || h == 0 {
            return Self {
                magnitude,
                orientation,
            };
        }

        for y in 0..h {
            let prev = l.row(y.saturating_sub(1));
            let curr = l.row(y);
            let next = l.row((y + 1).min(h - 1));
            let out_mag = magnitude.row_mut(y);
            let out_ori = orientation.row_mut(y);
            for x in 0..w {
                let gx = curr[(x + 1).min(w - 1)] - curr[x.saturating_sub(1)];
                let gy = next[x] - prev[x];
                out_mag[x] = (gx * gx + gy * gy).sqrt();
                out_ori[x] = (-gy).atan2(gx);
            }
        }

        Self {
            magnitude,
            orientation,
        }
    }

    /// Fails when the two maps do not share the same dimensions.
    pub fn check_dimensions(&self) -> Result<(), FeatureError> {
        let magnitude = self.magnitude.dims();
        let orientation = self.orientation.dims();
        if magnitude != orientation {
            return Err(FeatureError::DimensionMismatch {
                magnitude,
                orientation,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.magnitude.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.magnitude.h
    }

    /// `(magnitude, orientation)` at signed pixel coordinates, `None` outside.
    #[inline]
    pub fn sample(&self, x: isize, y: isize) -> Option<(f32, f32)> {
        let mag = self.magnitude.get_signed(x, y)?;
        let ori = self.orientation.get_signed(x, y)?;
        Some((mag, ori))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn ramp_x(w: usize, h: usize) -> ImageF32 {
        ImageF32::from_fn(w, h, |x, _| x as f32)
    }

    #[test]
    fn horizontal_ramp_points_along_x() {
        let maps = OrientationMaps::from_image(&ramp_x(8, 6));
        // interior: centred difference spans two pixels
        assert!((maps.magnitude.get(3, 2) - 2.0).abs() < 1e-6);
        assert!(maps.orientation.get(3, 2).abs() < 1e-6);
        // border clamps to a one-sided difference
        assert!((maps.magnitude.get(0, 2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn brightening_downwards_points_at_minus_half_pi() {
        let img = ImageF32::from_fn(5, 5, |_, y| 2.0 * y as f32);
        let maps = OrientationMaps::from_image(&img);
        assert!((maps.orientation.get(2, 2) + FRAC_PI_2).abs() < 1e-6);
        assert!((maps.magnitude.get(2, 2) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn mismatched_maps_are_rejected() {
        let err = OrientationMaps::new(ImageF32::new(4, 4), ImageF32::new(4, 3)).unwrap_err();
        assert_eq!(
            err,
            FeatureError::DimensionMismatch {
                magnitude: (4, 4),
                orientation: (4, 3)
            }
        );
    }

    #[test]
    fn empty_image_yields_empty_maps() {
        let maps = OrientationMaps::from_image(&ImageF32::new(0, 0));
        assert_eq!(maps.width(), 0);
        assert_eq!(maps.sample(0, 0), None);
    }
}
