//! Oriented sampling square around a keypoint.
//!
//! The patch is the unit square `[0, 1]²` in a frame rotated by the dominant
//! orientation θ and centred on the keypoint, scaled so that one patch unit
//! spans `magnification × scale` pixels. Providers may ask for an extra
//! margin ("oversampling") on every side of that square.
//!
//! Pixel scanning uses the axis-aligned box that contains the rotated,
//! oversampled square:
//!
//! ```text
//! oriented_size = |sin θ|·S + |cos θ|·S      (S = sampling box side in px)
//! half          = round(oriented_size / 2)
//! ```
//!
//! Candidates inside that box are mapped to patch coordinates with the
//! rotation `[cos θ, −sin θ; sin θ, cos θ]` and kept only when they fall
//! strictly inside `(−o, 1 + o)²`. The same matrix entries feed both the box
//! sizing and the per-pixel transform.
use nalgebra::{Matrix2, Vector2};
use std::ops::RangeInclusive;

#[derive(Clone, Copy, Debug)]
pub struct SamplingGeometry {
    /// Side of the unit patch in pixels (`magnification × scale`).
    pub bounding_box_size: f32,
    /// Oversampling margin per side in pixels.
    pub extra_sampling: f32,
    /// Side of the oversampled square in pixels.
    pub sampling_box_size: f32,
    /// Half side of the axis-aligned scan box, in whole pixels.
    pub half_size: isize,
    /// Oversampling fraction requested by the provider.
    pub oversampling: f32,
    rotation: Matrix2<f32>,
}

impl SamplingGeometry {
    pub fn new(scale: f32, magnification: f32, oversampling: f32, orientation: f32) -> Self {
        let sin = orientation.sin();
        let cos = orientation.cos();
        let rotation = Matrix2::new(cos, -sin, sin, cos);

        let bounding_box_size = magnification * scale;
        let extra_sampling = oversampling * bounding_box_size;
        let sampling_box_size = extra_sampling + bounding_box_size + extra_sampling;

        let oriented_size = (rotation[(1, 0)] * sampling_box_size).abs()
            + (rotation[(0, 0)] * sampling_box_size).abs();
        let half_size = (oriented_size / 2.0).round() as isize;

        Self {
            bounding_box_size,
            extra_sampling,
            sampling_box_size,
            half_size,
            oversampling,
            rotation,
        }
    }

    /// Patch coordinates of the integer offset `(dx, dy)` from the rounded
    /// keypoint centre; `frac` is the keypoint's subpixel remainder
    /// `(fx − ix, fy − iy)`.
    #[inline]
    pub fn patch_coords(&self, dx: isize, dy: isize, frac: (f32, f32)) -> (f32, f32) {
        let rotated = self.rotation * Vector2::new(dx as f32, dy as f32);
        let sx = 0.5 + (rotated.x - frac.0) / self.bounding_box_size;
        let sy = 0.5 + (rotated.y - frac.1) / self.bounding_box_size;
        (sx, sy)
    }

    /// Strict containment in the oversampled unit square.
    #[inline]
    pub fn contains(&self, sx: f32, sy: f32) -> bool {
        let lo = -self.oversampling;
        let hi = 1.0 + self.oversampling;
        sx > lo && sx < hi && sy > lo && sy < hi
    }
}

/// Pixel coordinates of `[center - half, center + half]` that lie inside
/// `[0, len)`. Empty when the window misses the axis.
///
/// Saturating bounds keep this valid for centres and half-sizes that came
/// from saturating float casts, and every `coord - center` in the result
/// fits in `[-half, half]`.
pub(crate) fn clipped_window(center: isize, half: isize, len: usize) -> RangeInclusive<isize> {
    let last = len as isize - 1;
    let lo = center.saturating_sub(half).max(0);
    let hi = center.saturating_add(half).min(last);
    lo..=hi
}
