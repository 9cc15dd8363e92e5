//! Dominant orientation assignment for scale-space keypoints.
//!
//! A circular neighbourhood of radius `radius_sigmas × σ` (σ =
//! `sigma_scale × scale`) around the keypoint votes into a 36-bin histogram
//! over [0, 2π), each pixel weighted by its gradient magnitude and a Gaussian
//! of its distance to the subpixel keypoint position. After circular
//! smoothing, every strict local maximum reaching `peak_threshold` of the
//! global maximum becomes one dominant orientation, so a single keypoint can
//! produce several descriptors.
//!
//! Pixels outside the maps are skipped. A keypoint without any in-bounds,
//! non-zero gradient support yields no orientation at all.

pub(crate) mod histogram;

use crate::error::FeatureError;
use crate::geometry::clipped_window;
use crate::gradient::OrientationMaps;
use crate::params::OrientationParams;
use crate::types::Keypoint;
use histogram::OrientationHistogram;
use log::trace;

#[derive(Clone, Debug)]
pub struct DominantOrientationExtractor {
    params: OrientationParams,
}

impl Default for DominantOrientationExtractor {
    fn default() -> Self {
        Self {
            params: OrientationParams::default(),
        }
    }
}

impl DominantOrientationExtractor {
    pub fn new(params: OrientationParams) -> Result<Self, FeatureError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &OrientationParams {
        &self.params
    }

    /// Dominant orientations in [0, 2π), in histogram-bin order.
    pub fn extract_orientations(&self, keypoint: &Keypoint, maps: &OrientationMaps) -> Vec<f32> {
        let hist = self.build_histogram(keypoint, maps);
        let orientations = hist.peaks(self.params.peak_threshold);
        trace!(
            "orientations at ({:.2}, {:.2}, s={:.2}): {:?}",
            keypoint.x,
            keypoint.y,
            keypoint.scale,
            orientations
        );
        orientations
    }

    /// Smoothed orientation histogram around `keypoint`, one entry per bin.
    pub fn orientation_histogram(&self, keypoint: &Keypoint, maps: &OrientationMaps) -> Vec<f32> {
        self.build_histogram(keypoint, maps).into_bins()
    }

    fn build_histogram(&self, keypoint: &Keypoint, maps: &OrientationMaps) -> OrientationHistogram {
        let p = &self.params;
        let mut hist = OrientationHistogram::new(p.num_bins);

        let sigma = p.sigma_scale * keypoint.scale;
        let radius = (p.radius_sigmas * sigma).round() as isize;
        // squared offsets are compared in i128; radius may have saturated
        let radius_sq = (radius as i128).pow(2);
        let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);
        let (ix, iy) = keypoint.rounded();

        for py in clipped_window(iy, radius, maps.height()) {
            let dy = (py - iy) as i128;
            for px in clipped_window(ix, radius, maps.width()) {
                let dx = (px - ix) as i128;
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                let Some((mag, ori)) = maps.sample(px, py) else {
                    continue;
                };
                let ex = px as f32 - keypoint.x;
                let ey = py as f32 - keypoint.y;
                let weight = (-(ex * ex + ey * ey) * inv_two_sigma_sq).exp();
                hist.accumulate(ori, mag * weight);
            }
        }

        hist.smooth_box3(p.smoothing_iterations);
        hist
    }
}
