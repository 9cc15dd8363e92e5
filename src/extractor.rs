//! Oriented descriptor extraction around scale-space keypoints.
//!
//! For every dominant orientation θ of a keypoint the extractor
//!
//! 1. asks the factory for a fresh provider and sets its patch orientation,
//! 2. sizes the oriented sampling square from the keypoint scale, the
//!    magnification and the provider's oversampling request
//!    ([`SamplingGeometry`]),
//! 3. scans the axis-aligned box containing that square around the rounded
//!    keypoint centre, skipping pixels outside the maps,
//! 4. forwards the pixels whose patch coordinates fall inside the
//!    oversampled unit square, and
//! 5. consumes the provider to obtain the descriptor tagged with θ.
//!
//! Pixels near the image border are simply missing from the patch; no
//! padding or reflection takes place.
use crate::error::FeatureError;
use crate::geometry::{clipped_window, SamplingGeometry};
use crate::gradient::OrientationMaps;
use crate::orientation::DominantOrientationExtractor;
use crate::params::ExtractorParams;
use crate::provider::GradientFeatureProviderFactory;
use crate::types::{Keypoint, OrientedFeatureVector};
use log::{debug, trace, warn};
use std::ops::RangeInclusive;

/// Per-patch sample accounting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Samples handed to the provider.
    pub forwarded: usize,
    /// In-bounds candidates outside the rotated, oversampled square.
    pub rejected: usize,
    /// Cells of the scan box outside the image (never visited).
    pub out_of_bounds: usize,
}

pub struct GradientFeatureExtractor<F> {
    orientation_extractor: DominantOrientationExtractor,
    factory: F,
    magnification: f32,
}

impl<F: GradientFeatureProviderFactory> GradientFeatureExtractor<F> {
    /// Extractor with default orientation settings and magnification 12.
    pub fn new(factory: F) -> Self {
        Self {
            orientation_extractor: DominantOrientationExtractor::default(),
            factory,
            magnification: ExtractorParams::default().magnification,
        }
    }

    pub fn with_params(factory: F, params: ExtractorParams) -> Result<Self, FeatureError> {
        params.validate()?;
        Ok(Self {
            orientation_extractor: DominantOrientationExtractor::new(params.orientation)?,
            factory,
            magnification: params.magnification,
        })
    }

    pub fn from_parts(
        orientation_extractor: DominantOrientationExtractor,
        factory: F,
        magnification: f32,
    ) -> Result<Self, FeatureError> {
        if !magnification.is_finite() || magnification <= 0.0 {
            return Err(FeatureError::InvalidMagnification { magnification });
        }
        Ok(Self {
            orientation_extractor,
            factory,
            magnification,
        })
    }

    pub fn magnification(&self) -> f32 {
        self.magnification
    }

    pub fn orientation_extractor(&self) -> &DominantOrientationExtractor {
        &self.orientation_extractor
    }

    /// One descriptor per dominant orientation of `keypoint`.
    ///
    /// A keypoint without orientation support yields an empty vector.
    pub fn extract_feature(
        &self,
        keypoint: &Keypoint,
        maps: &OrientationMaps,
    ) -> Result<Vec<OrientedFeatureVector>, FeatureError> {
        self.check_inputs(keypoint, maps)?;
        let orientations = self
            .orientation_extractor
            .extract_orientations(keypoint, maps);
        if orientations.is_empty() {
            debug!(
                "no orientation support at ({:.2}, {:.2}, s={:.2})",
                keypoint.x, keypoint.y, keypoint.scale
            );
            return Ok(Vec::new());
        }
        Ok(self.describe(keypoint, maps, &orientations))
    }

    /// Same as [`extract_feature`](Self::extract_feature) with caller-supplied
    /// orientations in place of the dominant-orientation search.
    pub fn extract_with_orientations(
        &self,
        keypoint: &Keypoint,
        maps: &OrientationMaps,
        orientations: &[f32],
    ) -> Result<Vec<OrientedFeatureVector>, FeatureError> {
        self.check_inputs(keypoint, maps)?;
        Ok(self.describe(keypoint, maps, orientations))
    }

    /// Descriptor for a single orientation.
    pub fn create_feature(
        &self,
        keypoint: &Keypoint,
        orientation: f32,
        maps: &OrientationMaps,
    ) -> Result<OrientedFeatureVector, FeatureError> {
        self.check_inputs(keypoint, maps)?;
        Ok(self.sample_patch(keypoint, orientation, maps).0)
    }

    /// Descriptors for every keypoint, in input order.
    ///
    /// Runs across keypoints on the rayon pool when the `parallel` feature is
    /// enabled. The first malformed keypoint fails the whole batch.
    pub fn extract_batch(
        &self,
        keypoints: &[Keypoint],
        maps: &OrientationMaps,
    ) -> Result<Vec<Vec<OrientedFeatureVector>>, FeatureError> {
        maps.check_dimensions()?;

        #[cfg(feature = "parallel")]
        let result = {
            use rayon::prelude::*;
            keypoints
                .par_iter()
                .map(|kp| self.extract_feature(kp, maps))
                .collect::<Result<Vec<_>, _>>()
        };
        #[cfg(not(feature = "parallel"))]
        let result = keypoints
            .iter()
            .map(|kp| self.extract_feature(kp, maps))
            .collect::<Result<Vec<_>, _>>();

        if let Err(err) = &result {
            warn!("batch of {} keypoints rejected: {err}", keypoints.len());
        }
        result
    }

    fn describe(
        &self,
        keypoint: &Keypoint,
        maps: &OrientationMaps,
        orientations: &[f32],
    ) -> Vec<OrientedFeatureVector> {
        let mut total = PatchStats::default();
        let features: Vec<_> = orientations
            .iter()
            .map(|&theta| {
                let (feature, stats) = self.sample_patch(keypoint, theta, maps);
                total.forwarded += stats.forwarded;
                total.rejected += stats.rejected;
                total.out_of_bounds = total.out_of_bounds.saturating_add(stats.out_of_bounds);
                feature
            })
            .collect();
        debug!(
            "keypoint ({:.2}, {:.2}, s={:.2}): {} orientations, {} samples forwarded, {} rejected, {} off-image",
            keypoint.x,
            keypoint.y,
            keypoint.scale,
            features.len(),
            total.forwarded,
            total.rejected,
            total.out_of_bounds
        );
        features
    }

    /// Scan the oriented patch for one orientation and finalize its provider.
    pub(crate) fn sample_patch(
        &self,
        keypoint: &Keypoint,
        orientation: f32,
        maps: &OrientationMaps,
    ) -> (OrientedFeatureVector, PatchStats) {
        let mut provider = self.factory.new_provider();
        provider.set_patch_orientation(orientation);

        let geometry = SamplingGeometry::new(
            keypoint.scale,
            self.magnification,
            provider.oversampling_amount(),
            orientation,
        );
        let (ix, iy) = keypoint.rounded();
        let frac = (keypoint.x - ix as f32, keypoint.y - iy as f32);
        let half = geometry.half_size;
        trace!(
            "θ={orientation:.4}: box={:.2}px sampling={:.2}px half={half}",
            geometry.bounding_box_size,
            geometry.sampling_box_size
        );

        // only the part of the scan box that overlaps the maps is visited
        let rows = clipped_window(iy, half, maps.height());
        let cols = clipped_window(ix, half, maps.width());
        let mut stats = PatchStats {
            out_of_bounds: off_image_count(half, &rows, &cols),
            ..PatchStats::default()
        };
        for y in rows {
            for x in cols.clone() {
                let Some((mag, ori)) = maps.sample(x, y) else {
                    continue;
                };
                let (sx, sy) = geometry.patch_coords(x - ix, y - iy, frac);
                if geometry.contains(sx, sy) {
                    provider.add_sample(sx, sy, mag, ori);
                    stats.forwarded += 1;
                } else {
                    stats.rejected += 1;
                }
            }
        }

        let mut feature = provider.feature_vector();
        feature.orientation = orientation;
        (feature, stats)
    }

    fn check_inputs(
        &self,
        keypoint: &Keypoint,
        maps: &OrientationMaps,
    ) -> Result<(), FeatureError> {
        maps.check_dimensions()?;
        keypoint.validate()?;
        if !(self.magnification * keypoint.scale).is_finite() {
            return Err(FeatureError::PatchOverflow {
                scale: keypoint.scale,
                magnification: self.magnification,
            });
        }
        Ok(())
    }
}

/// Cells of the `(2·half + 1)²` scan box outside the clipped window,
/// saturating at `usize::MAX`.
fn off_image_count(
    half: isize,
    rows: &RangeInclusive<isize>,
    cols: &RangeInclusive<isize>,
) -> usize {
    let span = |r: &RangeInclusive<isize>| {
        if r.is_empty() {
            0u128
        } else {
            (r.end() - r.start()) as u128 + 1
        }
    };
    let side = 2 * half.max(0) as u128 + 1;
    let outside = side
        .saturating_mul(side)
        .saturating_sub(span(rows) * span(cols));
    usize::try_from(outside).unwrap_or(usize::MAX)
}
