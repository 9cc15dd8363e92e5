//! Accumulation strategies turning oriented patch samples into descriptors.
//!
//! The extractor owns the geometry: it creates one provider per (keypoint,
//! orientation) pair, tells it the patch orientation, streams every pixel
//! that falls inside the provider's oversampled unit square and finally
//! consumes it to obtain the descriptor.
//!
//! Sample coordinates are patch-normalized: `(0.5, 0.5)` is the keypoint and
//! the unit square `[0, 1]²` spans `magnification × scale` pixels in the
//! rotated frame. Samples arrive strictly within
//! `(−oversampling_amount, 1 + oversampling_amount)²`.

pub mod sift;

pub use sift::{SiftFeatureProvider, SiftFeatureProviderFactory};

use crate::types::OrientedFeatureVector;

/// Per-patch descriptor accumulator.
///
/// Finalization takes the provider by value. A provider therefore cannot be
/// finalized twice, nor receive samples once its descriptor has been
/// produced; the compiler rejects both.
pub trait GradientFeatureProvider {
    /// Fraction of the unit square the provider wants sampled beyond each
    /// side (e.g. `0.2` asks for samples up to 20% outside `[0, 1]`).
    fn oversampling_amount(&self) -> f32;

    /// Dominant orientation (radians) the patch is sampled under. Called
    /// once, before the first sample.
    fn set_patch_orientation(&mut self, orientation: f32);

    /// Accumulate one pixel. Called zero or more times.
    fn add_sample(&mut self, sx: f32, sy: f32, magnitude: f32, orientation: f32);

    /// Finish accumulation and return the descriptor.
    fn feature_vector(self: Box<Self>) -> OrientedFeatureVector;
}

/// Produces a fresh provider for every (keypoint, orientation) pair.
pub trait GradientFeatureProviderFactory: Send + Sync {
    fn new_provider(&self) -> Box<dyn GradientFeatureProvider>;
}

impl<F> GradientFeatureProviderFactory for F
where
    F: Fn() -> Box<dyn GradientFeatureProvider> + Send + Sync,
{
    fn new_provider(&self) -> Box<dyn GradientFeatureProvider> {
        self()
    }
}
