#![doc = include_str!("../README.md")]

// Core pipeline
pub mod extractor;
pub mod geometry;
pub mod gradient;
pub mod orientation;
pub mod provider;

// Shared types and configuration
pub mod angle;
pub mod error;
pub mod params;
pub mod types;

// Tooling support (image I/O, JSON configs, run summaries)
pub mod config;
pub mod diagnostics;
pub mod image;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::FeatureError;
pub use crate::extractor::{GradientFeatureExtractor, PatchStats};
pub use crate::geometry::SamplingGeometry;
pub use crate::gradient::OrientationMaps;
pub use crate::orientation::DominantOrientationExtractor;
pub use crate::params::{ExtractorParams, OrientationParams, SiftParams};
pub use crate::provider::{
    GradientFeatureProvider, GradientFeatureProviderFactory, SiftFeatureProvider,
    SiftFeatureProviderFactory,
};
pub use crate::types::{Keypoint, OrientedFeatureVector};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use gradient_features::prelude::*;
///
/// let img = ImageF32::from_fn(64, 64, |x, y| (x as f32 * 0.3).sin() + y as f32 * 0.05);
/// let maps = OrientationMaps::from_image(&img);
/// let extractor = GradientFeatureExtractor::new(SiftFeatureProviderFactory::default());
///
/// let features = extractor
///     .extract_feature(&Keypoint::new(32.0, 32.0, 1.6), &maps)
///     .expect("well-formed input");
/// for f in &features {
///     assert_eq!(f.values.len(), 128);
/// }
/// ```
pub mod prelude {
    pub use crate::image::ImageF32;
    pub use crate::{
        GradientFeatureExtractor, Keypoint, OrientationMaps, OrientedFeatureVector,
        SiftFeatureProviderFactory,
    };
}
