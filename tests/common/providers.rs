use gradient_features::{
    GradientFeatureProvider, GradientFeatureProviderFactory, OrientedFeatureVector,
};

/// One forwarded pixel as seen by a provider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub sx: f32,
    pub sy: f32,
    pub magnitude: f32,
    pub orientation: f32,
}

/// Provider that emits every sample it received, flattened as
/// `[sx, sy, magnitude, orientation]` quadruples.
pub struct RecordingProvider {
    oversampling: f32,
    patch_orientation: Option<f32>,
    values: Vec<f32>,
}

impl GradientFeatureProvider for RecordingProvider {
    fn oversampling_amount(&self) -> f32 {
        self.oversampling
    }

    fn set_patch_orientation(&mut self, orientation: f32) {
        assert!(
            self.patch_orientation.is_none(),
            "patch orientation set twice"
        );
        assert!(self.values.is_empty(), "orientation set after samples");
        self.patch_orientation = Some(orientation);
    }

    fn add_sample(&mut self, sx: f32, sy: f32, magnitude: f32, orientation: f32) {
        assert!(
            self.patch_orientation.is_some(),
            "sample before patch orientation"
        );
        self.values.extend_from_slice(&[sx, sy, magnitude, orientation]);
    }

    fn feature_vector(self: Box<Self>) -> OrientedFeatureVector {
        OrientedFeatureVector::new(self.patch_orientation.unwrap_or(0.0), self.values)
    }
}

pub fn recording(oversampling: f32) -> impl GradientFeatureProviderFactory {
    move || {
        Box::new(RecordingProvider {
            oversampling,
            patch_orientation: None,
            values: Vec::new(),
        }) as Box<dyn GradientFeatureProvider>
    }
}

pub fn samples(feature: &OrientedFeatureVector) -> Vec<Sample> {
    assert_eq!(feature.values.len() % 4, 0);
    feature
        .values
        .chunks_exact(4)
        .map(|c| Sample {
            sx: c[0],
            sy: c[1],
            magnitude: c[2],
            orientation: c[3],
        })
        .collect()
}
