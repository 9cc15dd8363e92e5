/// Reasons why an extraction request is rejected before any pixel is touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeatureError {
    /// Magnitude and orientation maps do not share the same `(width, height)`.
    DimensionMismatch {
        magnitude: (usize, usize),
        orientation: (usize, usize),
    },
    /// Keypoint scale is negative, zero, or not finite.
    InvalidScale { scale: f32 },
    /// Keypoint position is not finite.
    InvalidPosition { x: f32, y: f32 },
    /// Magnification factor is non-positive or not finite.
    InvalidMagnification { magnification: f32 },
    /// `magnification × scale` is not representable as a finite patch side.
    PatchOverflow { scale: f32, magnification: f32 },
    /// A histogram or provider parameter is outside its valid range.
    InvalidParameter { name: &'static str, value: f32 },
}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureError::DimensionMismatch {
                magnitude,
                orientation,
            } => write!(
                f,
                "orientation maps differ in size (magnitude {}x{}, orientation {}x{})",
                magnitude.0, magnitude.1, orientation.0, orientation.1
            ),
            FeatureError::InvalidScale { scale } => {
                write!(f, "keypoint scale must be finite and positive, got {scale}")
            }
            FeatureError::InvalidPosition { x, y } => {
                write!(f, "keypoint position must be finite, got ({x}, {y})")
            }
            FeatureError::InvalidMagnification { magnification } => write!(
                f,
                "magnification must be finite and positive, got {magnification}"
            ),
            FeatureError::PatchOverflow {
                scale,
                magnification,
            } => write!(
                f,
                "patch side {magnification} x {scale} overflows the float range"
            ),
            FeatureError::InvalidParameter { name, value } => {
                write!(f, "parameter `{name}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for FeatureError {}

#[cfg(test)]
mod tests {
    use super::FeatureError;

    #[test]
    fn display_names_the_offending_value() {
        let err = FeatureError::InvalidScale { scale: -2.0 };
        assert!(err.to_string().contains("-2"), "got {err}");

        let err = FeatureError::DimensionMismatch {
            magnitude: (10, 12),
            orientation: (10, 11),
        };
        let msg = err.to_string();
        assert!(msg.contains("10x12") && msg.contains("10x11"), "got {msg}");
    }
}
