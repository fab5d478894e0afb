use thiserror::Error;

/// A terrain parameter outside its allowed range. Reported before any grid
/// is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidParameters {
    #[error("grid size must be greater than zero")]
    ZeroSize,
    #[error("number of hills must be greater than zero")]
    ZeroIterations,
    #[error("minimum hill radius must be greater than zero, got {0}")]
    NonPositiveMinRadius(f32),
    #[error("maximum hill radius must be greater than zero, got {0}")]
    NonPositiveMaxRadius(f32),
    #[error("minimum hill radius {min} must be lower than maximum radius {max}")]
    InvertedRadii { min: f32, max: f32 },
    #[error("flattening power must be at least one")]
    FlatteningBelowOne,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}
