use thiserror::Error;

/// Failures surfaced by the classification pipeline.
#[derive(Error, Debug)]
pub enum ScamRadarError {
    /// The statistical model could not be loaded; every classification
    /// reports a system error until a model is supplied.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Classification failed: {0}")]
    ClassificationFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScamRadarError {
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, ScamRadarError::ModelUnavailable(_))
    }
}
