use ort::Error as OrtError;

use crate::artifact_store::ArtifactError;

/// Represents the different types of errors that can occur while building or running the classifier.
///
/// Gating rejections (garbage text, text too short) are not errors: they come back as a
/// successful [`PredictionOutcome`](crate::PredictionOutcome) with `classifiable == false`.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// A persisted artifact contradicts itself (e.g. vocabulary size != weight table size)
    #[error("Artifact inconsistency: {0}")]
    ArtifactInconsistency(String),
    /// An artifact could not be located, read, parsed or verified
    #[error("Artifact error: {0}")]
    ArtifactError(#[from] ArtifactError),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred while loading or inspecting the ONNX model
    #[error("Model error: {0}")]
    ModelError(String),
    /// The scoring oracle could not produce a result
    #[error("Scoring failure: {0}")]
    ScoringFailure(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::ModelError(err.to_string())
    }
}
