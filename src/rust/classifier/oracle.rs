use std::sync::Mutex;

use super::error::ClassifierError;
use crate::vectorizer::FeatureVector;

/// Raw output of a scoring oracle: predicted class id and the probability of every class, in
/// the oracle's own label order.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub class_id: i64,
    pub probabilities: Vec<f32>,
}

/// A pre-trained classifier seen from the outside: feature vector in, [`Score`] out.
///
/// Implementations must be callable from many threads at once. Backends that cannot run
/// concurrently implement [`ScoringBackend`] instead and are wrapped in [`SerializedOracle`].
pub trait ScoringOracle: Send + Sync {
    /// Scores one feature vector.
    ///
    /// # Errors
    /// - `ScoringFailure` when the backend cannot produce a result
    fn score(&self, features: &FeatureVector) -> Result<Score, ClassifierError>;
}

/// A scoring engine that needs exclusive access while it runs.
pub trait ScoringBackend: Send {
    fn score(&mut self, features: &FeatureVector) -> Result<Score, ClassifierError>;
}

/// Serializes calls into a [`ScoringBackend`] with a per-instance mutex.
#[derive(Debug)]
pub struct SerializedOracle<B> {
    backend: Mutex<B>,
}

impl<B: ScoringBackend> SerializedOracle<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
        }
    }
}

impl<B: ScoringBackend> ScoringOracle for SerializedOracle<B> {
    fn score(&self, features: &FeatureVector) -> Result<Score, ClassifierError> {
        let mut backend = self
            .backend
            .lock()
            .map_err(|_| ClassifierError::ScoringFailure("scoring backend lock poisoned".into()))?;
        backend.score(features)
    }
}
