//! Two-level classifier for short legal-document text.
//!
//! A text is sanitized, checked by two quality gates (corruption heuristic and minimum length),
//! normalized into a token stream, turned into TF-IDF features and scored by a pre-trained
//! model on level N1. When N1 names the sentinel category ("Manifestação"), the same token
//! stream is vectorized against the N2 vocabulary and scored by the N2 model.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use lexclass::{ArtifactStore, ClassificationOrchestrator, RuntimeConfig};
//!
//! let store = ArtifactStore::new_default()?;
//! let orchestrator = ClassificationOrchestrator::builder()
//!     .from_store(&store, &RuntimeConfig::from_env())?
//!     .build()?;
//!
//! let outcome = orchestrator.predict("EXCELENTÍSSIMO SENHOR DOUTOR JUIZ ...")?;
//! if outcome.classifiable {
//!     println!("{:?}", outcome.final_class_name());
//! } else {
//!     println!("{}", outcome.message.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Custom scoring backends
//!
//! Anything implementing [`ScoringOracle`] can stand in for the ONNX models:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use lexclass::{
//!     ClassLabelTable, ClassificationLevel, ClassificationOrchestrator, ClassifierError,
//!     FeatureVector, Level, Score, ScoringOracle, VocabularyIndex, VocabularyVectorizer,
//! };
//!
//! struct AlwaysFirst;
//!
//! impl ScoringOracle for AlwaysFirst {
//!     fn score(&self, _features: &FeatureVector) -> Result<Score, ClassifierError> {
//!         Ok(Score { class_id: 0, probabilities: vec![1.0] })
//!     }
//! }
//!
//! let level = |terms: &[&str], name: &str| -> Result<ClassificationLevel, ClassifierError> {
//!     let index: HashMap<String, usize> =
//!         terms.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect();
//!     let weights = vec![1.0; index.len()];
//!     Ok(ClassificationLevel::new(
//!         VocabularyVectorizer::new(VocabularyIndex::new(index, weights)?),
//!         Arc::new(AlwaysFirst),
//!         ClassLabelTable::from_iter([(0, name)]),
//!     ))
//! };
//!
//! let orchestrator = ClassificationOrchestrator::builder()
//!     .with_level(Level::N1, level(&["recurso", "apelacao"], "Recurso")?)?
//!     .with_level(Level::N2, level(&["laudo"], "Outros")?)?
//!     .build()?;
//!
//! let outcome = orchestrator.predict("curto")?;
//! assert!(!outcome.classifiable);
//! # Ok(())
//! # }
//! ```

pub mod artifact_store;
pub mod classifier;
pub mod config;
pub mod normalizer;
mod runtime;
pub mod vectorizer;

pub use artifact_store::{ArtifactError, ArtifactStore};
pub use classifier::{
    ClassLabelTable, ClassificationLevel, ClassificationOrchestrator, ClassificationResult,
    ClassifierError, Level, OnnxOracle, OrchestratorBuilder, OrchestratorInfo, PredictionOutcome,
    Score, ScoringBackend, ScoringOracle, SerializedOracle,
};
pub use config::{GatingConfig, OrchestratorConfig, SENTINEL_CATEGORY, UNKNOWN_CLASS_NAME};
pub use normalizer::{
    is_garbage_text, is_garbage_text_with, sanitize_text, Lexicon, LexiconFile, StopwordVariant,
    TextNormalizer,
};
pub use runtime::{create_session_builder, OptimizationLevel, RuntimeConfig};
pub use vectorizer::{FeatureVector, VocabularyArtifact, VocabularyIndex, VocabularyVectorizer};

pub fn init_logger() {
    env_logger::init();
}
