use std::fmt;
use std::sync::Arc;

use super::error::ClassifierError;
use super::labels::ClassLabelTable;
use super::oracle::ScoringOracle;
use super::outcome::{ClassificationResult, PredictionOutcome};
use super::{Level, OrchestratorInfo};
use crate::config::OrchestratorConfig;
use crate::normalizer::TextNormalizer;
use crate::vectorizer::VocabularyVectorizer;

/// Vectorizer, scoring oracle and label table of one classification level.
#[derive(Clone)]
pub struct ClassificationLevel {
    vectorizer: VocabularyVectorizer,
    oracle: Arc<dyn ScoringOracle>,
    labels: ClassLabelTable,
}

impl fmt::Debug for ClassificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationLevel")
            .field("dimension", &self.vectorizer.dimension())
            .field("classes", &self.labels.len())
            .finish_non_exhaustive()
    }
}

impl ClassificationLevel {
    pub fn new(
        vectorizer: VocabularyVectorizer,
        oracle: Arc<dyn ScoringOracle>,
        labels: ClassLabelTable,
    ) -> Self {
        Self {
            vectorizer,
            oracle,
            labels,
        }
    }

    pub fn vectorizer(&self) -> &VocabularyVectorizer {
        &self.vectorizer
    }

    pub fn labels(&self) -> &ClassLabelTable {
        &self.labels
    }

    /// Vectorizes, scores and names the class of `processed_text`.
    fn classify(&self, processed_text: &str, unknown: &str) -> Result<ClassificationResult, ClassifierError> {
        let features = self.vectorizer.transform(processed_text);
        let score = self.oracle.score(&features)?;
        let class_name = self.labels.name_of(score.class_id, unknown).to_string();

        Ok(ClassificationResult {
            class_id: score.class_id,
            class_name,
            probabilities: score.probabilities,
        })
    }
}

/// Two-level classifier for legal document text.
///
/// Every call to [`predict`](Self::predict) runs the same linear sequence: sanitize, quality
/// gates, preprocess, vectorize and score on level N1, then, only when N1 names the sentinel
/// category, vectorize and score on level N2.
///
/// # Thread Safety
///
/// All state is read-only after construction, so the orchestrator is `Send + Sync` and can be
/// shared across threads with `Arc`:
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
/// use std::thread;
/// use lexclass::{ClassificationOrchestrator, ArtifactStore, RuntimeConfig};
///
/// # if std::env::var("LEXCLASS_ARTIFACTS").is_err() { return Ok(()); }
/// let store = ArtifactStore::new_default()?;
/// let orchestrator = Arc::new(
///     ClassificationOrchestrator::builder()
///         .from_store(&store, &RuntimeConfig::from_env())?
///         .build()?,
/// );
///
/// let worker = Arc::clone(&orchestrator);
/// thread::spawn(move || worker.predict("texto da peça processual").unwrap())
///     .join()
///     .unwrap();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClassificationOrchestrator {
    pub(crate) normalizer: TextNormalizer,
    pub(crate) n1: ClassificationLevel,
    pub(crate) n2: ClassificationLevel,
    pub(crate) config: OrchestratorConfig,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ClassificationOrchestrator>();
    }
};

impl ClassificationOrchestrator {
    /// Creates a new OrchestratorBuilder for fluent construction
    pub fn builder() -> super::builder::OrchestratorBuilder {
        super::builder::OrchestratorBuilder::new()
    }

    /// Returns information about the orchestrator's configuration
    pub fn info(&self) -> OrchestratorInfo {
        OrchestratorInfo {
            n1_vocabulary_size: self.n1.vectorizer.dimension(),
            n2_vocabulary_size: self.n2.vectorizer.dimension(),
            n1_num_classes: self.n1.labels.len(),
            n2_num_classes: self.n2.labels.len(),
            lexicon_version: self.normalizer.lexicon().version().to_string(),
            sentinel_category: self.config.sentinel_category.clone(),
        }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn level(&self, level: Level) -> &ClassificationLevel {
        match level {
            Level::N1 => &self.n1,
            Level::N2 => &self.n2,
        }
    }

    /// Classifies one text.
    ///
    /// Texts rejected by the quality gates are not an error: the outcome comes back with
    /// `classifiable == false` and a message, and no oracle is called.
    ///
    /// # Errors
    /// - `ScoringFailure` (or whatever the oracle returns) when a scoring call fails; the
    ///   failure is passed through unchanged and never retried
    pub fn predict(&self, raw_text: &str) -> Result<PredictionOutcome, ClassifierError> {
        let gating = &self.config.gating;
        let sanitized = self.normalizer.sanitize(raw_text);

        if self.normalizer.is_garbage(&sanitized, gating) {
            log::debug!("Rejected garbage text ({} chars)", sanitized.chars().count());
            return Ok(PredictionOutcome::rejected(
                raw_text,
                sanitized,
                "not classifiable: invalid or corrupted format".to_string(),
            ));
        }

        let length = sanitized.chars().count();
        if length < gating.min_length {
            log::debug!("Rejected short text ({} chars)", length);
            return Ok(PredictionOutcome::rejected(
                raw_text,
                sanitized,
                format!(
                    "text too short: {} characters (minimum {})",
                    length, gating.min_length
                ),
            ));
        }

        let processed = self.normalizer.preprocess(&sanitized);
        log::debug!(
            "Preprocessed {} chars into {} tokens",
            length,
            processed.split(' ').filter(|t| !t.is_empty()).count()
        );

        let unknown = self.config.unknown_class_name.as_str();
        let n1_result = self.n1.classify(&processed, unknown)?;
        log::debug!("{} -> {} ({})", Level::N1, n1_result.class_name, n1_result.class_id);

        let n2_result = if n1_result.class_name == self.config.sentinel_category {
            let result = self.n2.classify(&processed, unknown)?;
            log::debug!("{} -> {} ({})", Level::N2, result.class_name, result.class_id);
            Some(result)
        } else {
            None
        };

        Ok(PredictionOutcome::classified(
            raw_text,
            sanitized,
            processed,
            n1_result,
            n2_result,
        ))
    }
}
