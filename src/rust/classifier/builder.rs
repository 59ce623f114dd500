use std::sync::Arc;

use log::{info, warn};

use super::error::ClassifierError;
use super::labels::ClassLabelTable;
use super::onnx::OnnxOracle;
use super::orchestrator::{ClassificationLevel, ClassificationOrchestrator};
use super::Level;
use crate::artifact_store::ArtifactStore;
use crate::config::OrchestratorConfig;
use crate::normalizer::{Lexicon, TextNormalizer};
use crate::runtime::RuntimeConfig;
use crate::vectorizer::VocabularyVectorizer;

/// A builder for constructing a ClassificationOrchestrator with a fluent interface.
#[derive(Debug, Default)]
pub struct OrchestratorBuilder {
    lexicon: Option<Lexicon>,
    config: OrchestratorConfig,
    n1: Option<ClassificationLevel>,
    n2: Option<ClassificationLevel>,
}

impl OrchestratorBuilder {
    /// Creates a new empty OrchestratorBuilder with the default configuration
    ///
    /// # Example
    /// ```
    /// use lexclass::OrchestratorBuilder;
    ///
    /// let builder = OrchestratorBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the word and phrase tables used for text normalization.
    /// Without it the built-in core lexicon is used.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Sets gating thresholds and reserved class names
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the vectorizer, oracle and labels for one level
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The level was already set
    ///   - The vocabulary is empty
    ///   - The label table is empty
    pub fn with_level(mut self, level: Level, definition: ClassificationLevel) -> Result<Self, ClassifierError> {
        if definition.vectorizer().dimension() == 0 {
            return Err(ClassifierError::ValidationError(format!("Vocabulary for {} is empty", level)));
        }
        if definition.labels().is_empty() {
            return Err(ClassifierError::ValidationError(format!("Label table for {} is empty", level)));
        }

        let slot = match level {
            Level::N1 => &mut self.n1,
            Level::N2 => &mut self.n2,
        };
        if slot.is_some() {
            return Err(ClassifierError::BuildError(format!("Level {} already set", level)));
        }
        *slot = Some(definition);
        Ok(self)
    }

    /// Loads lexicon, vocabularies, label tables and ONNX models for both levels from `store`.
    ///
    /// Checksums are verified first when the store carries a `checksums.json`.
    ///
    /// # Example
    /// ```no_run
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use lexclass::{ArtifactStore, ClassificationOrchestrator, RuntimeConfig};
    ///
    /// let store = ArtifactStore::new("/srv/lexclass/artifacts")?;
    /// let orchestrator = ClassificationOrchestrator::builder()
    ///     .from_store(&store, &RuntimeConfig::default())?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_store(mut self, store: &ArtifactStore, runtime: &RuntimeConfig) -> Result<Self, ClassifierError> {
        info!("Loading artifacts from {:?}", store.root());
        store.verify_checksums()?;

        if self.lexicon.is_none() {
            if let Some(path) = store.lexicon_path() {
                self.lexicon = Some(Lexicon::from_file(path)?);
            }
        }

        let levels = [Level::N1, Level::N2];
        if let Some(level) = levels.into_iter().find(|&l| !store.is_level_available(l)) {
            return Err(ClassifierError::BuildError(format!(
                "Artifacts for {} are incomplete in {:?}",
                level,
                store.level_dir(level)
            )));
        }

        for level in levels {
            let definition = Self::load_level(store, level, runtime)?;
            self = self.with_level(level, definition)?;
        }

        Ok(self)
    }

    fn load_level(
        store: &ArtifactStore,
        level: Level,
        runtime: &RuntimeConfig,
    ) -> Result<ClassificationLevel, ClassifierError> {
        let vectorizer = VocabularyVectorizer::from_file(store.vocabulary_path(level))?;
        let labels = ClassLabelTable::from_file(store.labels_path(level))?;
        let oracle = OnnxOracle::from_file(store.model_path(level), runtime, vectorizer.dimension())?;
        info!(
            "Level {} ready: {} terms, {} classes",
            level,
            vectorizer.dimension(),
            labels.len()
        );
        Ok(ClassificationLevel::new(vectorizer, Arc::new(oracle), labels))
    }

    /// Builds and returns the final ClassificationOrchestrator
    ///
    /// # Returns
    /// * `Result<ClassificationOrchestrator, ClassifierError>` - or an error if:
    ///   - Either level is missing
    ///   - The sentinel category is empty
    ///   - The lexicon patterns fail to compile
    pub fn build(self) -> Result<ClassificationOrchestrator, ClassifierError> {
        let n1 = self
            .n1
            .ok_or_else(|| ClassifierError::BuildError("Level n1 must be set".to_string()))?;
        let n2 = self
            .n2
            .ok_or_else(|| ClassifierError::BuildError("Level n2 must be set".to_string()))?;

        if self.config.sentinel_category.is_empty() {
            return Err(ClassifierError::ValidationError("Sentinel category cannot be empty".into()));
        }
        if !n1.labels().contains_name(&self.config.sentinel_category) {
            warn!(
                "Sentinel category '{}' is not an n1 class; level n2 will never run",
                self.config.sentinel_category
            );
        }

        let normalizer = TextNormalizer::new(self.lexicon.unwrap_or_default())?;

        Ok(ClassificationOrchestrator {
            normalizer,
            n1,
            n2,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::oracle::{Score, ScoringOracle};
    use crate::vectorizer::{FeatureVector, VocabularyIndex};
    use std::collections::HashMap;

    struct ConstantOracle;

    impl ScoringOracle for ConstantOracle {
        fn score(&self, _features: &FeatureVector) -> Result<Score, ClassifierError> {
            Ok(Score {
                class_id: 0,
                probabilities: vec![1.0],
            })
        }
    }

    fn definition(terms: &[&str]) -> ClassificationLevel {
        let terms: HashMap<String, usize> =
            terms.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect();
        let weights = vec![1.0; terms.len()];
        ClassificationLevel::new(
            VocabularyVectorizer::new(VocabularyIndex::new(terms, weights).unwrap()),
            Arc::new(ConstantOracle),
            [(0, "Manifestação")].into_iter().collect(),
        )
    }

    #[test]
    fn test_build_requires_both_levels() {
        let result = OrchestratorBuilder::new()
            .with_level(Level::N1, definition(&["a"]))
            .and_then(|b| b.build());
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_duplicate_level() {
        let result = OrchestratorBuilder::new()
            .with_level(Level::N1, definition(&["a"]))
            .and_then(|b| b.with_level(Level::N1, definition(&["b"])));
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let result = OrchestratorBuilder::new().with_level(Level::N2, definition(&[]));
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn test_empty_sentinel_rejected() {
        let result = OrchestratorBuilder::new()
            .with_config(OrchestratorConfig::default().with_sentinel_category(""))
            .with_level(Level::N1, definition(&["a"]))
            .and_then(|b| b.with_level(Level::N2, definition(&["b"])))
            .and_then(|b| b.build());
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn test_build() -> Result<(), ClassifierError> {
        let orchestrator = OrchestratorBuilder::new()
            .with_level(Level::N1, definition(&["a", "b"]))?
            .with_level(Level::N2, definition(&["c"]))?
            .build()?;
        let info = orchestrator.info();
        assert_eq!(info.n1_vocabulary_size, 2);
        assert_eq!(info.n2_vocabulary_size, 1);
        assert_eq!(info.lexicon_version, "pt-br-core-1");
        assert_eq!(info.sentinel_category, "Manifestação");
        Ok(())
    }

    #[test]
    fn test_from_store_incomplete() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        let result = OrchestratorBuilder::new().from_store(&store, &RuntimeConfig::default());
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
        Ok(())
    }
}
