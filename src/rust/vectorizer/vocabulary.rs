use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact_store::ArtifactError;
use crate::classifier::ClassifierError;

/// On-disk form of a vocabulary (`vocabulary.json`): term to column index, plus the
/// inverse-document-frequency weight of every column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyArtifact {
    #[serde(alias = "vocab")]
    pub vocabulary: HashMap<String, usize>,
    #[serde(alias = "idf", alias = "idf_diag")]
    pub weights: Vec<f32>,
}

/// Immutable term index with its aligned weight table.
///
/// Guarantees `len() == weights().len()`; anything else is rejected at construction.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    terms: HashMap<String, usize>,
    weights: Vec<f32>,
}

impl VocabularyIndex {
    /// Builds the index, failing when the term map and weight table disagree in size.
    ///
    /// Indices outside `0..weights.len()` are tolerated here (with a warning) and skipped when
    /// vectorizing.
    pub fn new(terms: HashMap<String, usize>, weights: Vec<f32>) -> Result<Self, ClassifierError> {
        if terms.len() != weights.len() {
            log::error!(
                "Vocabulary has {} terms but weight table has {} entries",
                terms.len(),
                weights.len()
            );
            return Err(ClassifierError::ArtifactInconsistency(format!(
                "vocabulary size ({}) does not match weight table size ({})",
                terms.len(),
                weights.len()
            )));
        }

        let out_of_range = terms.values().filter(|&&i| i >= weights.len()).count();
        if out_of_range > 0 {
            log::warn!(
                "{} vocabulary terms point outside the weight table; they will be ignored",
                out_of_range
            );
        }

        Ok(Self { terms, weights })
    }

    pub fn from_artifact(artifact: VocabularyArtifact) -> Result<Self, ClassifierError> {
        Self::new(artifact.vocabulary, artifact.weights)
    }

    /// Loads and validates a `vocabulary.json` artifact.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.display().to_string()).into());
        }
        let bytes = fs::read(path).map_err(ArtifactError::from)?;
        let artifact: VocabularyArtifact =
            serde_json::from_slice(&bytes).map_err(ArtifactError::from)?;

        let index = Self::from_artifact(artifact)?;
        log::info!("Loaded vocabulary with {} terms from {:?}", index.len(), path);
        Ok(index)
    }

    /// Number of terms, which is also the feature vector length.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    pub fn weight(&self, index: usize) -> Option<f32> {
        self.weights.get(index).copied()
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}
