use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use ndarray::Array1;

use super::vocabulary::VocabularyIndex;
use crate::classifier::ClassifierError;

/// Dense feature vector with one entry per vocabulary term.
pub type FeatureVector = Array1<f32>;

/// TF-IDF vectorizer over a fixed [`VocabularyIndex`].
///
/// Cheap to clone: the vocabulary is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct VocabularyVectorizer {
    vocabulary: Arc<VocabularyIndex>,
}

impl VocabularyVectorizer {
    pub fn new(vocabulary: VocabularyIndex) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
        }
    }

    /// Loads the vocabulary artifact at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        Ok(Self::new(VocabularyIndex::from_file(path)?))
    }

    pub fn vocabulary(&self) -> &VocabularyIndex {
        &self.vocabulary
    }

    /// Length of every vector this vectorizer produces.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Converts preprocessed text into TF-IDF features.
    ///
    /// Term frequency is the term's count divided by the total number of tokens, including
    /// tokens missing from the vocabulary. The result always has [`dimension`](Self::dimension)
    /// entries; text with no known term gives an all-zero vector.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    /// use lexclass::{VocabularyIndex, VocabularyVectorizer};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let terms = HashMap::from([("a".to_string(), 0), ("b".to_string(), 1)]);
    /// let vectorizer = VocabularyVectorizer::new(VocabularyIndex::new(terms, vec![1.0, 2.0])?);
    ///
    /// let features = vectorizer.transform("a a b");
    /// assert!((features[0] - 2.0 / 3.0).abs() < 1e-6);
    /// assert!((features[1] - 2.0 / 3.0).abs() < 1e-6);
    /// # Ok(())
    /// # }
    /// ```
    pub fn transform(&self, processed_text: &str) -> FeatureVector {
        let mut features = Array1::zeros(self.dimension());

        let tokens: Vec<&str> = processed_text.split(' ').filter(|t| !t.is_empty()).collect();
        if tokens.is_empty() {
            return features;
        }
        let total = tokens.len() as f32;

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in &tokens {
            if let Some(index) = self.vocabulary.index_of(token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        for (index, count) in counts {
            match (self.vocabulary.weight(index), features.get_mut(index)) {
                (Some(weight), Some(slot)) => *slot = (count as f32 / total) * weight,
                _ => log::warn!("Skipping term with index {} outside the weight table", index),
            }
        }

        features
    }
}
