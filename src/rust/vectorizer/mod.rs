mod tfidf;
mod vocabulary;

pub use tfidf::{FeatureVector, VocabularyVectorizer};
pub use vocabulary::{VocabularyArtifact, VocabularyIndex};
