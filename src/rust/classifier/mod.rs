use std::fmt;

mod error;
mod labels;
mod onnx;
mod oracle;
mod orchestrator;
mod outcome;
pub mod builder;
mod utils;

pub use builder::OrchestratorBuilder;
pub use error::ClassifierError;
pub use labels::ClassLabelTable;
pub use onnx::OnnxOracle;
pub use oracle::{Score, ScoringBackend, ScoringOracle, SerializedOracle};
pub use orchestrator::{ClassificationLevel, ClassificationOrchestrator};
pub use outcome::{ClassificationResult, PredictionOutcome};

/// The two classification levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// General document type
    N1,
    /// Sub-type, only evaluated when N1 picks the sentinel category
    N2,
}

impl Level {
    /// Lowercase name, also used as the artifact sub-directory
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N1 => "n1",
            Self::N2 => "n2",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Information about the loaded artifacts and configuration of an orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorInfo {
    /// Feature vector length on level N1
    pub n1_vocabulary_size: usize,
    /// Feature vector length on level N2
    pub n2_vocabulary_size: usize,
    /// Number of named classes on level N1
    pub n1_num_classes: usize,
    /// Number of named classes on level N2
    pub n2_num_classes: usize,
    /// Version tag of the lexicon driving normalization
    pub lexicon_version: String,
    /// N1 class name that triggers level N2
    pub sentinel_category: String,
}
