//! Tunable thresholds and reserved names used by the orchestrator.

/// Class name on level N1 that triggers the N2 stage.
pub const SENTINEL_CATEGORY: &str = "Manifestação";

/// Class name reported for ids missing from a label table.
pub const UNKNOWN_CLASS_NAME: &str = "Unknown";

/// Thresholds for the pre-classification quality gates.
#[derive(Debug, Clone, PartialEq)]
pub struct GatingConfig {
    /// Sanitized texts shorter than this (in characters) are not classified
    pub min_length: usize,
    /// Text whose share of space characters exceeds this is treated as garbage
    pub max_space_ratio: f64,
    /// Text whose share of short tokens exceeds this is treated as garbage
    pub max_short_token_ratio: f64,
    /// Below this many tokens the short-token ratio is not evaluated
    pub min_tokens_for_ratio: usize,
    /// Tokens with at most this many characters count as short
    pub short_token_max_len: usize,
}

impl Default for GatingConfig {
    fn default() -> Self {
        Self {
            min_length: 182,
            max_space_ratio: 0.35,
            max_short_token_ratio: 0.50,
            min_tokens_for_ratio: 10,
            short_token_max_len: 2,
        }
    }
}

/// Orchestrator configuration: gates plus the reserved class names.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    pub gating: GatingConfig,
    pub sentinel_category: String,
    pub unknown_class_name: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            gating: GatingConfig::default(),
            sentinel_category: SENTINEL_CATEGORY.to_string(),
            unknown_class_name: UNKNOWN_CLASS_NAME.to_string(),
        }
    }
}

impl OrchestratorConfig {
    pub fn with_gating(mut self, gating: GatingConfig) -> Self {
        self.gating = gating;
        self
    }

    pub fn with_sentinel_category(mut self, category: impl Into<String>) -> Self {
        self.sentinel_category = category.into();
        self
    }

    /// Name reported for class ids missing from a label table
    pub fn with_unknown_class_name(mut self, name: impl Into<String>) -> Self {
        self.unknown_class_name = name.into();
        self
    }
}
