use serde::{Deserialize, Serialize};

/// Result of one classification level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub class_id: i64,
    pub class_name: String,
    /// Aligned to the scoring model's label order
    pub probabilities: Vec<f32>,
}

/// Everything a caller gets back for one text.
///
/// `classifiable == false` means a quality gate rejected the text; `message` says why and no
/// result is present. `n2_result` is present only when N1 picked the sentinel category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOutcome {
    pub original_text: String,
    pub sanitized_text: String,
    pub processed_text: String,
    #[serde(rename = "isClassifiable")]
    pub classifiable: bool,
    pub message: Option<String>,
    pub n1_result: Option<ClassificationResult>,
    pub n2_result: Option<ClassificationResult>,
}

impl PredictionOutcome {
    pub(crate) fn rejected(
        original_text: &str,
        sanitized_text: String,
        message: String,
    ) -> Self {
        Self {
            original_text: original_text.to_string(),
            sanitized_text,
            processed_text: String::new(),
            classifiable: false,
            message: Some(message),
            n1_result: None,
            n2_result: None,
        }
    }

    pub(crate) fn classified(
        original_text: &str,
        sanitized_text: String,
        processed_text: String,
        n1_result: ClassificationResult,
        n2_result: Option<ClassificationResult>,
    ) -> Self {
        Self {
            original_text: original_text.to_string(),
            sanitized_text,
            processed_text,
            classifiable: true,
            message: None,
            n1_result: Some(n1_result),
            n2_result,
        }
    }

    /// Name of the most specific class assigned, if any.
    pub fn final_class_name(&self) -> Option<&str> {
        self.n2_result
            .as_ref()
            .or(self.n1_result.as_ref())
            .map(|r| r.class_name.as_str())
    }
}
