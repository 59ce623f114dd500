use std::collections::HashMap;
use std::path::Path;

use ndarray::Axis;
use ort::session::Session;
use ort::tensor::TensorElementType;
use ort::value::{Tensor, ValueType};

use super::error::ClassifierError;
use super::oracle::{Score, ScoringOracle};
use super::utils::argmax;
use crate::runtime::{create_session_builder, RuntimeConfig};
use crate::vectorizer::FeatureVector;

const LABEL_OUTPUT_NAMES: &[&str] = &["output_label", "label"];
const PROBABILITY_OUTPUT_NAMES: &[&str] = &["output_probability", "probabilities"];

/// Name, element type and shape of one model input or output.
#[derive(Debug, Clone, PartialEq)]
struct TensorSignature {
    name: String,
    /// `None` for non-tensor values (sequences, maps)
    element_type: Option<TensorElementType>,
    dimensions: Vec<i64>,
}

impl TensorSignature {
    fn from_value_type(name: &str, value_type: &ValueType) -> Self {
        let (element_type, dimensions) = match value_type {
            ValueType::Tensor { ty, dimensions, .. } => (Some(*ty), dimensions.clone()),
            _ => (None, Vec::new()),
        };
        Self {
            name: name.to_string(),
            element_type,
            dimensions,
        }
    }
}

/// The input and outputs a scoring model is driven through.
#[derive(Debug, PartialEq)]
struct ModelSignature {
    input_name: String,
    probability_output: String,
    label_output: Option<String>,
}

impl ModelSignature {
    /// Picks the feature input and the probability/label outputs, checking them against the
    /// vocabulary size.
    ///
    /// The probability output is the first output with a well-known name, else the last one, and
    /// must hold floats. The label output is optional and must hold int64 values.
    fn resolve(
        inputs: &[TensorSignature],
        outputs: &[TensorSignature],
        expected_features: usize,
    ) -> Result<Self, ClassifierError> {
        let input = inputs
            .first()
            .ok_or_else(|| ClassifierError::ModelError("Model must have at least 1 input".into()))?;
        if let Some(&features) = input.dimensions.last() {
            if features > 0 && features as usize != expected_features {
                return Err(ClassifierError::ModelError(format!(
                    "Model expects {} features but the vocabulary has {} terms",
                    features, expected_features
                )));
            }
        }

        let probability = outputs
            .iter()
            .find(|o| PROBABILITY_OUTPUT_NAMES.contains(&o.name.as_str()))
            .or_else(|| outputs.last())
            .ok_or_else(|| ClassifierError::ModelError("Model must have at least 1 output".into()))?;
        if probability.element_type != Some(TensorElementType::Float32) {
            return Err(ClassifierError::ModelError(format!(
                "Probability output '{}' must be a float tensor, found {:?} (export without ZipMap)",
                probability.name, probability.element_type
            )));
        }

        let label_output = outputs
            .iter()
            .find(|o| {
                LABEL_OUTPUT_NAMES.contains(&o.name.as_str())
                    && o.element_type == Some(TensorElementType::Int64)
            })
            .map(|o| o.name.clone());

        Ok(Self {
            input_name: input.name.clone(),
            probability_output: probability.name.clone(),
            label_output,
        })
    }
}

/// Class id from the model's label output, or the arg-max of the probabilities without one.
fn resolve_class_id(label: Option<i64>, probabilities: &[f32]) -> Result<i64, ClassifierError> {
    label
        .or_else(|| argmax(probabilities).map(|i| i as i64))
        .ok_or_else(|| ClassifierError::ScoringFailure("Model produced no prediction".into()))
}

/// Scoring oracle backed by a classifier exported to ONNX.
///
/// The model is expected to:
/// - Accept one float tensor of shape [1, N] where N is the vocabulary size
/// - Output a float tensor of class probabilities, shape [1, C]
/// - Optionally output an int64 tensor with the predicted label, shape [1]
///
/// scikit-learn models exported with skl2onnx match this when ZipMap is disabled. Without a
/// label output the class id is the arg-max of the probabilities.
#[derive(Debug)]
pub struct OnnxOracle {
    model_path: String,
    session: Session,
    input_name: String,
    label_output: Option<String>,
    probability_output: String,
}

impl OnnxOracle {
    /// Loads the model at `path` and checks it against the expected feature count.
    ///
    /// # Errors
    /// - `BuildError` if the model file does not exist
    /// - `ModelError` if ONNX Runtime cannot load the model or its structure does not fit
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        config: &RuntimeConfig,
        expected_features: usize,
    ) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::BuildError(format!("Model file not found: {}", path.display())));
        }

        let session = create_session_builder(config)?
            .commit_from_file(path)
            .map_err(|e| {
                log::error!("Failed to load scoring model {:?}: {}", path, e);
                ClassifierError::ModelError(format!("Failed to load model: {}", e))
            })?;

        let oracle = Self::from_session(session, expected_features, path.display().to_string())?;
        log::info!(
            "Scoring model loaded from {:?} (input '{}', probabilities '{}', label {:?})",
            path,
            oracle.input_name,
            oracle.probability_output,
            oracle.label_output
        );
        Ok(oracle)
    }

    fn from_session(
        session: Session,
        expected_features: usize,
        model_path: String,
    ) -> Result<Self, ClassifierError> {
        let inputs: Vec<TensorSignature> = session
            .inputs
            .iter()
            .map(|i| TensorSignature::from_value_type(&i.name, &i.input_type))
            .collect();
        let outputs: Vec<TensorSignature> = session
            .outputs
            .iter()
            .map(|o| TensorSignature::from_value_type(&o.name, &o.output_type))
            .collect();

        let signature = ModelSignature::resolve(&inputs, &outputs, expected_features)?;

        Ok(Self {
            model_path,
            session,
            input_name: signature.input_name,
            label_output: signature.label_output,
            probability_output: signature.probability_output,
        })
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }
}

impl ScoringOracle for OnnxOracle {
    fn score(&self, features: &FeatureVector) -> Result<Score, ClassifierError> {
        let failure = |what: &str, e: ort::Error| ClassifierError::ScoringFailure(format!("{}: {}", what, e));

        let input_array = features.clone().insert_axis(Axis(0));
        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(input_array).map_err(|e| failure("Failed to create input tensor", e))?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| failure("Failed to run model", e))?;

        let probabilities: Vec<f32> = outputs
            .get(self.probability_output.as_str())
            .ok_or_else(|| {
                ClassifierError::ScoringFailure(format!("Missing output '{}'", self.probability_output))
            })?
            .try_extract_tensor::<f32>()
            .map_err(|e| failure("Failed to extract probabilities", e))?
            .iter()
            .copied()
            .collect();

        let label = match &self.label_output {
            Some(name) => outputs
                .get(name.as_str())
                .ok_or_else(|| ClassifierError::ScoringFailure(format!("Missing output '{}'", name)))?
                .try_extract_tensor::<i64>()
                .map_err(|e| failure("Failed to extract label", e))?
                .iter()
                .next()
                .copied(),
            None => None,
        };
        let class_id = resolve_class_id(label, &probabilities)?;

        Ok(Score {
            class_id,
            probabilities,
        })
    }
}
