// pre-trained image classifier backed by an onnx model (resnet-50 style)

use crate::Error;
use std::path::Path;
use tract_onnx::prelude::*;

pub const INPUT_SIZE: u32 = 224;

/// Preprocessed image, NCHW with a batch of one.
#[derive(Debug, Clone)]
pub struct InputTensor {
    pub data: Vec<f32>,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

/// Image tensor in, one raw score per class out.
pub trait Classifier: Send + Sync {
    fn scores(&self, input: &InputTensor) -> Result<Vec<f32>, Error>;

    /// Class names, indexed like the scores.
    fn labels(&self) -> &[String];
}

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

pub struct OnnxClassifier {
    model: Plan,
    labels: Vec<String>,
}

impl OnnxClassifier {
    pub fn load(model_path: &Path, labels_path: &Path) -> Result<Self, Error> {
        let labels = load_labels(labels_path)?;
        let size = INPUT_SIZE as usize;

        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|m| m.with_input_fact(0, f32::fact([1, 3, size, size]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| Error::Model(format!("{}: {e}", model_path.display())))?;

        tracing::info!(
            model = %model_path.display(),
            classes = labels.len(),
            "classifier loaded"
        );

        Ok(Self { model, labels })
    }
}

impl Classifier for OnnxClassifier {
    fn scores(&self, input: &InputTensor) -> Result<Vec<f32>, Error> {
        let shape = (1, input.channels, input.height, input.width);
        let tensor: Tensor = tract_ndarray::Array4::from_shape_vec(shape, input.data.clone())
            .map_err(|e| Error::Model(e.to_string()))?
            .into();

        let outputs = self
            .model
            .run(tvec!(tensor.into()))
            .map_err(|e| Error::Model(e.to_string()))?;

        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| Error::Model(e.to_string()))?
            .iter()
            .copied()
            .collect();
        Ok(scores)
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

// one class name per line, in model output order
fn load_labels(path: &Path) -> Result<Vec<String>, Error> {
    parse_labels(&std::fs::read_to_string(path)?)
        .map_err(|e| Error::Model(format!("{}: {e}", path.display())))
}

// line n is class n, so only trailing blank lines may be dropped
fn parse_labels(text: &str) -> Result<Vec<String>, String> {
    let mut labels: Vec<String> = text.lines().map(|l| l.trim().to_string()).collect();
    while labels.last().is_some_and(|l| l.is_empty()) {
        labels.pop();
    }

    if labels.is_empty() {
        return Err("no labels".to_string());
    }
    if let Some(at) = labels.iter().position(|l| l.is_empty()) {
        return Err(format!("blank label on line {}", at + 1));
    }
    Ok(labels)
}
