use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::tract_ndarray::Array4;

/// NHWC batch of one image, raw channel values in `0.0..=255.0`.
pub type ImageTensor = Array4<f32>;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    pub probability: f32,
}

pub trait LoadedModel {
    /// Runs the model on one image and returns one raw score per label.
    fn predict(&self, input: ImageTensor)
        -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait InferenceRuntime {
    /// Loads the model at `model_path`. `num_classes` is the size of the label
    /// set the model output will be paired with.
    fn load(
        &self,
        model_path: &Path,
        num_classes: usize,
    ) -> Result<Arc<dyn LoadedModel + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>;
}
