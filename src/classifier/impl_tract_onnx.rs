use crate::classifier::interface::{ImageTensor, InferenceRuntime, LoadedModel};
use crate::config::InferenceConfig;
use crate::library::logger::interface::Logger;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct InferenceRuntimeTractOnnx {
    config: InferenceConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceRuntimeTractOnnx {
    pub fn new(config: InferenceConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("classifier").with_namespace("tract"),
        }
    }
}

struct LoadedModelTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
}

impl InferenceRuntime for InferenceRuntimeTractOnnx {
    fn load(
        &self,
        model_path: &Path,
        num_classes: usize,
    ) -> Result<Arc<dyn LoadedModel + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
        let _ = self
            .logger
            .info(&format!("Loading model from {}", model_path.display()));

        let size = self.config.input_size as usize;
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .map_err(|e| format!("Failed to read model {}: {}", model_path.display(), e))?
            .with_input_fact(0, f32::fact([1, size, size, 3]).into())?;

        let model = if self.config.optimize {
            model.into_optimized()?
        } else {
            model.into_typed()?
        };
        let model = model.into_runnable()?;

        let output = model.model().output_fact(0)?;
        if let Some(shape) = output.shape.as_concrete() {
            if shape.last() != Some(&num_classes) {
                return Err(format!(
                    "Model output shape {:?} does not match {} labels",
                    shape, num_classes
                )
                .into());
            }
        }

        let _ = self.logger.info("Model loaded");

        Ok(Arc::new(LoadedModelTractOnnx { model }))
    }
}

impl LoadedModel for LoadedModelTractOnnx {
    fn predict(
        &self,
        input: ImageTensor,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let input: Tensor = input.into();
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs[0].to_array_view::<f32>()?;

        Ok(output.iter().copied().collect())
    }
}
