use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

/// Settings handed to the inference runtime when it is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Side length of the square the image is resized to.
    pub input_size: u32,
    pub optimize: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            input_size: 180,
            optimize: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    TractOnnx,
    Fake,
}

/// Every user-visible string. Kept out of the state machine and pipeline so it
/// can be swapped for another language.
#[derive(Debug, Clone, PartialEq)]
pub struct UiText {
    pub load_model: String,
    pub loading_model: String,
    pub upload_image: String,
    pub identify: String,
    pub identifying: String,
    pub reset: String,
    pub retry: String,
    pub status_initial: String,
    pub status_loading_model: String,
    pub status_model_ready: String,
    pub status_image_ready: String,
    pub status_identifying: String,
    pub status_complete: String,
    pub status_failed_model_load: String,
    pub status_failed_classification: String,
}

impl Default for UiText {
    fn default() -> Self {
        Self {
            load_model: "Load Model".to_string(),
            loading_model: "Loading Model...".to_string(),
            upload_image: "Upload Image".to_string(),
            identify: "Identify Breed".to_string(),
            identifying: "Identifying...".to_string(),
            reset: "Reset".to_string(),
            retry: "Try Again".to_string(),
            status_initial: "Load the model to get started".to_string(),
            status_loading_model: "Loading the model...".to_string(),
            status_model_ready: "Upload a photo of a dog".to_string(),
            status_image_ready: "Ready to identify".to_string(),
            status_identifying: "Identifying breed...".to_string(),
            status_complete: "Top predictions".to_string(),
            status_failed_model_load: "The model could not be loaded".to_string(),
            status_failed_classification: "The image could not be classified".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub inference: InferenceConfig,
    pub top_k: usize,
    pub runtime: RuntimeKind,
    pub poll_rate: Duration,
    pub logger_timezone: chrono::FixedOffset,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub dark_mode: bool,
    pub ui_text: UiText,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/model.onnx"),
            labels_path: PathBuf::from("model/labels.txt"),
            inference: InferenceConfig::default(),
            top_k: 5,
            runtime: RuntimeKind::TractOnnx,
            poll_rate: Duration::from_millis(100),
            logger_timezone: utc(),
            window_title: "Dog Breed Identifier".to_string(),
            window_size: [480.0, 680.0],
            dark_mode: true,
            ui_text: UiText::default(),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
