use std::sync::Arc;

/// Raw bytes of a user-selected file. Decoding happens in the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl UploadedImage {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

pub trait ImagePicker {
    /// `Ok(None)` when the user cancels.
    fn pick(&self) -> Result<Option<UploadedImage>, Box<dyn std::error::Error + Send + Sync>>;
}
