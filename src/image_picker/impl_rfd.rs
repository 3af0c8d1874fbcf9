use crate::image_picker::interface::{ImagePicker, UploadedImage};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

pub struct ImagePickerRfd {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImagePickerRfd {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("picker").with_namespace("rfd"),
        }
    }
}

impl ImagePicker for ImagePickerRfd {
    fn pick(&self) -> Result<Option<UploadedImage>, Box<dyn std::error::Error + Send + Sync>> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Choose a photo of a dog")
            .add_filter("Image", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            let _ = self.logger.info("File selection cancelled");
            return Ok(None);
        };

        let bytes = std::fs::read(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let _ = self
            .logger
            .info(&format!("Selected {} ({} bytes)", name, bytes.len()));

        Ok(Some(UploadedImage::new(name, bytes)))
    }
}
