use crate::image_picker::interface::{ImagePicker, UploadedImage};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Hands out queued picks in order; an empty queue behaves like a cancelled
/// dialog.
#[derive(Default)]
pub struct ImagePickerFake {
    picks: Mutex<VecDeque<Result<Option<UploadedImage>, String>>>,
}

impl ImagePickerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_image(&self, image: UploadedImage) {
        self.push(Ok(Some(image)));
    }

    pub fn push_cancel(&self) {
        self.push(Ok(None));
    }

    pub fn push_error(&self, message: &str) {
        self.push(Err(message.to_string()));
    }

    fn push(&self, pick: Result<Option<UploadedImage>, String>) {
        if let Ok(mut picks) = self.picks.lock() {
            picks.push_back(pick);
        }
    }
}

impl ImagePicker for ImagePickerFake {
    fn pick(&self) -> Result<Option<UploadedImage>, Box<dyn std::error::Error + Send + Sync>> {
        let next = self
            .picks
            .lock()
            .map_err(|e| e.to_string())?
            .pop_front();

        match next {
            Some(Ok(image)) => Ok(image),
            Some(Err(message)) => Err(message.into()),
            None => Ok(None),
        }
    }
}
