use crate::classifier::interface::ClassificationResult;
use crate::classifier::pipeline::Classifier;
use crate::image_picker::interface::UploadedImage;

#[derive(Clone, Debug)]
pub enum Effect {
    LoadModel,
    Classify {
        classifier: Classifier,
        image: UploadedImage,
    },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::LoadModel => "LoadModel".to_string(),
            Effect::Classify { image, .. } => {
                format!("Classify {{ image: {:?} ({} bytes) }}", image.name, image.bytes.len())
            }
        }
    }
}

/// Completion messages sent back by effects.
#[derive(Debug)]
pub enum Msg {
    ModelLoadDone(Result<Classifier, Box<dyn std::error::Error + Send + Sync>>),
    ClassifyDone(Result<Vec<ClassificationResult>, Box<dyn std::error::Error + Send + Sync>>),
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::ModelLoadDone(Ok(_)) => "ModelLoadDone(Ok)".to_string(),
            Msg::ModelLoadDone(Err(e)) => format!("ModelLoadDone(Err({}))", e),
            Msg::ClassifyDone(Ok(results)) => format!("ClassifyDone(Ok({} results))", results.len()),
            Msg::ClassifyDone(Err(e)) => format!("ClassifyDone(Err({}))", e),
        }
    }
}
