use crate::classifier::interface::{ClassificationResult, LoadedModel};
use crate::classifier::labels::LabelSet;
use crate::classifier::preprocess::image_bytes_to_tensor;
use crate::classifier::ranking::{clean_label, rank, softmax};
use std::fmt;
use std::sync::Arc;

/// A loaded model paired with the labels its output is indexed by.
#[derive(Clone)]
pub struct Classifier {
    model: Arc<dyn LoadedModel + Send + Sync>,
    labels: Arc<LabelSet>,
    input_size: u32,
    top_k: usize,
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("labels", &self.labels.len())
            .field("input_size", &self.input_size)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl Classifier {
    pub fn new(
        model: Arc<dyn LoadedModel + Send + Sync>,
        labels: Arc<LabelSet>,
        input_size: u32,
        top_k: usize,
    ) -> Self {
        Self {
            model,
            labels,
            input_size,
            top_k,
        }
    }

    pub fn classify(
        &self,
        image: &[u8],
    ) -> Result<Vec<ClassificationResult>, Box<dyn std::error::Error + Send + Sync>> {
        let input = image_bytes_to_tensor(image, self.input_size)
            .map_err(|e| format!("Failed to decode image: {}", e))?;

        let scores = self.model.predict(input)?;

        if scores.len() != self.labels.len() {
            return Err(format!(
                "Model produced {} scores but there are {} labels",
                scores.len(),
                self.labels.len()
            )
            .into());
        }

        if let Some(idx) = scores.iter().position(|score| !score.is_finite()) {
            return Err(format!(
                "Model produced a non-finite score {} for label {}",
                scores[idx],
                self.labels.as_slice()[idx]
            )
            .into());
        }

        let probabilities = softmax(&scores);

        let results = rank(&probabilities, self.labels.as_slice(), self.top_k)
            .into_iter()
            .map(|result| ClassificationResult {
                label: clean_label(&result.label),
                probability: result.probability,
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::interface::ImageTensor;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;
    use std::sync::Mutex;

    struct ModelStub {
        scores: Vec<f32>,
        last_shape: Mutex<Option<Vec<usize>>>,
    }

    impl LoadedModel for ModelStub {
        fn predict(
            &self,
            input: ImageTensor,
        ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
            *self.last_shape.lock().unwrap() = Some(input.shape().to_vec());
            Ok(self.scores.clone())
        }
    }

    fn png() -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(64, 48, Rgb([90, 60, 30])));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn breeds() -> Arc<LabelSet> {
        Arc::new(
            LabelSet::from_text(
                "000-affenpinscher\n001-afghan_hound\n002-basset\n003-beagle\n004-golden_retriever\n005-pug\n006-whippet",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_classify_ranks_and_cleans() {
        let model = Arc::new(ModelStub {
            scores: vec![0.0, 1.0, 0.5, 3.0, 4.0, -1.0, 2.0],
            last_shape: Mutex::new(None),
        });
        let classifier = Classifier::new(model.clone(), breeds(), 180, 5);

        let results = classifier.classify(&png()).unwrap();

        let order: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            order,
            vec!["Golden retriever", "Beagle", "Whippet", "Afghan hound", "Basset"]
        );
        assert_eq!(
            *model.last_shape.lock().unwrap(),
            Some(vec![1, 180, 180, 3])
        );
    }

    #[test]
    fn test_score_count_mismatch_is_an_error() {
        let model = Arc::new(ModelStub {
            scores: vec![1.0, 2.0],
            last_shape: Mutex::new(None),
        });
        let classifier = Classifier::new(model, breeds(), 180, 5);

        let err = classifier.classify(&png()).unwrap_err();

        assert!(err.to_string().contains("2 scores"));
    }

    #[test]
    fn test_non_finite_scores_are_an_error() {
        for bad in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let model = Arc::new(ModelStub {
                scores: vec![0.0, 1.0, bad, 3.0, 4.0, -1.0, 2.0],
                last_shape: Mutex::new(None),
            });
            let classifier = Classifier::new(model, breeds(), 180, 5);

            let err = classifier.classify(&png()).unwrap_err();

            assert!(err.to_string().contains("non-finite"));
            assert!(err.to_string().contains("002-basset"));
        }
    }

    #[test]
    fn test_undecodable_image_is_an_error() {
        let model = Arc::new(ModelStub {
            scores: vec![0.0; 7],
            last_shape: Mutex::new(None),
        });
        let classifier = Classifier::new(model.clone(), breeds(), 180, 5);

        assert!(classifier.classify(b"GIF89a but not really").is_err());
        assert!(model.last_shape.lock().unwrap().is_none());
    }
}
