use crate::classifier::interface::{ImageTensor, InferenceRuntime, LoadedModel};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How a fake load or predict call goes wrong, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    None,
    Error,
    Panic,
}

#[derive(Debug, Clone)]
pub enum FakeScores {
    Random,
    Fixed(Vec<f32>),
}

/// Stands in for a real model. Scores are random or fixed, and loading or
/// prediction can be made to fail.
pub struct InferenceRuntimeFake {
    logger: Arc<dyn Logger + Send + Sync>,
    scores: FakeScores,
    delay: Duration,
    load_fault: Fault,
    predict_fault: Fault,
    load_count: AtomicUsize,
}

impl InferenceRuntimeFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("fake"),
            scores: FakeScores::Random,
            delay: Duration::from_millis(500),
            load_fault: Fault::None,
            predict_fault: Fault::None,
            load_count: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn with_scores(mut self, scores: Vec<f32>) -> Self {
        self.scores = FakeScores::Fixed(scores);
        self
    }

    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn failing_load(mut self) -> Self {
        self.load_fault = Fault::Error;
        self
    }

    #[allow(dead_code)]
    pub fn panicking_load(mut self) -> Self {
        self.load_fault = Fault::Panic;
        self
    }

    #[allow(dead_code)]
    pub fn failing_predict(mut self) -> Self {
        self.predict_fault = Fault::Error;
        self
    }

    #[allow(dead_code)]
    pub fn panicking_predict(mut self) -> Self {
        self.predict_fault = Fault::Panic;
        self
    }

    #[allow(dead_code)]
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

impl InferenceRuntime for InferenceRuntimeFake {
    fn load(
        &self,
        model_path: &Path,
        num_classes: usize,
    ) -> Result<Arc<dyn LoadedModel + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        self.logger
            .info(&format!("Loading fake model for {}", model_path.display()))?;
        std::thread::sleep(self.delay);

        match self.load_fault {
            Fault::None => {}
            Fault::Error => {
                return Err(format!("Failed to load fake model {}", model_path.display()).into())
            }
            Fault::Panic => panic!("fake model {} blew up while loading", model_path.display()),
        }

        Ok(Arc::new(LoadedModelFake {
            logger: self.logger.clone(),
            scores: self.scores.clone(),
            num_classes,
            delay: self.delay,
            predict_fault: self.predict_fault,
        }))
    }
}

struct LoadedModelFake {
    logger: Arc<dyn Logger + Send + Sync>,
    scores: FakeScores,
    num_classes: usize,
    delay: Duration,
    predict_fault: Fault,
}

impl LoadedModel for LoadedModelFake {
    fn predict(
        &self,
        input: ImageTensor,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Classifying tensor {:?} with fake model...", input.shape()))?;
        std::thread::sleep(self.delay);

        match self.predict_fault {
            Fault::None => {}
            Fault::Error => return Err("Fake inference failed".into()),
            Fault::Panic => panic!("fake inference blew up"),
        }

        match &self.scores {
            FakeScores::Fixed(scores) => Ok(scores.clone()),
            FakeScores::Random => {
                let mut rng = rand::rng();
                let score_dist = Uniform::new(-4.0f32, 4.0f32)?;
                Ok((0..self.num_classes)
                    .map(|_| score_dist.sample(&mut rng))
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use chrono::Offset;

    fn runtime() -> InferenceRuntimeFake {
        InferenceRuntimeFake::new(Arc::new(LoggerConsole::new(chrono::Utc.fix())))
            .with_delay(Duration::ZERO)
    }

    fn input() -> ImageTensor {
        ImageTensor::zeros((1, 4, 4, 3))
    }

    #[test]
    fn test_random_scores_match_class_count() {
        let model = runtime().load(Path::new("fake.onnx"), 12).unwrap();
        assert_eq!(model.predict(input()).unwrap().len(), 12);
    }

    #[test]
    fn test_fixed_scores() {
        let model = runtime()
            .with_scores(vec![1.0, 2.0])
            .load(Path::new("fake.onnx"), 2)
            .unwrap();
        assert_eq!(model.predict(input()).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_failures_and_load_count() {
        let failing = runtime().failing_load();
        assert!(failing.load(Path::new("fake.onnx"), 2).is_err());
        assert_eq!(failing.load_count(), 1);

        let model = runtime()
            .failing_predict()
            .load(Path::new("fake.onnx"), 2)
            .unwrap();
        assert!(model.predict(input()).is_err());
    }
}
