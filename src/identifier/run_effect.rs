use crate::classifier::interface::InferenceRuntime;
use crate::classifier::labels::LabelSet;
use crate::classifier::pipeline::Classifier;
use crate::config::Config;
use crate::identifier::effect::{Effect, Msg};
use crate::library::logger::interface::Logger;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    runtime: Arc<dyn InferenceRuntime + Send + Sync>,
    event_sender: Sender<Msg>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        runtime: Arc<dyn InferenceRuntime + Send + Sync>,
        event_sender: Sender<Msg>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            runtime,
            event_sender,
        }
    }

    /// Runs the effect on its own thread; completion arrives as a [`Msg`].
    pub fn spawn(&self, effect: Effect) {
        let self_clone = self.clone();
        std::thread::spawn(move || self_clone.run_effect(effect));
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        let msg = match effect {
            Effect::LoadModel => Msg::ModelLoadDone(catch_panic(|| self.load_classifier())),
            Effect::Classify { classifier, image } => {
                Msg::ClassifyDone(catch_panic(|| classifier.classify(&image.bytes)))
            }
        };

        if let Err(e) = self.event_sender.send(msg) {
            let _ = self
                .logger
                .error(&format!("Session is gone, dropping {}", e.0.to_display_string()));
        }
    }

    fn load_classifier(&self) -> Result<Classifier, Box<dyn std::error::Error + Send + Sync>> {
        let labels = LabelSet::from_file(&self.config.labels_path)?;
        let model = self.runtime.load(&self.config.model_path, labels.len())?;

        Ok(Classifier::new(
            model,
            Arc::new(labels),
            self.config.inference.input_size,
            self.config.top_k,
        ))
    }
}

/// Turns a panic inside the effect into an error so the session still gets a
/// completion message.
fn catch_panic<T>(
    f: impl FnOnce() -> Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(format!("Worker panicked: {}", panic_message(&*payload)).into()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
