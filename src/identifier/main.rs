use crate::classifier::interface::{ClassificationResult, InferenceRuntime};
use crate::classifier::pipeline::Classifier;
use crate::config::Config;
use crate::identifier::core::{Action, AppMachine, AppState, Failure};
use crate::identifier::effect::{Effect, Msg};
use crate::identifier::run_effect::RunEffect;
use crate::image_picker::interface::{ImagePicker, UploadedImage};
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// One user session: the machine plus everything its actions touch.
pub struct Identifier {
    machine: AppMachine,
    classifier: Option<Classifier>,
    image: Option<UploadedImage>,
    image_id: u64,
    results: Vec<ClassificationResult>,
    error: Option<String>,
    logger: Arc<dyn Logger + Send + Sync>,
    picker: Arc<dyn ImagePicker + Send + Sync>,
    run_effect: RunEffect,
    event_receiver: Receiver<Msg>,
}

impl Identifier {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        runtime: Arc<dyn InferenceRuntime + Send + Sync>,
        picker: Arc<dyn ImagePicker + Send + Sync>,
    ) -> Self {
        let logger = logger.with_namespace("identifier");
        let (event_sender, event_receiver) = channel();
        let run_effect = RunEffect::new(config, logger.clone(), runtime, event_sender);

        Self {
            machine: AppMachine::start(),
            classifier: None,
            image: None,
            image_id: 0,
            results: vec![],
            error: None,
            logger,
            picker,
            run_effect,
            event_receiver,
        }
    }

    pub fn state(&self) -> AppState {
        self.machine.current_state()
    }

    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    /// Changes every time a new image is selected.
    pub fn image_id(&self) -> u64 {
        self.image_id
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[allow(dead_code)]
    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    /// Performs whatever the primary control does in the current state.
    pub fn press(&mut self) {
        match self.state().action() {
            Action::LoadModel => self.load_model(),
            Action::Upload => self.upload(),
            Action::Identify => self.identify(),
            Action::Reset => self.reset(),
            Action::Retry => self.retry(),
            Action::LoadingModel | Action::Identifying => {}
        }
    }

    pub fn select_image(&mut self, image: UploadedImage) {
        if self.state() != AppState::ModelReady {
            let _ = self.logger.warn(&format!(
                "Ignoring image {} selected in state {:?}",
                image.name,
                self.state()
            ));
            return;
        }

        self.image = Some(image);
        self.image_id += 1;
        self.error = None;
        self.advance();
    }

    /// Handles every completion message that has already arrived.
    pub fn update(&mut self) {
        while let Ok(msg) = self.event_receiver.try_recv() {
            self.handle(msg);
        }
    }

    /// Waits up to `timeout` for one completion message. Returns whether one
    /// was handled.
    #[allow(dead_code)]
    pub fn process_next_message(&mut self, timeout: Duration) -> bool {
        match self.event_receiver.recv_timeout(timeout) {
            Ok(msg) => {
                self.handle(msg);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn load_model(&mut self) {
        self.error = None;
        self.advance();
        self.run_effect.spawn(Effect::LoadModel);
    }

    fn upload(&mut self) {
        match self.picker.pick() {
            Ok(Some(image)) => self.select_image(image),
            Ok(None) => {}
            Err(e) => {
                let message = format!("Failed to open image: {}", e);
                let _ = self.logger.error(&message);
                self.error = Some(message);
            }
        }
    }

    fn identify(&mut self) {
        let (Some(classifier), Some(image)) = (self.classifier.clone(), self.image.clone()) else {
            let _ = self
                .logger
                .error("Identify requested without a loaded model and an image");
            return;
        };

        self.advance();
        self.run_effect
            .spawn(Effect::Classify { classifier, image });
    }

    fn reset(&mut self) {
        self.results.clear();
        self.image = None;
        self.advance();
    }

    fn retry(&mut self) {
        match self.state() {
            AppState::Failed(Failure::ModelLoad) => self.load_model(),
            _ => {
                self.results.clear();
                self.image = None;
                self.error = None;
                self.advance();
            }
        }
    }

    pub(super) fn handle(&mut self, msg: Msg) {
        let _ = self
            .logger
            .info(&format!("Processing msg: {}", msg.to_display_string()));

        let expected = match msg {
            Msg::ModelLoadDone(_) => AppState::LoadingModel,
            Msg::ClassifyDone(_) => AppState::Identifying,
        };
        if self.state() != expected {
            let _ = self.logger.warn(&format!(
                "Dropping {} received in state {:?}",
                msg.to_display_string(),
                self.state()
            ));
            return;
        }

        match msg {
            Msg::ModelLoadDone(Ok(classifier)) => {
                self.classifier = Some(classifier);
                self.advance();
            }
            Msg::ClassifyDone(Ok(results)) => {
                self.results = results;
                self.advance();
            }
            Msg::ModelLoadDone(Err(e)) | Msg::ClassifyDone(Err(e)) => {
                let _ = self.logger.error(&e.to_string());
                self.error = Some(e.to_string());
                self.fail();
            }
        }
    }

    fn advance(&mut self) {
        let old = self.state();
        let new = self.machine.advance();
        let _ = self.logger.info(&format!("{:?} -> {:?}", old, new));
    }

    fn fail(&mut self) {
        let old = self.state();
        match self.machine.fail() {
            Ok(new) => {
                let _ = self.logger.info(&format!("{:?} -> {:?}", old, new));
            }
            Err(unmapped) => {
                let _ = self.logger.error(&unmapped.to_string());
            }
        }
    }
}
