use classifier::impl_fake::InferenceRuntimeFake;
use classifier::impl_tract_onnx::InferenceRuntimeTractOnnx;
use classifier::interface::InferenceRuntime;
use config::{Config, RuntimeKind};
use identifier::main::Identifier;
use image_picker::impl_rfd::ImagePickerRfd;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;

mod classifier;
mod config;
mod gui;
mod identifier;
mod image_picker;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let runtime: Arc<dyn InferenceRuntime + Send + Sync> = match config.runtime {
        RuntimeKind::TractOnnx => Arc::new(InferenceRuntimeTractOnnx::new(
            config.inference.clone(),
            logger.clone(),
        )),
        RuntimeKind::Fake => Arc::new(InferenceRuntimeFake::new(logger.clone())),
    };

    let picker = Arc::new(ImagePickerRfd::new(logger.clone()));

    let identifier = Identifier::new(config.clone(), logger.clone(), runtime, picker);

    gui::app::run(config, logger, identifier)?;

    Ok(())
}
