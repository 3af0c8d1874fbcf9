use crate::classifier::ranking::format_probability;
use crate::config::UiText;
use crate::identifier::core::{AppState, Failure};
use crate::identifier::main::Identifier;

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: String,
    pub percentage: String,
}

/// Everything the window draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub status: String,
    pub button: ButtonView,
    pub show_image: bool,
    pub image_id: u64,
    pub rows: Vec<ResultRow>,
    pub error: Option<String>,
    pub failed: bool,
}

pub fn render(identifier: &Identifier, text: &UiText) -> View {
    let state = identifier.state();
    let metadata = state.metadata();
    let action = state.action();

    let rows = if metadata.show_results {
        identifier
            .results()
            .iter()
            .map(|result| ResultRow {
                label: result.label.clone(),
                percentage: format_probability(result.probability),
            })
            .collect()
    } else {
        vec![]
    };

    View {
        status: status(&state, text).to_string(),
        button: ButtonView {
            label: action.label(text).to_string(),
            enabled: !action.is_busy(),
            busy: action.is_busy(),
        },
        show_image: metadata.show_image && identifier.image().is_some(),
        image_id: identifier.image_id(),
        rows,
        error: identifier.error().map(str::to_string),
        failed: metadata.show_error,
    }
}

fn status<'a>(state: &AppState, text: &'a UiText) -> &'a str {
    match state {
        AppState::Initial => &text.status_initial,
        AppState::LoadingModel => &text.status_loading_model,
        AppState::ModelReady => &text.status_model_ready,
        AppState::ImageReady => &text.status_image_ready,
        AppState::Identifying => &text.status_identifying,
        AppState::Complete => &text.status_complete,
        AppState::Failed(Failure::ModelLoad) => &text.status_failed_model_load,
        AppState::Failed(Failure::Classification) => &text.status_failed_classification,
    }
}
