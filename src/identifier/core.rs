use crate::config::UiText;
use crate::library::state_machine::{StateMachine, UnmappedTransition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    ModelLoad,
    Classification,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    Initial,
    LoadingModel,
    ModelReady,
    ImageReady,
    Identifying,
    Complete,
    Failed(Failure),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Advance,
    /// The pending load or classification reported an error.
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateMetadata {
    pub show_image: bool,
    pub show_results: bool,
    pub show_error: bool,
}

/// What the primary button does in a given state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    LoadModel,
    LoadingModel,
    Upload,
    Identify,
    Identifying,
    Reset,
    Retry,
}

#[allow(dead_code)]
pub const ALL_STATES: [AppState; 8] = [
    AppState::Initial,
    AppState::LoadingModel,
    AppState::ModelReady,
    AppState::ImageReady,
    AppState::Identifying,
    AppState::Complete,
    AppState::Failed(Failure::ModelLoad),
    AppState::Failed(Failure::Classification),
];

pub fn init() -> AppState {
    AppState::Initial
}

pub fn transition(state: &AppState, event: &Event) -> Option<AppState> {
    match (state, event) {
        (AppState::Initial, Event::Advance) => Some(AppState::LoadingModel),
        (AppState::LoadingModel, Event::Advance) => Some(AppState::ModelReady),
        (AppState::ModelReady, Event::Advance) => Some(AppState::ImageReady),
        (AppState::ImageReady, Event::Advance) => Some(AppState::Identifying),
        (AppState::Identifying, Event::Advance) => Some(AppState::Complete),
        (AppState::Complete, Event::Advance) => Some(AppState::ModelReady),
        (AppState::Failed(Failure::ModelLoad), Event::Advance) => Some(AppState::LoadingModel),
        (AppState::Failed(Failure::Classification), Event::Advance) => {
            Some(AppState::ModelReady)
        }

        (AppState::LoadingModel, Event::Fail) => Some(AppState::Failed(Failure::ModelLoad)),
        (AppState::Identifying, Event::Fail) => Some(AppState::Failed(Failure::Classification)),

        (_, Event::Fail) => None,
    }
}

impl AppState {
    pub fn metadata(&self) -> StateMetadata {
        StateMetadata {
            show_image: matches!(self, AppState::ImageReady | AppState::Complete),
            show_results: matches!(self, AppState::Complete),
            show_error: matches!(self, AppState::Failed(_)),
        }
    }

    pub fn action(&self) -> Action {
        match self {
            AppState::Initial => Action::LoadModel,
            AppState::LoadingModel => Action::LoadingModel,
            AppState::ModelReady => Action::Upload,
            AppState::ImageReady => Action::Identify,
            AppState::Identifying => Action::Identifying,
            AppState::Complete => Action::Reset,
            AppState::Failed(_) => Action::Retry,
        }
    }
}

impl Action {
    pub fn is_busy(&self) -> bool {
        matches!(self, Action::LoadingModel | Action::Identifying)
    }

    pub fn label<'a>(&self, text: &'a UiText) -> &'a str {
        match self {
            Action::LoadModel => &text.load_model,
            Action::LoadingModel => &text.loading_model,
            Action::Upload => &text.upload_image,
            Action::Identify => &text.identify,
            Action::Identifying => &text.identifying,
            Action::Reset => &text.reset,
            Action::Retry => &text.retry,
        }
    }
}

pub type AppMachine = StateMachine<AppState, Event>;

impl StateMachine<AppState, Event> {
    pub fn start() -> Self {
        StateMachine::new(init(), transition)
    }

    pub fn advance(&mut self) -> AppState {
        // Advance is mapped from every state
        match self.dispatch(Event::Advance) {
            Ok(next) => next,
            Err(unmapped) => unmapped.state,
        }
    }

    pub fn fail(&mut self) -> Result<AppState, UnmappedTransition<AppState, Event>> {
        self.dispatch(Event::Fail)
    }
}
