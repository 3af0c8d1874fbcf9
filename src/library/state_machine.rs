use std::fmt;

/// Returned by [`StateMachine::dispatch`] when the transition table has no
/// entry for the current state and the dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmappedTransition<TState, TEvent> {
    pub state: TState,
    pub event: TEvent,
}

impl<TState: fmt::Debug, TEvent: fmt::Debug> fmt::Display for UnmappedTransition<TState, TEvent> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no transition for event {:?} in state {:?}",
            self.event, self.state
        )
    }
}

impl<TState: fmt::Debug, TEvent: fmt::Debug> std::error::Error
    for UnmappedTransition<TState, TEvent>
{
}

/// A table-driven machine holding exactly one current state.
///
/// The transition function is pure; an unmapped `(state, event)` pair is an
/// error and leaves the current state untouched.
#[derive(Debug, Clone)]
pub struct StateMachine<TState, TEvent> {
    state: TState,
    transition_fn: fn(&TState, &TEvent) -> Option<TState>,
}

impl<TState, TEvent> StateMachine<TState, TEvent>
where
    TState: Clone,
{
    pub fn new(initial: TState, transition_fn: fn(&TState, &TEvent) -> Option<TState>) -> Self {
        Self {
            state: initial,
            transition_fn,
        }
    }

    pub fn current_state(&self) -> TState {
        self.state.clone()
    }

    pub fn dispatch(
        &mut self,
        event: TEvent,
    ) -> Result<TState, UnmappedTransition<TState, TEvent>> {
        match (self.transition_fn)(&self.state, &event) {
            Some(next) => {
                self.state = next.clone();
                Ok(next)
            }
            None => Err(UnmappedTransition {
                state: self.state.clone(),
                event,
            }),
        }
    }
}
