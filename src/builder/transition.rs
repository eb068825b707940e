//! Builder for constructing transitions.

use crate::builder::error::ConfigError;
use crate::core::{EventKind, ExtendedState, Guard, Headers, StateId};
use crate::table::{Action, ActionContext, ActionError, Transition};

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: StateId, E: EventKind> {
    source: Option<S>,
    target: Option<S>,
    event: Option<E>,
    guard: Option<Guard>,
    action: Option<Action<S, E>>,
}

impl<S: StateId, E: EventKind> TransitionBuilder<S, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            source: None,
            target: None,
            event: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.source = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ExtendedState, &Headers) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the transition action (optional).
    pub fn action(mut self, action: Action<S, E>) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the transition action from a closure (optional).
    pub fn perform<F>(self, f: F) -> Self
    where
        F: Fn(&mut ActionContext<'_, S, E>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action(Action::new(f))
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, E>, ConfigError> {
        let source = self.source.ok_or(ConfigError::MissingSource)?;
        let target = self.target.ok_or(ConfigError::MissingTarget)?;
        let event = self.event.ok_or(ConfigError::MissingEvent)?;

        Ok(Transition {
            source,
            event,
            target,
            guard: self.guard,
            action: self.action,
        })
    }
}

impl<S: StateId, E: EventKind> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
