//! Transition declarations.

use super::action::Action;
use crate::core::{EventKind, ExtendedState, Guard, Headers, StateId};

/// A rule mapping (source, event) to a target, optionally gated by a
/// guard and paired with an action.
#[derive(Debug, Clone)]
pub struct Transition<S: StateId, E: EventKind> {
    pub source: S,
    pub event: E,
    pub target: S,
    pub guard: Option<Guard>,
    pub action: Option<Action<S, E>>,
}

impl<S: StateId, E: EventKind> Transition<S, E> {
    /// Unguarded transition without an action.
    pub fn new(source: S, event: E, target: S) -> Self {
        Self {
            source,
            event,
            target,
            guard: None,
            action: None,
        }
    }

    /// Check if the guard allows this transition (pure).
    ///
    /// A transition without a guard is always enabled.
    pub fn is_enabled(&self, extended: &ExtendedState, headers: &Headers) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|g| g.check(extended, headers))
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}
