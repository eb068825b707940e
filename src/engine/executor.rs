//! Runs entry, exit and transition actions one at a time.

use crate::core::{EventKind, ExtendedState, Headers, StateId};
use crate::table::{Action, ActionContext, ActionError, Transition};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Which slot of the dispatch sequence an action occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    Exit,
    Transition,
    Entry,
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exit => "exit",
            Self::Transition => "transition",
            Self::Entry => "entry",
        })
    }
}

/// Invokes actions, turning a panicking action into an [`ActionError`] so
/// that one bad action cannot unwind through the machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionExecutor;

impl ActionExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run `action` if there is one. A missing action succeeds.
    pub fn execute<S: StateId, E: EventKind>(
        &self,
        phase: ActionPhase,
        action: Option<&Action<S, E>>,
        ctx: &mut ActionContext<'_, S, E>,
    ) -> Result<(), ActionError> {
        let Some(action) = action else {
            return Ok(());
        };

        tracing::trace!(%phase, target = ctx.target().name(), "running action");
        match panic::catch_unwind(AssertUnwindSafe(|| action.call(ctx))) {
            Ok(result) => result,
            Err(payload) => Err(ActionError::new(format!(
                "action panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }

    /// Evaluate the guard of `transition`. A guard that panics counts as
    /// not satisfied, so dispatch moves on to the next candidate.
    pub fn allows<S: StateId, E: EventKind>(
        &self,
        transition: &Transition<S, E>,
        extended: &ExtendedState,
        headers: &Headers,
    ) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(|| transition.is_enabled(extended, headers))) {
            Ok(enabled) => enabled,
            Err(payload) => {
                tracing::warn!(
                    source = transition.source.name(),
                    event = transition.event.name(),
                    target = transition.target.name(),
                    panic = %panic_message(payload.as_ref()),
                    "guard panicked; treating it as not satisfied"
                );
                false
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
