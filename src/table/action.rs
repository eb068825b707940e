//! Actions run on state entry, state exit and transitions.

use crate::core::{EventKind, ExtendedState, Headers, StateId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error raised by an action. Aborts the rest of the dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// What an action sees while it runs.
///
/// `source` is `None` for the initial state's entry action on `start`,
/// and so is `event`.
pub struct ActionContext<'a, S: StateId, E: EventKind> {
    source: Option<&'a S>,
    target: &'a S,
    event: Option<&'a E>,
    headers: &'a Headers,
    extended: &'a mut ExtendedState,
}

impl<'a, S: StateId, E: EventKind> ActionContext<'a, S, E> {
    pub fn new(
        source: Option<&'a S>,
        target: &'a S,
        event: Option<&'a E>,
        headers: &'a Headers,
        extended: &'a mut ExtendedState,
    ) -> Self {
        Self {
            source,
            target,
            event,
            headers,
            extended,
        }
    }

    pub fn source(&self) -> Option<&S> {
        self.source
    }

    pub fn target(&self) -> &S {
        self.target
    }

    pub fn event(&self) -> Option<&E> {
        self.event
    }

    pub fn headers(&self) -> &Headers {
        self.headers
    }

    pub fn extended_state(&self) -> &ExtendedState {
        &*self.extended
    }

    pub fn extended_state_mut(&mut self) -> &mut ExtendedState {
        &mut *self.extended
    }
}

type ActionFn<S, E> =
    Arc<dyn Fn(&mut ActionContext<'_, S, E>) -> Result<(), ActionError> + Send + Sync>;

/// A unit of behavior attached to a state or a transition.
///
/// # Example
///
/// ```rust
/// use statewise::table::{Action, ActionError};
/// use statewise::{event_enum, state_enum};
///
/// state_enum! { enum OrderState { Submitted, Paid } }
/// event_enum! { enum OrderEvent { Pay } }
///
/// let charge: Action<OrderState, OrderEvent> = Action::new(|ctx| {
///     let amount = ctx.extended_state().get_or("amount", 0_i64);
///     if amount <= 0 {
///         return Err(ActionError::new("nothing to charge"));
///     }
///     ctx.extended_state_mut().insert("charged", amount);
///     Ok(())
/// });
/// # let _ = charge;
/// ```
pub struct Action<S: StateId, E: EventKind> {
    run: ActionFn<S, E>,
}

impl<S: StateId, E: EventKind> Action<S, E> {
    /// Create an action that may fail.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut ActionContext<'_, S, E>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self { run: Arc::new(f) }
    }

    /// Create an action that always succeeds.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&mut ActionContext<'_, S, E>) + Send + Sync + 'static,
    {
        Self::new(move |ctx| {
            f(ctx);
            Ok(())
        })
    }

    pub(crate) fn call(&self, ctx: &mut ActionContext<'_, S, E>) -> Result<(), ActionError> {
        (self.run)(ctx)
    }
}

impl<S: StateId, E: EventKind> Clone for Action<S, E> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<S: StateId, E: EventKind> fmt::Debug for Action<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
