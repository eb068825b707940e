//! State change listeners.

use super::executor::panic_message;
use crate::core::StateId;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a listener. Never undoes the transition that was
/// being reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListenerError {
    pub message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Observer of committed state changes.
///
/// `from` is `None` for the notification sent by `start`.
///
/// Closures with the signature of [`on_change`](Self::on_change) are
/// listeners too:
///
/// ```rust
/// use statewise::engine::{ListenerError, ListenerRegistry};
/// use statewise::state_enum;
///
/// state_enum! { enum Light { Red, Green } }
///
/// let mut registry = ListenerRegistry::new();
/// registry.register(|from: Option<&Light>, to: &Light| -> Result<(), ListenerError> {
///     println!("{from:?} -> {to:?}");
///     Ok(())
/// });
/// assert_eq!(registry.len(), 1);
/// ```
pub trait StateChangeListener<S: StateId>: Send + Sync {
    fn on_change(&self, from: Option<&S>, to: &S) -> Result<(), ListenerError>;

    /// Called when the machine is stopped in `state`.
    fn on_stopped(&self, _state: &S) {}
}

impl<S, F> StateChangeListener<S> for F
where
    S: StateId,
    F: Fn(Option<&S>, &S) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_change(&self, from: Option<&S>, to: &S) -> Result<(), ListenerError> {
        self(from, to)
    }
}

/// Ordered list of listeners, notified synchronously in registration order.
pub struct ListenerRegistry<S: StateId> {
    listeners: Vec<Arc<dyn StateChangeListener<S>>>,
}

impl<S: StateId> ListenerRegistry<S> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn register<L>(&mut self, listener: L)
    where
        L: StateChangeListener<S> + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Register a listener that is also held elsewhere.
    pub fn register_shared(&mut self, listener: Arc<dyn StateChangeListener<S>>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call every listener, collecting failures instead of stopping at the
    /// first one. A panicking listener counts as a failure.
    pub fn notify(&self, from: Option<&S>, to: &S) -> Vec<ListenerError> {
        self.listeners
            .iter()
            .filter_map(|listener| {
                match panic::catch_unwind(AssertUnwindSafe(|| listener.on_change(from, to))) {
                    Ok(Ok(())) => None,
                    Ok(Err(err)) => Some(err),
                    Err(payload) => Some(ListenerError::new(format!(
                        "listener panicked: {}",
                        panic_message(payload.as_ref())
                    ))),
                }
            })
            .collect()
    }

    pub fn notify_stopped(&self, state: &S) -> Vec<ListenerError> {
        self.listeners
            .iter()
            .filter_map(|listener| {
                panic::catch_unwind(AssertUnwindSafe(|| listener.on_stopped(state)))
                    .err()
                    .map(|payload| {
                        ListenerError::new(format!(
                            "listener panicked: {}",
                            panic_message(payload.as_ref())
                        ))
                    })
            })
            .collect()
    }
}

impl<S: StateId> Default for ListenerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId> Clone for ListenerRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: StateId> fmt::Debug for ListenerRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
