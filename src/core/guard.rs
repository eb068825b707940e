//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions that determine whether a transition
//! is enabled. They see the machine's extended state and the headers of
//! the event being dispatched, and must not have side effects.

use super::value::{ExtendedState, Headers};
use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// Guards are evaluated in declaration order when several transitions share
/// a source state and event; the first one that passes wins.
///
/// # Example
///
/// ```rust
/// use statewise::core::{ExtendedState, Guard, Headers};
///
/// let has_order = Guard::new(|vars: &ExtendedState, _headers: &Headers| {
///     vars.contains_key("orderId")
/// });
///
/// let mut vars = ExtendedState::new();
/// assert!(!has_order.check(&vars, &Headers::new()));
///
/// vars.insert("orderId", 42_i64);
/// assert!(has_order.check(&vars, &Headers::new()));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&ExtendedState, &Headers) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    /// A machine that sees the predicate panic treats the guard as not
    /// satisfied.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&ExtendedState, &Headers) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that only looks at the event headers.
    ///
    /// ```rust
    /// use statewise::core::{ExtendedState, Guard, Headers};
    ///
    /// let express = Guard::on_headers(|h| h.get_as::<bool>("express") == Some(true));
    /// let headers: Headers = [("express", true)].into_iter().collect();
    ///
    /// assert!(express.check(&ExtendedState::new(), &headers));
    /// ```
    pub fn on_headers<F>(predicate: F) -> Self
    where
        F: Fn(&Headers) -> bool + Send + Sync + 'static,
    {
        Self::new(move |_, headers| predicate(headers))
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, extended: &ExtendedState, headers: &Headers) -> bool {
        (self.predicate)(extended, headers)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
