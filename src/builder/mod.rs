//! Builder API for declaring transition tables.
//!
//! This module provides fluent builders and macros for describing states,
//! events and transitions with minimal boilerplate while keeping the
//! declaration validated.

pub mod error;
pub mod macros;
pub mod table;
pub mod transition;

pub use error::ConfigError;
pub use table::TableBuilder;
pub use transition::TransitionBuilder;

use crate::core::{EventKind, ExtendedState, Guard, Headers, StateId};
use crate::table::Transition;

/// Create an unconditional transition without an action.
///
/// # Example
///
/// ```
/// use statewise::builder::simple_transition;
/// use statewise::{event_enum, state_enum};
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
/// event_enum! {
///     enum MyEvent {
///         Finish,
///     }
/// }
///
/// let transition = simple_transition(MyState::Start, MyEvent::Finish, MyState::End);
/// assert!(!transition.is_guarded());
/// ```
pub fn simple_transition<S: StateId, E: EventKind>(source: S, event: E, target: S) -> Transition<S, E> {
    Transition::new(source, event, target)
}

/// Create a transition with a guard predicate.
///
/// # Example
///
/// ```
/// use statewise::builder::guarded_transition;
/// use statewise::{event_enum, state_enum};
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
/// event_enum! {
///     enum MyEvent {
///         Finish,
///     }
/// }
///
/// let transition = guarded_transition(MyState::Start, MyEvent::Finish, MyState::End, |vars, _| {
///     vars.contains_key("ready")
/// });
/// assert!(transition.is_guarded());
/// ```
pub fn guarded_transition<S, E, F>(source: S, event: E, target: S, guard: F) -> Transition<S, E>
where
    S: StateId,
    E: EventKind,
    F: Fn(&ExtendedState, &Headers) -> bool + Send + Sync + 'static,
{
    Transition {
        guard: Some(Guard::new(guard)),
        ..Transition::new(source, event, target)
    }
}
