//! Core value types of the engine.
//!
//! This module contains the parts with no runtime behavior of their own:
//! - State and event identifiers via the `StateId` and `EventKind` traits
//! - Typed extended state and event headers
//! - Guard predicates for transition control
//! - Immutable history of committed transitions

mod event;
mod guard;
mod history;
mod state;
mod value;

pub use event::Event;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::{EventKind, StateId};
pub use value::{ExtendedState, Headers, Value, ValueTypeError};
