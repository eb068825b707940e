//! Identifier traits for states and events.
//!
//! The engine never looks inside a state or event: it only compares,
//! hashes and names them. Both traits are usually derived through the
//! [`state_enum!`](crate::state_enum) and [`event_enum!`](crate::event_enum)
//! macros.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Opaque identifier of a state.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into history records and errors
/// - `Eq` + `Hash`: identifiers key the transition index
/// - `Debug`: identifiers show up in diagnostics
/// - `Serialize` + `Deserialize`: history records are serializable
///
/// # Example
///
/// ```rust
/// use statewise::core::StateId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl StateId for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Complete => "Complete",
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.name(), "Running");
/// ```
pub trait StateId:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Opaque identifier of an event type.
///
/// Same contract as [`StateId`]; kept as a separate trait so a state type
/// cannot be sent to a machine by mistake.
pub trait EventKind:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
