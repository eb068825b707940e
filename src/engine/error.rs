//! Runtime errors raised by a machine.

use super::executor::ActionPhase;
use crate::table::ActionError;
use thiserror::Error;

/// Errors returned by `start`, `send_event` and `stop`.
///
/// An event that matches no enabled transition is not an error; see
/// [`EventResult::Rejected`](super::EventResult::Rejected).
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Machine '{machine}' is already running")]
    AlreadyStarted { machine: String },

    #[error("Machine '{machine}' is not running")]
    NotRunning { machine: String },

    /// An action failed mid-dispatch. Steps completed before it are not
    /// rolled back; `state` is where the machine was left.
    ///
    /// For the `Exit` and `Transition` phases that is the source state. For
    /// `Entry` it is the target: the state change has happened, but it is
    /// missing from the history and listeners were not told about it.
    #[error("{phase} action failed on machine '{machine}' (left in state '{state}'): {source}")]
    ActionFailed {
        machine: String,
        phase: ActionPhase,
        state: String,
        #[source]
        source: ActionError,
    },
}
