//! The runtime side of the engine.
//!
//! # Key Concepts
//!
//! - **Machine**: one instance of a table, driven by `start`, `send_event`
//!   and `stop`
//! - **Factory**: caches machines by an external key
//! - **Executor**: runs entry, exit and transition actions in order
//! - **Listeners**: observers told about every committed state change
//!
//! Everything here is synchronous: actions and listeners run on the
//! caller's thread before the call returns.

mod error;
mod executor;
mod factory;
mod listener;
mod machine;

pub use error::MachineError;
pub use executor::{ActionExecutor, ActionPhase};
pub use factory::{lock_machine, MachineFactory, SharedMachine};
pub use listener::{ListenerError, ListenerRegistry, StateChangeListener};
pub use machine::{EventResult, Machine};
