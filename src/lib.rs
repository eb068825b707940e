//! Statewise: an embeddable finite state machine engine
//!
//! A [`TransitionTable`](table::TransitionTable) declares states, events and
//! guarded transitions once; any number of independent
//! [`Machine`](engine::Machine)s run on top of it, each with its own current
//! state and [`ExtendedState`](crate::core::ExtendedState). Everything is
//! synchronous and in-process.
//!
//! # Core Concepts
//!
//! - **States and events**: opaque identifiers via the `StateId` and
//!   `EventKind` traits, usually generated by `state_enum!` / `event_enum!`
//! - **Guards**: pure predicates over extended state and event headers
//! - **Actions**: run on state exit, on the transition, and on state entry
//! - **Listeners**: notified after every committed transition
//! - **Factory**: caches machines by an external key
//!
//! # Example
//!
//! ```rust
//! use statewise::config::MachineConfig;
//! use statewise::core::Event;
//! use statewise::engine::{lock_machine, EventResult, MachineFactory};
//! use statewise::table::{Action, TransitionTable};
//! use statewise::{event_enum, state_enum};
//! use std::sync::Arc;
//!
//! state_enum! {
//!     enum OrderState { Submitted, Paid, Fulfilled, Cancelled }
//! }
//! event_enum! {
//!     enum OrderEvent { Pay, Fulfill, Cancel }
//! }
//!
//! let table = TransitionTable::builder()
//!     .initial(OrderState::Submitted)
//!     .state(OrderState::Paid)
//!     .terminal(OrderState::Fulfilled)
//!     .terminal(OrderState::Cancelled)
//!     .on_entry(
//!         OrderState::Submitted,
//!         Action::infallible(|ctx| {
//!             let order_id = ctx.extended_state().get_or("orderId", -1_i64);
//!             println!("entering Submitted for order {order_id}");
//!         }),
//!     )
//!     .external(OrderState::Submitted, OrderEvent::Pay, OrderState::Paid)
//!     .external(OrderState::Paid, OrderEvent::Fulfill, OrderState::Fulfilled)
//!     .external(OrderState::Submitted, OrderEvent::Cancel, OrderState::Cancelled)
//!     .external(OrderState::Paid, OrderEvent::Cancel, OrderState::Cancelled)
//!     .build()?;
//! let table = Arc::new(table);
//!
//! let factory = MachineFactory::new(MachineConfig::default());
//! let machine = factory.get_machine("132323", &table)?;
//! let mut machine = lock_machine(&machine);
//! machine.extended_state_mut().put_if_absent("orderId", 132323_i64);
//!
//! machine.start()?;
//! assert_eq!(machine.send_event(OrderEvent::Fulfill)?, EventResult::Rejected);
//! assert_eq!(machine.send_event(OrderEvent::Pay)?, EventResult::Accepted);
//!
//! let fulfill = Event::new(OrderEvent::Fulfill).with_header("a", "b");
//! assert_eq!(machine.send_event(fulfill)?, EventResult::Accepted);
//! assert_eq!(machine.current_state(), &OrderState::Fulfilled);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod table;

// Re-export commonly used types
pub use builder::{ConfigError, TableBuilder, TransitionBuilder};
pub use config::MachineConfig;
pub use crate::core::{Event, EventKind, ExtendedState, Guard, Headers, StateId, Value};
pub use engine::{EventResult, Machine, MachineError, MachineFactory, StateChangeListener};
pub use table::{Action, ActionError, StateKind, Transition, TransitionTable};
