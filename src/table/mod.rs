//! Immutable, validated transition table.
//!
//! A [`TransitionTable`] is built once, checked, and then shared read-only
//! (behind an `Arc`) by every machine created from it.

mod action;
mod state;
mod transition;

pub use action::{Action, ActionContext, ActionError};
pub use state::{StateDef, StateKind};
pub use transition::Transition;

use crate::builder::{ConfigError, TableBuilder};
use crate::core::{EventKind, StateId};
use std::collections::HashMap;

/// States, transitions and the lookup index over them.
#[derive(Debug)]
pub struct TransitionTable<S: StateId, E: EventKind> {
    initial: usize,
    states: Vec<StateDef<S, E>>,
    by_id: HashMap<S, usize>,
    transitions: Vec<Transition<S, E>>,
    index: HashMap<S, HashMap<E, Vec<usize>>>,
}

impl<S: StateId, E: EventKind> TransitionTable<S, E> {
    /// Start a fluent table declaration.
    pub fn builder() -> TableBuilder<S, E> {
        TableBuilder::new()
    }

    /// Validate `states` and `transitions` and index them.
    ///
    /// Fails when there is not exactly one initial state, when a state is
    /// declared twice, when a transition references an undeclared state,
    /// or when a transition leaves a terminal state. Declaration order is
    /// kept for both lists.
    pub fn new(
        states: Vec<StateDef<S, E>>,
        transitions: Vec<Transition<S, E>>,
    ) -> Result<Self, ConfigError> {
        let mut by_id = HashMap::with_capacity(states.len());
        let mut initial: Option<usize> = None;

        for (i, def) in states.iter().enumerate() {
            if by_id.insert(def.id.clone(), i).is_some() {
                return Err(ConfigError::DuplicateState {
                    state: def.id.name().to_string(),
                });
            }
            if def.is_initial() {
                if let Some(first) = initial {
                    return Err(ConfigError::MultipleInitialStates {
                        first: states[first].id.name().to_string(),
                        second: def.id.name().to_string(),
                    });
                }
                initial = Some(i);
            }
        }
        let initial = initial.ok_or(ConfigError::MissingInitialState)?;

        let mut index: HashMap<S, HashMap<E, Vec<usize>>> = HashMap::new();
        for (i, t) in transitions.iter().enumerate() {
            let referenced_by = || {
                format!(
                    "transition {} --{}--> {}",
                    t.source.name(),
                    t.event.name(),
                    t.target.name()
                )
            };
            let source = *by_id
                .get(&t.source)
                .ok_or_else(|| ConfigError::UndeclaredState {
                    state: t.source.name().to_string(),
                    referenced_by: referenced_by(),
                })?;
            if !by_id.contains_key(&t.target) {
                return Err(ConfigError::UndeclaredState {
                    state: t.target.name().to_string(),
                    referenced_by: referenced_by(),
                });
            }
            if states[source].is_terminal() {
                return Err(ConfigError::TransitionFromTerminal {
                    state: t.source.name().to_string(),
                    event: t.event.name().to_string(),
                });
            }

            let slot = index
                .entry(t.source.clone())
                .or_default()
                .entry(t.event.clone())
                .or_default();
            if slot.iter().any(|&j| !transitions[j].is_guarded()) {
                tracing::warn!(
                    source = t.source.name(),
                    event = t.event.name(),
                    target = t.target.name(),
                    "transition follows an unguarded one on the same source and event and can never fire"
                );
            }
            slot.push(i);
        }

        tracing::debug!(
            initial = states[initial].id.name(),
            states = states.len(),
            transitions = transitions.len(),
            "transition table built"
        );

        Ok(Self {
            initial,
            states,
            by_id,
            transitions,
            index,
        })
    }

    pub fn initial(&self) -> &S {
        &self.states[self.initial].id
    }

    pub fn initial_state(&self) -> &StateDef<S, E> {
        &self.states[self.initial]
    }

    pub fn state(&self, id: &S) -> Option<&StateDef<S, E>> {
        self.by_id.get(id).map(|&i| &self.states[i])
    }

    pub fn states(&self) -> &[StateDef<S, E>] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition<S, E>] {
        &self.transitions
    }

    pub fn is_terminal(&self, id: &S) -> bool {
        self.state(id).is_some_and(StateDef::is_terminal)
    }

    /// Transitions leaving `state` on `event`, in declaration order.
    pub fn transitions_for(&self, state: &S, event: &E) -> impl Iterator<Item = &Transition<S, E>> + '_ {
        self.index
            .get(state)
            .and_then(|by_event| by_event.get(event))
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.transitions[i])
    }

    /// Distinct events with at least one transition out of `state`, in
    /// declaration order.
    pub fn events_from(&self, state: &S) -> Vec<&E> {
        let mut events: Vec<&E> = Vec::new();
        for t in self.transitions.iter().filter(|t| &t.source == state) {
            if !events.contains(&&t.event) {
                events.push(&t.event);
            }
        }
        events
    }
}
