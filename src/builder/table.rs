//! Builder for constructing transition tables.

use crate::builder::error::ConfigError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{EventKind, StateId};
use crate::table::{Action, StateDef, StateKind, Transition, TransitionTable};

/// Builder for declaring states and transitions with a fluent API.
///
/// Entry and exit actions may be attached before or after the state they
/// belong to is declared; they are resolved in [`build`](Self::build).
pub struct TableBuilder<S: StateId, E: EventKind> {
    states: Vec<StateDef<S, E>>,
    entry_actions: Vec<(S, Action<S, E>)>,
    exit_actions: Vec<(S, Action<S, E>)>,
    transitions: Vec<Transition<S, E>>,
}

impl<S: StateId, E: EventKind> TableBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Declare the initial state (exactly one required).
    pub fn initial(self, state: S) -> Self {
        self.add_state(StateDef::new(state, StateKind::Initial))
    }

    /// Declare a normal state.
    pub fn state(self, state: S) -> Self {
        self.add_state(StateDef::new(state, StateKind::Normal))
    }

    /// Declare a terminal state.
    pub fn terminal(self, state: S) -> Self {
        self.add_state(StateDef::new(state, StateKind::Terminal))
    }

    /// Declare several normal states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states
            .extend(states.into_iter().map(StateDef::normal));
        self
    }

    /// Add a fully specified state declaration.
    pub fn add_state(mut self, def: StateDef<S, E>) -> Self {
        self.states.push(def);
        self
    }

    /// Attach an entry action to a declared state.
    pub fn on_entry(mut self, state: S, action: Action<S, E>) -> Self {
        self.entry_actions.push((state, action));
        self
    }

    /// Attach an exit action to a declared state.
    pub fn on_exit(mut self, state: S, action: Action<S, E>) -> Self {
        self.exit_actions.push((state, action));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E>) -> Result<Self, ConfigError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add an unguarded transition without an action.
    pub fn external(mut self, source: S, event: E, target: S) -> Self {
        self.transitions.push(Transition::new(source, event, target));
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, E>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build and validate the table.
    pub fn build(mut self) -> Result<TransitionTable<S, E>, ConfigError> {
        for (state, action) in std::mem::take(&mut self.entry_actions) {
            let def = self.declared(&state, "entry action")?;
            if def.on_entry.is_some() {
                return Err(ConfigError::DuplicateAction {
                    state: state.name().to_string(),
                    phase: "entry",
                });
            }
            def.on_entry = Some(action);
        }
        for (state, action) in std::mem::take(&mut self.exit_actions) {
            let def = self.declared(&state, "exit action")?;
            if def.on_exit.is_some() {
                return Err(ConfigError::DuplicateAction {
                    state: state.name().to_string(),
                    phase: "exit",
                });
            }
            def.on_exit = Some(action);
        }

        TransitionTable::new(self.states, self.transitions)
    }

    fn declared(&mut self, state: &S, referenced_by: &str) -> Result<&mut StateDef<S, E>, ConfigError> {
        self.states
            .iter_mut()
            .find(|def| &def.id == state)
            .ok_or_else(|| ConfigError::UndeclaredState {
                state: state.name().to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }
}

impl<S: StateId, E: EventKind> Default for TableBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
