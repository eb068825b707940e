//! State declarations.

use super::action::Action;
use crate::core::{EventKind, StateId};
use serde::{Deserialize, Serialize};

/// Role of a state in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    /// Where `start` puts the machine. Exactly one per table.
    Initial,
    Normal,
    /// Reachable but never left: no transition may originate here.
    Terminal,
}

/// A declared state with its optional entry and exit actions.
#[derive(Debug, Clone)]
pub struct StateDef<S: StateId, E: EventKind> {
    pub id: S,
    pub kind: StateKind,
    pub on_entry: Option<Action<S, E>>,
    pub on_exit: Option<Action<S, E>>,
}

impl<S: StateId, E: EventKind> StateDef<S, E> {
    pub fn new(id: S, kind: StateKind) -> Self {
        Self {
            id,
            kind,
            on_entry: None,
            on_exit: None,
        }
    }

    pub fn initial(id: S) -> Self {
        Self::new(id, StateKind::Initial)
    }

    pub fn normal(id: S) -> Self {
        Self::new(id, StateKind::Normal)
    }

    pub fn terminal(id: S) -> Self {
        Self::new(id, StateKind::Terminal)
    }

    pub fn with_entry(mut self, action: Action<S, E>) -> Self {
        self.on_entry = Some(action);
        self
    }

    pub fn with_exit(mut self, action: Action<S, E>) -> Self {
        self.on_exit = Some(action);
        self
    }

    pub fn is_initial(&self) -> bool {
        self.kind == StateKind::Initial
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == StateKind::Terminal
    }
}
