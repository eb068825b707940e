//! Event envelope sent to a running machine.

use super::state::EventKind;
use super::value::{Headers, Value};

/// An event kind plus the headers that travel with this one dispatch.
///
/// A bare kind converts into an event with empty headers, so
/// `machine.send_event(OrderEvent::Pay)` and
/// `machine.send_event(Event::new(OrderEvent::Pay).with_header("a", "b"))`
/// go through the same code path.
#[derive(Clone, Debug, PartialEq)]
pub struct Event<E: EventKind> {
    pub kind: E,
    pub headers: Headers,
}

impl<E: EventKind> Event<E> {
    pub fn new(kind: E) -> Self {
        Self {
            kind,
            headers: Headers::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }
}

impl<E: EventKind> From<E> for Event<E> {
    fn from(kind: E) -> Self {
        Self::new(kind)
    }
}
