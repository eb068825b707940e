//! Typed values carried in extended state and event headers.
//!
//! Both maps hold a [`Value`], a closed set of primitive types, instead of
//! arbitrary boxed data. Reads go through `TryFrom<&Value>` so callers get
//! the type they asked for or `None`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A value stored in an [`ExtendedState`] or in event [`Headers`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats; nothing else converts.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// Error returned when a [`Value`] holds a different type than requested.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("expected a {expected} value, found {found:?}")]
pub struct ValueTypeError {
    pub expected: &'static str,
    pub found: Value,
}

macro_rules! value_try_from {
    ($ty:ty, $name:literal, $accessor:ident) => {
        impl TryFrom<&Value> for $ty {
            type Error = ValueTypeError;

            fn try_from(value: &Value) -> Result<Self, Self::Error> {
                value.$accessor().map(Into::into).ok_or_else(|| ValueTypeError {
                    expected: $name,
                    found: value.clone(),
                })
            }
        }
    };
}

value_try_from!(bool, "bool", as_bool);
value_try_from!(i64, "int", as_int);
value_try_from!(f64, "float", as_float);
value_try_from!(String, "string", as_str);

/// Per-machine mutable context, read and written by guards and actions.
///
/// One `ExtendedState` belongs to exactly one machine; it is never shared
/// between instances.
///
/// # Example
///
/// ```rust
/// use statewise::core::ExtendedState;
///
/// let mut vars = ExtendedState::new();
/// vars.put_if_absent("orderId", 132323_i64);
/// vars.put_if_absent("orderId", 1_i64);
///
/// assert_eq!(vars.get_as::<i64>("orderId"), Some(132323));
/// assert_eq!(vars.get_as::<String>("orderId"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedState {
    variables: HashMap<String, Value>,
}

impl ExtendedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    /// Typed read; `None` when the key is missing or holds another type.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: for<'a> TryFrom<&'a Value>,
    {
        self.variables.get(key).and_then(|v| T::try_from(v).ok())
    }

    /// Typed read with a fallback for missing or mistyped entries.
    pub fn get_or<T>(&self, key: &str, default: T) -> T
    where
        T: for<'a> TryFrom<&'a Value>,
    {
        self.get_as(key).unwrap_or(default)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.variables.insert(key.into(), value.into())
    }

    /// Insert only when the key is absent. Returns the value now stored.
    pub fn put_if_absent(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &Value {
        self.variables.entry(key.into()).or_insert_with(|| value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.variables.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.variables.clear();
    }
}

/// Headers attached to a single event dispatch.
///
/// Ordered so that iteration (and therefore logging) is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Headers(BTreeMap<String, Value>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: for<'a> TryFrom<&'a Value>,
    {
        self.0.get(key).and_then(|v| T::try_from(v).ok())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
