//! Class-name inputs and the default `cx` composition.

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

use crate::props::{ClassName, InteractionState, StateFn};

/// Composition function reducing class inputs to one class string
pub type Compose = Rc<dyn Fn(&[ClassValue]) -> String>;

/// Anything that can contribute classes to a class string.
#[derive(Clone, Default)]
pub enum ClassValue {
    /// Contributes nothing
    #[default]
    Empty,
    Text(String),
    /// Class names included when their flag is true, in insertion order
    Toggles(IndexMap<String, bool>),
    List(Vec<ClassValue>),
    /// Resolved against the interaction state at render time
    Deferred(StateFn<ClassValue>),
}

impl ClassValue {
    pub fn text(s: impl Into<String>) -> Self {
        ClassValue::Text(s.into())
    }

    pub fn toggles<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        ClassValue::Toggles(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&InteractionState) -> ClassValue + 'static,
    {
        ClassValue::Deferred(Rc::new(f))
    }

    /// Whether any part of this value depends on interaction state
    pub fn is_deferred(&self) -> bool {
        match self {
            ClassValue::Deferred(_) => true,
            ClassValue::List(items) => items.iter().any(ClassValue::is_deferred),
            _ => false,
        }
    }

    /// Replace every deferred part by its value for `state`
    pub fn resolve(&self, state: &InteractionState) -> ClassValue {
        match self {
            ClassValue::Deferred(f) => f(state).resolve(state),
            ClassValue::List(items) => {
                ClassValue::List(items.iter().map(|item| item.resolve(state)).collect())
            }
            other => other.clone(),
        }
    }

    /// Append the class fragments of this value to `out`, skipping falsy ones.
    /// Deferred parts are evaluated against `state`.
    pub fn collect_into(&self, state: &InteractionState, out: &mut Vec<String>) {
        match self {
            ClassValue::Empty => {}
            ClassValue::Text(s) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            ClassValue::Toggles(entries) => {
                out.extend(
                    entries
                        .iter()
                        .filter(|(name, on)| **on && !name.trim().is_empty())
                        .map(|(name, _)| name.trim().to_string()),
                );
            }
            ClassValue::List(items) => {
                for item in items {
                    item.collect_into(state, out);
                }
            }
            ClassValue::Deferred(f) => f(state).collect_into(state, out),
        }
    }
}

impl fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassValue::Empty => f.write_str("Empty"),
            ClassValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ClassValue::Toggles(entries) => f.debug_tuple("Toggles").field(entries).finish(),
            ClassValue::List(items) => f.debug_tuple("List").field(items).finish(),
            ClassValue::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for ClassValue {
    fn from(s: &str) -> Self {
        ClassValue::Text(s.to_string())
    }
}

impl From<String> for ClassValue {
    fn from(s: String) -> Self {
        ClassValue::Text(s)
    }
}

impl From<&String> for ClassValue {
    fn from(s: &String) -> Self {
        ClassValue::Text(s.clone())
    }
}

impl<T: Into<ClassValue>> From<Option<T>> for ClassValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ClassValue::Empty, Into::into)
    }
}

impl<T: Into<ClassValue>> From<Vec<T>> for ClassValue {
    fn from(items: Vec<T>) -> Self {
        ClassValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, bool); N]> for ClassValue {
    fn from(entries: [(K, bool); N]) -> Self {
        ClassValue::toggles(entries)
    }
}

impl From<IndexMap<String, bool>> for ClassValue {
    fn from(entries: IndexMap<String, bool>) -> Self {
        ClassValue::Toggles(entries)
    }
}

impl From<ClassName> for ClassValue {
    fn from(class_name: ClassName) -> Self {
        match class_name {
            ClassName::Static(s) => ClassValue::Text(s),
            ClassName::Deferred(f) => {
                ClassValue::Deferred(Rc::new(move |state: &InteractionState| ClassValue::Text(f(state))))
            }
        }
    }
}

impl From<&ClassName> for ClassValue {
    fn from(class_name: &ClassName) -> Self {
        class_name.clone().into()
    }
}

/// Default composition: flattens lists, expands toggles, drops falsy parts
/// and joins with single spaces. Duplicates are kept.
pub fn cx(inputs: &[ClassValue]) -> String {
    let state = InteractionState::default();
    let mut parts = Vec::new();
    for input in inputs {
        input.collect_into(&state, &mut parts);
    }
    parts.join(" ")
}
