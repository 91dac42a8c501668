use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

use crate::component::Node;
use crate::errors::{Result, StyledError};

/// Property key carrying the class name in serialized prop maps
pub const CLASS_NAME_KEY: &str = "className";

/// Property key carrying child content in serialized prop maps
pub const CHILDREN_KEY: &str = "children";

/// Property key carrying inline style
pub const STYLE_KEY: &str = "style";

/// Interaction state supplied by the host framework (pressable, hoverable...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionState {
    pub pressed: bool,
    pub hovered: bool,
    pub focused: bool,
    pub disabled: bool,
}

impl InteractionState {
    /// Build a state from flag names such as `["pressed", "focused"]`
    pub fn from_flags<I, S>(flags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::default();
        for flag in flags {
            let flag = flag.as_ref().trim();
            match flag {
                "" => {}
                "pressed" => state.pressed = true,
                "hovered" => state.hovered = true,
                "focused" => state.focused = true,
                "disabled" => state.disabled = true,
                other => {
                    return Err(StyledError::InvalidInput(format!(
                        "Unknown interaction flag '{}'. Use pressed, hovered, focused or disabled",
                        other
                    )))
                }
            }
        }
        Ok(state)
    }

    /// Look up a flag by name, `None` when the name is not a known flag
    pub fn is_active(&self, flag: &str) -> Option<bool> {
        match flag {
            "pressed" => Some(self.pressed),
            "hovered" => Some(self.hovered),
            "focused" => Some(self.focused),
            "disabled" => Some(self.disabled),
            _ => None,
        }
    }
}

/// A function of interaction state, re-evaluated whenever the state changes
pub type StateFn<T> = Rc<dyn Fn(&InteractionState) -> T>;

/// Class name as passed to or produced for a component
#[derive(Clone)]
pub enum ClassName {
    Static(String),
    Deferred(StateFn<String>),
}

impl ClassName {
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&InteractionState) -> String + 'static,
    {
        ClassName::Deferred(Rc::new(f))
    }

    /// The class string for a given interaction state
    pub fn resolve(&self, state: &InteractionState) -> String {
        match self {
            ClassName::Static(s) => s.clone(),
            ClassName::Deferred(f) => f(state),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, ClassName::Deferred(_))
    }

    pub fn as_static(&self) -> Option<&str> {
        match self {
            ClassName::Static(s) => Some(s),
            ClassName::Deferred(_) => None,
        }
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassName::Static(s) => f.debug_tuple("Static").field(s).finish(),
            ClassName::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> Self {
        ClassName::Static(s.to_string())
    }
}

impl From<String> for ClassName {
    fn from(s: String) -> Self {
        ClassName::Static(s)
    }
}

/// Opaque reference handle forwarded untouched to the base component
#[derive(Debug, Clone)]
pub struct NodeRef(Rc<str>);

impl NodeRef {
    pub fn new(label: impl Into<String>) -> Self {
        Self(Rc::from(label.into()))
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    /// Identity comparison, two refs with the same label are still distinct
    pub fn same(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Property bag handed to a component on every render.
///
/// `className` and `children` live in typed slots, every other property is a
/// JSON value kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Props {
    class_name: Option<ClassName>,
    children: Option<Node>,
    values: IndexMap<String, Value>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        class_name: Option<ClassName>,
        children: Option<Node>,
        values: IndexMap<String, Value>,
    ) -> Self {
        Self {
            class_name,
            children,
            values,
        }
    }

    /// Build props from a JSON object, routing `className` and `children`
    /// into their typed slots
    pub fn from_json_map(map: IndexMap<String, Value>) -> Self {
        let mut props = Self::new();
        for (key, value) in map {
            props = props.with(key, value);
        }
        props
    }

    /// Set a property.
    ///
    /// `children` always goes to the children slot and `null` clears it.
    /// `className` must be a string; `null` clears it and any other value is
    /// dropped. Neither key ever lands among the plain values.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == CLASS_NAME_KEY {
            self.class_name = match value {
                Value::String(s) => Some(ClassName::Static(s)),
                Value::Null => None,
                other => {
                    warn!("ignoring non-string className {}", other);
                    None
                }
            };
        } else if key == CHILDREN_KEY {
            self.children = match value {
                Value::Null => None,
                other => Some(Node::from_json(&other)),
            };
        } else {
            self.values.insert(key, value);
        }
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<ClassName>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_children(mut self, children: impl Into<Node>) -> Self {
        self.children = Some(children.into());
        self
    }

    pub fn with_style(self, style: Value) -> Self {
        self.with(STYLE_KEY, style)
    }

    pub fn class_name(&self) -> Option<&ClassName> {
        self.class_name.as_ref()
    }

    pub fn children(&self) -> Option<&Node> {
        self.children.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// String value of a property, if it is a string
    pub fn str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Whether a property is present and truthy
    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(is_truthy)
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.class_name.is_none() && self.children.is_none()
    }

    pub fn into_parts(self) -> (Option<ClassName>, Option<Node>, IndexMap<String, Value>) {
        (self.class_name, self.children, self.values)
    }
}

/// Loose truthiness for property values
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_routes_typed_slots() {
        let props = Props::new()
            .with("className", "shadow")
            .with("children", "Hello")
            .with("size", "lg");

        assert_eq!(props.class_name().and_then(ClassName::as_static), Some("shadow"));
        assert_eq!(props.children().and_then(Node::text), Some("Hello"));
        assert_eq!(props.str("size"), Some("lg"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_non_string_class_name_is_never_a_value() {
        let props = Props::new().with("className", 3);
        assert!(props.class_name().is_none());
        assert!(!props.contains("className"));

        let cleared = Props::new().with("className", "p-4").with("className", json!(null));
        assert!(cleared.class_name().is_none());
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_array_children_go_to_children_slot() {
        let props = Props::new().with("children", json!(["a", "b"]));
        assert!(!props.contains("children"));
        match props.children() {
            Some(Node::Fragment(items)) => {
                let texts: Vec<_> = items.iter().filter_map(Node::text).collect();
                assert_eq!(texts, vec!["a", "b"]);
            }
            other => panic!("expected fragment children, got {:?}", other),
        }

        let cleared = Props::new().with_children("hi").with("children", json!(null));
        assert!(cleared.children().is_none());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let props = Props::new().with("b", 1).with("a", 2).with("c", 3);
        let keys: Vec<_> = props.values().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_flag_truthiness() {
        let props = Props::new()
            .with("$active", true)
            .with("zero", 0)
            .with("empty", "")
            .with("obj", json!({}));

        assert!(props.flag("$active"));
        assert!(!props.flag("zero"));
        assert!(!props.flag("empty"));
        assert!(props.flag("obj"));
        assert!(!props.flag("missing"));
    }

    #[test]
    fn test_interaction_state_from_flags() {
        let state = InteractionState::from_flags(["pressed", " focused"]).unwrap();
        assert!(state.pressed);
        assert!(state.focused);
        assert!(!state.hovered);

        let err = InteractionState::from_flags(["dragging"]).unwrap_err();
        assert!(err.to_string().contains("dragging"));
    }

    #[test]
    fn test_deferred_class_name_resolves_per_state() {
        let class = ClassName::deferred(|s| if s.pressed { "opacity-50".into() } else { String::new() });
        let pressed = InteractionState { pressed: true, ..Default::default() };

        assert!(class.is_deferred());
        assert_eq!(class.resolve(&pressed), "opacity-50");
        assert_eq!(class.resolve(&InteractionState::default()), "");
    }

    #[test]
    fn test_node_ref_identity() {
        let a = NodeRef::new("input");
        let b = NodeRef::new("input");
        assert!(a.same(&a.clone()));
        assert!(!a.same(&b));
    }
}
