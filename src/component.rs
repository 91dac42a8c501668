//! Component abstraction and the render tree produced by components.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::rc::Rc;

use crate::props::{ClassName, InteractionState, NodeRef, Props};

/// A renderable unit.
///
/// Styled wrappers implement this trait too, so a wrapped component can be
/// wrapped again.
pub trait Component {
    /// Render with the given props, forwarding `node_ref` to whatever the
    /// component considers its host node
    fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Node;

    /// Name used in render output and log messages
    fn name(&self) -> &str;
}

impl<C: Component + ?Sized> Component for Rc<C> {
    fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Node {
        (**self).render(props, node_ref)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Node {
        (**self).render(props, node_ref)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Render output
#[derive(Debug, Clone, Default)]
pub enum Node {
    #[default]
    Empty,
    Text(String),
    Element(Box<Element>),
    Fragment(Vec<Node>),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// JSON view of the tree, deferred class names resolved against `state`
    pub fn to_json(&self, state: &InteractionState) -> Value {
        match self {
            Node::Empty => Value::Null,
            Node::Text(text) => Value::String(text.clone()),
            Node::Element(element) => element.to_json(state),
            Node::Fragment(nodes) => Value::Array(nodes.iter().map(|n| n.to_json(state)).collect()),
        }
    }

    /// Build child content from a JSON prop value. Arrays become fragments,
    /// scalars become text and booleans render nothing. Objects are kept as
    /// their JSON text.
    pub fn from_json(value: &Value) -> Node {
        match value {
            Value::Null | Value::Bool(_) => Node::Empty,
            Value::String(text) => Node::Text(text.clone()),
            Value::Number(n) => Node::Text(n.to_string()),
            Value::Array(items) => Node::Fragment(items.iter().map(Node::from_json).collect()),
            Value::Object(_) => Node::Text(value.to_string()),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(Box::new(element))
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

/// A host node with its final props
#[derive(Debug, Clone)]
pub struct Element {
    pub component: String,
    pub node_ref: Option<NodeRef>,
    pub class_name: Option<ClassName>,
    pub props: IndexMap<String, Value>,
    pub children: Option<Node>,
}

impl Element {
    /// Class string for the given interaction state
    pub fn class_for(&self, state: &InteractionState) -> Option<String> {
        self.class_name.as_ref().map(|c| c.resolve(state))
    }

    /// Class string for the default interaction state
    pub fn class(&self) -> Option<String> {
        self.class_for(&InteractionState::default())
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn to_json(&self, state: &InteractionState) -> Value {
        let mut out = Map::new();
        out.insert("component".into(), json!(self.component));
        if let Some(node_ref) = &self.node_ref {
            out.insert("ref".into(), json!(node_ref.label()));
        }
        if let Some(class_name) = &self.class_name {
            out.insert("className".into(), json!(class_name.resolve(state)));
            if class_name.is_deferred() {
                out.insert("deferred".into(), Value::Bool(true));
            }
        }
        let props: Map<String, Value> = self
            .props
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        out.insert("props".into(), Value::Object(props));
        if let Some(children) = &self.children {
            out.insert("children".into(), children.to_json(state));
        }
        Value::Object(out)
    }
}

/// Named host component that turns its props into an [`Element`]
#[derive(Debug, Clone)]
pub struct Host {
    name: String,
}

impl Host {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for Host {
    fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Node {
        let (class_name, children, props) = props.into_parts();
        Node::from(Element {
            component: self.name.clone(),
            node_ref,
            class_name,
            props,
            children,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Adapter turning a closure into a component
pub struct FnComponent<F> {
    name: String,
    render: F,
}

impl<F> Component for FnComponent<F>
where
    F: Fn(Props, Option<NodeRef>) -> Node,
{
    fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Node {
        (self.render)(props, node_ref)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn from_fn<F>(name: impl Into<String>, render: F) -> FnComponent<F>
where
    F: Fn(Props, Option<NodeRef>) -> Node,
{
    FnComponent {
        name: name.into(),
        render,
    }
}
