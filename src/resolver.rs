//! Per-render resolution of attrs, style, forwarded props, class name and
//! children for a styled component.

use indexmap::IndexMap;
use log::trace;
use serde_json::Value;
use std::rc::Rc;

use crate::class_value::{ClassValue, Compose};
use crate::component::Node;
use crate::props::{ClassName, InteractionState, Props, STYLE_KEY};
use crate::style::merge_style;

/// Property map type used for attrs and forwarded props
pub type PropMap = IndexMap<String, Value>;

/// Decides whether a property name reaches the base component
pub type ForwardPredicate = Rc<dyn Fn(&str) -> bool>;

/// Transforms incoming children before they reach the base component
pub type ChildrenRenderer = Rc<dyn Fn(Option<Node>) -> Node>;

/// Computes a class value from the incoming props
pub type ClassFn = Rc<dyn Fn(&Props) -> ClassValue>;

/// Default or derived props merged under the caller's props
#[derive(Clone)]
pub enum Attrs {
    Static(PropMap),
    Derived(Rc<dyn Fn(&Props) -> PropMap>),
}

impl Attrs {
    fn resolve(&self, props: &Props) -> PropMap {
        match self {
            Attrs::Static(map) => map.clone(),
            Attrs::Derived(f) => f(props),
        }
    }
}

/// Where the base class of a styled component comes from
#[derive(Clone)]
pub enum ClassSource {
    /// Evaluated once when the component was built
    Literal(String),
    /// Evaluated on every render
    Computed(ClassFn),
}

/// Everything a styled component closes over besides its base component
#[derive(Clone)]
pub struct Recipe {
    pub(crate) compose: Compose,
    pub(crate) forward: ForwardPredicate,
    pub(crate) attrs: Option<Attrs>,
    pub(crate) class_source: ClassSource,
    pub(crate) children: Option<ChildrenRenderer>,
}

/// The props a base component receives after resolution
#[derive(Debug, Clone)]
pub struct Resolved {
    pub class_name: ClassName,
    pub props: PropMap,
    pub children: Option<Node>,
}

impl Resolved {
    pub fn into_props(self) -> Props {
        Props::from_parts(Some(self.class_name), self.children, self.props)
    }
}

impl Recipe {
    /// Resolve one render's props. Caller values are never mutated; every
    /// merge builds a new map.
    pub fn resolve(&self, props: Props) -> Resolved {
        // Both user functions see the full incoming props
        let attrs = self.attrs.as_ref().map(|attrs| attrs.resolve(&props));
        let base = match &self.class_source {
            ClassSource::Literal(class) => ClassValue::Text(class.clone()),
            ClassSource::Computed(f) => f(&props),
        };

        let (class_name, children, rest) = props.into_parts();

        let merged = match attrs {
            Some(attrs) => merge_attrs(attrs, rest),
            None => rest,
        };
        let forwarded = self.filter(merged);

        let class_name = self.compose_class_name(base, class_name);

        let children = match &self.children {
            Some(render) => Some(render(children)),
            None => children,
        };

        Resolved {
            class_name,
            props: forwarded,
            children,
        }
    }

    fn filter(&self, props: PropMap) -> PropMap {
        props
            .into_iter()
            .filter(|(key, _)| {
                let keep = (self.forward)(key.as_str());
                if !keep {
                    trace!("not forwarding prop '{}'", key);
                }
                keep
            })
            .collect()
    }

    fn compose_class_name(&self, base: ClassValue, incoming: Option<ClassName>) -> ClassName {
        let incoming_deferred = incoming.as_ref().is_some_and(ClassName::is_deferred);
        if !base.is_deferred() && !incoming_deferred {
            let incoming = ClassValue::from(incoming);
            return ClassName::Static((self.compose)(&[base, incoming]));
        }

        let compose = Rc::clone(&self.compose);
        ClassName::deferred(move |state: &InteractionState| {
            let incoming = incoming
                .as_ref()
                .map(|c| ClassValue::Text(c.resolve(state)))
                .unwrap_or_default();
            compose(&[base.resolve(state), incoming])
        })
    }
}

/// Merge attrs under incoming props: incoming wins on every key except
/// `style`, whose entries are merged with incoming keys winning
pub fn merge_attrs(attrs: PropMap, incoming: PropMap) -> PropMap {
    let mut merged = attrs;
    for (key, value) in incoming {
        if key == STYLE_KEY {
            let style = merge_style(merged.get(STYLE_KEY), Some(&value));
            if let Some(style) = style {
                merged.insert(key, style);
            }
        } else {
            merged.insert(key, value);
        }
    }
    merged
}

/// Default forwarding rule: everything except names starting with `$`
pub fn forward_unless_transient(name: &str) -> bool {
    !name.starts_with('$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_value::cx;
    use serde_json::json;

    fn recipe(class_source: ClassSource) -> Recipe {
        Recipe {
            compose: Rc::new(cx),
            forward: Rc::new(forward_unless_transient),
            attrs: None,
            class_source,
            children: None,
        }
    }

    #[test]
    fn test_literal_class_composed_with_incoming() {
        let resolved = recipe(ClassSource::Literal("bg-white p-4".into()))
            .resolve(Props::new().with_class_name("shadow"));
        assert_eq!(resolved.class_name.as_static(), Some("bg-white p-4 shadow"));
    }

    #[test]
    fn test_transient_props_filtered_after_attrs() {
        let mut r = recipe(ClassSource::Computed(Rc::new(|p: &Props| {
            ClassValue::from([("font-bold", p.flag("$bold"))])
        })));
        r.attrs = Some(Attrs::Derived(Rc::new(|p: &Props| {
            let mut map = PropMap::new();
            map.insert("accessibilityRole".into(), json!(if p.flag("$bold") { "header" } else { "text" }));
            map
        })));

        let resolved = r.resolve(Props::new().with("$bold", true).with("id", "x"));
        assert_eq!(resolved.class_name.as_static(), Some("font-bold"));
        assert_eq!(resolved.props.get("accessibilityRole"), Some(&json!("header")));
        assert!(!resolved.props.contains_key("$bold"));
        assert_eq!(resolved.props.get("id"), Some(&json!("x")));
    }

    #[test]
    fn test_merge_attrs_style_and_override() {
        let mut attrs = PropMap::new();
        attrs.insert("style".into(), json!({"padding": 10}));
        attrs.insert("numberOfLines".into(), json!(1));
        let mut incoming = PropMap::new();
        incoming.insert("style".into(), json!({"margin": 5}));
        incoming.insert("numberOfLines".into(), json!(3));

        let merged = merge_attrs(attrs, incoming);
        assert_eq!(merged.get("style"), Some(&json!({"padding": 10, "margin": 5})));
        assert_eq!(merged.get("numberOfLines"), Some(&json!(3)));
    }

    #[test]
    fn test_deferred_base_yields_deferred_class_name() {
        let r = recipe(ClassSource::Computed(Rc::new(|_: &Props| {
            ClassValue::deferred(|s| if s.pressed { "bg-blue-700".into() } else { "bg-blue-500".into() })
        })));
        let incoming = ClassName::deferred(|s| if s.pressed { "scale-95".into() } else { String::new() });

        let resolved = r.resolve(Props::new().with_class_name(incoming));
        let pressed = InteractionState { pressed: true, ..Default::default() };
        assert!(resolved.class_name.is_deferred());
        assert_eq!(resolved.class_name.resolve(&pressed), "bg-blue-700 scale-95");
        assert_eq!(resolved.class_name.resolve(&InteractionState::default()), "bg-blue-500");
    }

    #[test]
    fn test_static_incoming_with_deferred_base_ignores_state() {
        let r = recipe(ClassSource::Computed(Rc::new(|_: &Props| {
            ClassValue::deferred(|s| ClassValue::from([("ring", s.focused)]))
        })));
        let resolved = r.resolve(Props::new().with_class_name("m-1"));
        let focused = InteractionState { focused: true, ..Default::default() };
        assert_eq!(resolved.class_name.resolve(&focused), "ring m-1");
        assert_eq!(resolved.class_name.resolve(&InteractionState::default()), "m-1");
    }

    #[test]
    fn test_children_renderer_receives_absent_children() {
        let mut r = recipe(ClassSource::Literal(String::new()));
        r.children = Some(Rc::new(|children: Option<Node>| match children {
            Some(node) => node,
            None => Node::Text("fallback".into()),
        }));

        let resolved = r.resolve(Props::new());
        assert_eq!(resolved.children.as_ref().and_then(Node::text), Some("fallback"));
    }

    #[test]
    fn test_children_pass_through_without_renderer() {
        let r = recipe(ClassSource::Literal(String::new()));
        let resolved = r.resolve(Props::new().with_children("hi"));
        assert_eq!(resolved.children.as_ref().and_then(Node::text), Some("hi"));
        assert_eq!(resolved.class_name.as_static(), Some(""));
    }
}
