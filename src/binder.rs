//! Template binder: turns a class template or class function into a styled
//! component, with `attrs`, `transient_props` and `with_children` modifiers.

use log::debug;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::{self, Display, Write as _};
use std::rc::Rc;

use crate::cache::InstanceCache;
use crate::class_value::ClassValue;
use crate::component::{Component, Node};
use crate::config::Config;
use crate::props::Props;
use crate::resolver::{
    Attrs, ChildrenRenderer, ClassSource, ForwardPredicate, PropMap, Recipe,
};
use crate::styled::Styled;

/// Binds class templates to one base component.
///
/// Modifiers return a new binder and leave this one untouched. Calling a
/// modifier again replaces its previous value. Each binder owns its own
/// instance cache, so identical templates on the same binder yield the same
/// [`Styled`] component.
pub struct TemplateBinder<C> {
    base: Rc<C>,
    config: Config,
    forward: ForwardPredicate,
    attrs: Option<Attrs>,
    children: Option<ChildrenRenderer>,
    cache: Rc<InstanceCache<Styled<C>>>,
}

impl<C> fmt::Debug for TemplateBinder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateBinder")
            .field("has_attrs", &self.attrs.is_some())
            .field("has_children", &self.children.is_some())
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl<C: Component> TemplateBinder<C> {
    pub(crate) fn new(base: Rc<C>, config: Config) -> Self {
        let forward = Rc::clone(&config.should_forward_prop);
        Self {
            base,
            config,
            forward,
            attrs: None,
            children: None,
            cache: Rc::new(InstanceCache::new()),
        }
    }

    /// Sibling binder sharing the base component, with a fresh cache
    fn sibling(&self) -> Self {
        Self {
            base: Rc::clone(&self.base),
            config: self.config.clone(),
            forward: Rc::clone(&self.forward),
            attrs: self.attrs.clone(),
            children: self.children.clone(),
            cache: Rc::new(InstanceCache::new()),
        }
    }

    /// Static default props, overridden by the caller's props except for
    /// `style`, which is merged
    pub fn attrs<I, K, V>(&self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let map: PropMap = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let mut next = self.sibling();
        next.attrs = Some(Attrs::Static(map));
        next
    }

    /// Default props derived from the full incoming props on every render
    pub fn attrs_fn<F>(&self, attrs: F) -> Self
    where
        F: Fn(&Props) -> PropMap + 'static,
    {
        let mut next = self.sibling();
        next.attrs = Some(Attrs::Derived(Rc::new(attrs)));
        next
    }

    /// Stop forwarding the named props. Replaces the forwarding predicate.
    pub fn transient_props<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: HashSet<String> = names.into_iter().map(Into::into).collect();
        self.transient_props_fn(move |name| names.contains(name))
    }

    /// Stop forwarding props for which `is_transient` returns true. Replaces
    /// the forwarding predicate.
    pub fn transient_props_fn<F>(&self, is_transient: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        let mut next = self.sibling();
        next.forward = Rc::new(move |name: &str| !is_transient(name));
        next
    }

    /// Transform incoming children. The renderer also runs when no children
    /// were passed, receiving `None`.
    pub fn with_children<F>(&self, render: F) -> Self
    where
        F: Fn(Option<Node>) -> Node + 'static,
    {
        let mut next = self.sibling();
        next.children = Some(Rc::new(render));
        next
    }

    /// Styled component with a literal class string
    pub fn class(&self, class: &str) -> Styled<C> {
        self.template(&[class], &[])
    }

    /// Styled component from template fragments with values spliced between
    /// them. The class string is built once, here.
    pub fn template<S: AsRef<str>>(&self, fragments: &[S], values: &[&dyn Display]) -> Styled<C> {
        let class = splice(fragments, values);
        let key = format!("template:{}", class);
        self.cache.get_or_create(&key, || {
            debug!("building {} for template '{}'", self.base.name(), class);
            self.build(ClassSource::Literal(class.clone()))
        })
    }

    /// Styled component whose class is computed from props on every render.
    /// Not memoised: each call builds a new component.
    pub fn from_fn<F>(&self, class_fn: F) -> Styled<C>
    where
        F: Fn(&Props) -> ClassValue + 'static,
    {
        self.build(ClassSource::Computed(Rc::new(class_fn)))
    }

    /// Like [`from_fn`](Self::from_fn), memoised under a caller-supplied
    /// stable key. The first function registered under a key wins.
    pub fn from_fn_keyed<F>(&self, key: &str, class_fn: F) -> Styled<C>
    where
        F: Fn(&Props) -> ClassValue + 'static,
    {
        let key = format!("fn:{}", key);
        self.cache
            .get_or_create(&key, || self.build(ClassSource::Computed(Rc::new(class_fn))))
    }

    /// Number of memoised components
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn build(&self, class_source: ClassSource) -> Styled<C> {
        let recipe = Recipe {
            compose: Rc::clone(&self.config.compose),
            forward: Rc::clone(&self.forward),
            attrs: self.attrs.clone(),
            class_source,
            children: self.children.clone(),
        };
        Styled::new(Rc::clone(&self.base), recipe)
    }
}

impl<C> Clone for TemplateBinder<C> {
    /// Clones share the instance cache
    fn clone(&self) -> Self {
        Self {
            base: Rc::clone(&self.base),
            config: self.config.clone(),
            forward: Rc::clone(&self.forward),
            attrs: self.attrs.clone(),
            children: self.children.clone(),
            cache: Rc::clone(&self.cache),
        }
    }
}

/// Concatenate fragments with values spliced between them; values beyond
/// the last gap are appended
fn splice<S: AsRef<str>>(fragments: &[S], values: &[&dyn Display]) -> String {
    let mut out = String::new();
    let mut values = values.iter();
    for (i, fragment) in fragments.iter().enumerate() {
        out.push_str(fragment.as_ref());
        if i + 1 < fragments.len() {
            if let Some(value) = values.next() {
                let _ = write!(out, "{}", value);
            }
        }
    }
    for value in values {
        let _ = write!(out, "{}", value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_in_order() {
        let color = "red";
        let shade = 500;
        let class = splice(&["bg-", "-", " p-4"], &[&color, &shade]);
        assert_eq!(class, "bg-red-500 p-4");
    }

    #[test]
    fn test_splice_without_values() {
        assert_eq!(splice(&["flex items-center"], &[]), "flex items-center");
    }

    #[test]
    fn test_splice_extra_values_appended() {
        let extra = " shadow";
        assert_eq!(splice(&["p-4"], &[&extra]), "p-4 shadow");
    }
}
