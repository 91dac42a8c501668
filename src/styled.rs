use std::fmt;
use std::rc::Rc;

use crate::component::{Component, Node};
use crate::props::{NodeRef, Props};
use crate::resolver::{Recipe, Resolved};

/// A component produced by a template binder.
///
/// Cloning is cheap and keeps identity: clones compare equal under
/// [`Styled::ptr_eq`].
pub struct Styled<C> {
    inner: Rc<StyledInner<C>>,
}

struct StyledInner<C> {
    base: Rc<C>,
    recipe: Recipe,
    name: String,
}

impl<C: Component> Styled<C> {
    pub(crate) fn new(base: Rc<C>, recipe: Recipe) -> Self {
        let name = format!("Styled({})", base.name());
        Self {
            inner: Rc::new(StyledInner { base, recipe, name }),
        }
    }

    /// Resolve props without rendering the base component
    pub fn resolve(&self, props: Props) -> Resolved {
        self.inner.recipe.resolve(props)
    }

    pub fn base(&self) -> &C {
        &self.inner.base
    }
}

impl<C> Styled<C> {
    /// Whether two handles refer to the same produced component
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<C> Clone for Styled<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for Styled<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Styled").field("name", &self.inner.name).finish()
    }
}

impl<C: Component> Component for Styled<C> {
    fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Node {
        let resolved = self.inner.recipe.resolve(props);
        self.inner.base.render(resolved.into_props(), node_ref)
    }

    fn name(&self) -> &str {
        &self.inner.name
    }
}

/// Links a styled component to the component it wraps
pub trait Wraps {
    type Base: Component;
}

impl<C: Component> Wraps for Styled<C> {
    type Base = C;
}

/// The base component type behind a styled component
pub type BaseOf<W> = <W as Wraps>::Base;
