use std::rc::Rc;

use crate::binder::TemplateBinder;
use crate::class_merge::UtilityGroups;
use crate::class_value::ClassValue;
use crate::component::Component;
use crate::config::Config;

/// Entry point returned by [`create_instance`]: wraps base components into
/// template binders sharing one configuration.
#[derive(Debug, Clone, Default)]
pub struct Wrap {
    config: Config,
}

/// Create a factory closing over `config`
pub fn create_instance(config: Config) -> Wrap {
    Wrap { config }
}

impl Wrap {
    /// Factory with the default `cx` composition
    pub fn standard() -> Self {
        create_instance(Config::default())
    }

    /// Factory whose composition also resolves utility conflicts, later
    /// classes winning
    pub fn merging() -> Self {
        create_instance(Config::default().with_resolver(UtilityGroups::tailwind()))
    }

    pub fn wrap<C: Component>(&self, component: C) -> TemplateBinder<C> {
        self.wrap_shared(Rc::new(component))
    }

    /// Wrap a component already shared elsewhere
    pub fn wrap_shared<C: Component>(&self, component: Rc<C>) -> TemplateBinder<C> {
        TemplateBinder::new(component, self.config.clone())
    }

    /// Compose classes with this factory's composition function
    pub fn compose(&self, inputs: &[ClassValue]) -> String {
        (self.config.compose)(inputs)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
