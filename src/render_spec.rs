use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::class_value::ClassValue;
use crate::component::{Component, Host, Node};
use crate::errors::{Result, StyledError};
use crate::factory::Wrap;
use crate::props::{InteractionState, Props};

/// Declarative description of one styled render, loaded from YAML or JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSpec {
    /// Name of the host component being wrapped
    pub component: String,

    /// Literal class template
    pub template: String,

    /// Static attrs merged under the props
    pub attrs: IndexMap<String, Value>,

    /// Props that are not forwarded. Replaces the default `$` rule when set.
    pub transient_props: Vec<String>,

    /// Classes added while an interaction flag is active, e.g. `pressed: opacity-50`
    pub interaction: IndexMap<String, String>,

    /// Props passed at render time. `className` and `children` are routed to
    /// their slots.
    pub props: IndexMap<String, Value>,
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            component: "View".to_string(),
            template: String::new(),
            attrs: IndexMap::new(),
            transient_props: Vec::new(),
            interaction: IndexMap::new(),
            props: IndexMap::new(),
        }
    }
}

impl RenderSpec {
    /// Load a render spec from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let spec: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                StyledError::SpecError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            })?,
            Some("json") => serde_json::from_str(&content).map_err(|e| StyledError::SpecError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
            _ => {
                return Err(StyledError::SpecError {
                    path: path.display().to_string(),
                    message: "unsupported format, use .yaml, .yml or .json".to_string(),
                })
            }
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check that every interaction key names a known flag
    pub fn validate(&self) -> Result<()> {
        if self.component.trim().is_empty() {
            return Err(StyledError::InvalidInput("component name is empty".to_string()));
        }
        let state = InteractionState::default();
        for flag in self.interaction.keys() {
            if state.is_active(flag).is_none() {
                return Err(StyledError::InvalidInput(format!(
                    "Unknown interaction flag '{}' in render spec",
                    flag
                )));
            }
        }
        Ok(())
    }

    /// Render the spec through `wrap`
    pub fn render(&self, wrap: &Wrap) -> Node {
        let mut binder = wrap.wrap(Host::new(self.component.clone()));
        if !self.attrs.is_empty() {
            binder = binder.attrs(self.attrs.clone());
        }
        if !self.transient_props.is_empty() {
            binder = binder.transient_props(self.transient_props.clone());
        }

        let props = Props::from_json_map(self.props.clone());
        if self.interaction.is_empty() {
            return binder.class(&self.template).render(props, None);
        }

        let template = self.template.clone();
        let interaction = self.interaction.clone();
        let styled = binder.from_fn(move |_| {
            let interaction = interaction.clone();
            ClassValue::List(vec![
                ClassValue::text(template.clone()),
                ClassValue::deferred(move |state| {
                    ClassValue::toggles(interaction.iter().map(|(flag, classes)| {
                        (classes.clone(), state.is_active(flag).unwrap_or(false))
                    }))
                }),
            ])
        });
        styled.render(props, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_spec_renders_view() {
        let spec = RenderSpec {
            template: "flex-1".into(),
            ..Default::default()
        };
        let node = spec.render(&Wrap::standard());
        let element = node.as_element().unwrap();
        assert_eq!(element.component, "View");
        assert_eq!(element.class().as_deref(), Some("flex-1"));
    }

    #[test]
    fn test_interaction_classes_are_deferred() {
        let mut spec = RenderSpec {
            component: "Pressable".into(),
            template: "bg-blue-500".into(),
            ..Default::default()
        };
        spec.interaction.insert("pressed".into(), "bg-blue-700".into());
        spec.props.insert("className".into(), json!("rounded"));

        let node = spec.render(&Wrap::merging());
        let element = node.as_element().unwrap();
        let pressed = InteractionState { pressed: true, ..Default::default() };

        assert_eq!(element.class_for(&pressed).as_deref(), Some("bg-blue-700 rounded"));
        assert_eq!(element.class().as_deref(), Some("bg-blue-500 rounded"));
    }

    #[test]
    fn test_validate_rejects_unknown_flag() {
        let mut spec = RenderSpec::default();
        spec.interaction.insert("dragging".into(), "opacity-50".into());
        assert!(matches!(spec.validate(), Err(StyledError::InvalidInput(_))));
    }
}
