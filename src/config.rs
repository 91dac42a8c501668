use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::class_merge::{ConflictResolver, UtilityGroups};
use crate::class_value::{cx, ClassValue, Compose};
use crate::errors::{Result, StyledError};
use crate::resolver::{forward_unless_transient, ForwardPredicate};

/// Factory configuration: how classes are composed and which props are
/// forwarded to base components. Immutable once handed to a factory.
#[derive(Clone)]
pub struct Config {
    pub compose: Compose,
    pub should_forward_prop: ForwardPredicate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compose: Rc::new(cx),
            should_forward_prop: Rc::new(forward_unless_transient),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config").finish_non_exhaustive()
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compose<F>(mut self, compose: F) -> Self
    where
        F: Fn(&[ClassValue]) -> String + 'static,
    {
        self.compose = Rc::new(compose);
        self
    }

    pub fn with_should_forward_prop<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.should_forward_prop = Rc::new(predicate);
        self
    }

    /// Compose with a conflict resolver applied after `cx`
    pub fn with_resolver<R>(self, resolver: R) -> Self
    where
        R: ConflictResolver + 'static,
    {
        self.with_compose(move |inputs| resolver.resolve(&cx(inputs)))
    }

    /// Build a factory configuration from settings
    pub fn from_settings(settings: &StyledSettings) -> Result<Self> {
        let prefix = settings.transient_prefix().to_string();
        let mut config = Self::new().with_should_forward_prop(move |name| {
            prefix.is_empty() || !name.starts_with(prefix.as_str())
        });

        if settings.merge {
            config = config.with_resolver(settings.utility_groups()?);
        }

        Ok(config)
    }
}

const DEFAULT_TRANSIENT_PREFIX: &str = "$";

/// Settings file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyledSettings {
    /// Props starting with this prefix are not forwarded. Empty forwards
    /// everything, unset means `$`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transient_prefix: Option<String>,

    /// Resolve utility conflicts when composing classes
    pub merge: bool,

    /// Extra utility groups: group name to regex patterns
    pub groups: IndexMap<String, Vec<String>>,

    /// Extra conflicts: group to the groups it overrides
    pub conflicts: IndexMap<String, Vec<String>>,
}

impl StyledSettings {
    /// Effective transient prefix
    pub fn transient_prefix(&self) -> &str {
        self.transient_prefix.as_deref().unwrap_or(DEFAULT_TRANSIENT_PREFIX)
    }

    /// Load settings from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StyledError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        serde_yaml::from_str(&content)
            .map_err(|e| StyledError::ConfigError {
                message: format!("Failed to parse YAML config: {}", e),
            })
    }

    /// Load settings from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StyledError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        serde_json::from_str(&content)
            .map_err(|e| StyledError::ConfigError {
                message: format!("Failed to parse JSON config: {}", e),
            })
    }

    /// Load settings from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(StyledError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Merge with another settings value, `other` taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        if other.transient_prefix.is_some() {
            self.transient_prefix = other.transient_prefix;
        }
        self.merge |= other.merge;

        for (group, patterns) in other.groups {
            let entry = self.groups.entry(group).or_default();
            for pattern in patterns {
                if !entry.contains(&pattern) {
                    entry.push(pattern);
                }
            }
        }
        for (group, overridden) in other.conflicts {
            let entry = self.conflicts.entry(group).or_default();
            for name in overridden {
                if !entry.contains(&name) {
                    entry.push(name);
                }
            }
        }

        self
    }

    /// Built-in utility groups extended with the configured ones
    pub fn utility_groups(&self) -> Result<UtilityGroups> {
        let mut groups = UtilityGroups::tailwind();
        // Insert in reverse so the first configured group is checked first
        for (name, patterns) in self.groups.iter().rev() {
            groups = groups.with_group(name, patterns)?;
        }
        for (group, overridden) in &self.conflicts {
            groups = groups.with_conflicts(group, overridden);
        }
        Ok(groups)
    }
}
