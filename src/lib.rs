//! Tailwind class composition and styled component wrappers.
//!
//! A [`Wrap`] factory turns a base [`Component`] into a [`TemplateBinder`],
//! which produces [`Styled`] components from class templates or class
//! functions. Every render of a styled component merges attrs, filters
//! transient props, composes the final class name and optionally transforms
//! children before delegating to the base component.

#[cfg(feature = "cli")]
pub mod args;
pub mod binder;
pub mod cache;
pub mod class_merge;
pub mod class_value;
pub mod component;
pub mod config;
pub mod errors;
pub mod factory;
pub mod props;
pub mod render_spec;
pub mod resolver;
pub mod style;
pub mod styled;

#[cfg(feature = "cli")]
pub use args::{Cli, Commands, ComposeArgs, RenderArgs};
pub use binder::TemplateBinder;
pub use cache::InstanceCache;
pub use class_merge::{merge_with, tw_merge, ConflictResolver, ParsedClass, UtilityGroups};
pub use class_value::{cx, ClassValue, Compose};
pub use component::{from_fn, Component, Element, FnComponent, Host, Node};
pub use config::{Config, StyledSettings};
pub use errors::{Result, StyledError};
pub use factory::{create_instance, Wrap};
pub use props::{ClassName, InteractionState, NodeRef, Props};
pub use render_spec::RenderSpec;
pub use resolver::{forward_unless_transient, Attrs, PropMap, Resolved};
pub use styled::{BaseOf, Styled, Wraps};

use log::{debug, info};
use std::path::Path;

/// Build the factory for a command from an optional settings file and the
/// `--merge` flag
pub fn load_factory(config_path: Option<&Path>, merge: bool) -> Result<Wrap> {
    let mut settings = match config_path {
        Some(path) => {
            info!("Loading settings from {}", path.display());
            StyledSettings::from_file(path)?
        }
        None => StyledSettings::default(),
    };
    if merge {
        settings.merge = true;
    }
    debug!("Effective settings: {:?}", settings);

    Ok(create_instance(Config::from_settings(&settings)?))
}

/// Handle the compose command, returning the composed class string
#[cfg(feature = "cli")]
pub fn handle_compose_command(args: &ComposeArgs) -> Result<String> {
    args.validate().map_err(StyledError::InvalidInput)?;

    let wrap = load_factory(args.config.as_deref(), args.merge)?;
    let inputs: Vec<ClassValue> = args.classes.iter().map(ClassValue::from).collect();
    let composed = wrap.compose(&inputs);

    debug!("Composed {} inputs into '{}'", inputs.len(), composed);
    Ok(composed)
}

/// Handle the render command, returning the rendered tree as JSON text
#[cfg(feature = "cli")]
pub fn handle_render_command(args: &RenderArgs) -> Result<String> {
    args.validate().map_err(StyledError::InvalidInput)?;

    let wrap = load_factory(args.config.as_deref(), args.merge)?;
    let spec = RenderSpec::from_file(&args.spec)?;
    let state = InteractionState::from_flags(&args.state)?;

    info!("Rendering {} from {}", spec.component, args.spec.display());
    let output = spec.render(&wrap).to_json(&state);

    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(text)
}
