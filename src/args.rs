use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tailwind styled-component CLI - composes class strings and previews styled renders
#[derive(Parser, Debug)]
#[command(name = "tailwind-styled")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose class strings into one
    Compose(ComposeArgs),
    /// Render a styled component described in a YAML or JSON file
    Render(RenderArgs),
}

/// Arguments for the compose command
#[derive(Parser, Debug, Clone)]
pub struct ComposeArgs {
    /// Class strings, composed left to right
    #[arg(value_name = "CLASSES", required = true, num_args = 1..)]
    pub classes: Vec<String>,

    /// Resolve utility conflicts, later classes winning
    #[arg(long = "merge", default_value_t = false)]
    pub merge: bool,

    /// Settings file path (YAML or JSON)
    #[arg(short = 'c', long = "config", value_name = "PATH", env = "TAILWIND_STYLED_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the render command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Render spec file (YAML or JSON)
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Settings file path (YAML or JSON)
    #[arg(short = 'c', long = "config", value_name = "PATH", env = "TAILWIND_STYLED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resolve utility conflicts, later classes winning
    #[arg(long = "merge", default_value_t = false)]
    pub merge: bool,

    /// Active interaction flags used to resolve deferred class names
    #[arg(
        short = 's',
        long = "state",
        value_name = "FLAGS",
        value_delimiter = ',',
        help = "Comma separated interaction flags: pressed, hovered, focused, disabled"
    )]
    pub state: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long = "pretty", default_value_t = false)]
    pub pretty: bool,
}

impl ComposeArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.iter().all(|c| c.trim().is_empty()) {
            return Err("At least one non-empty class string is required".to_string());
        }
        validate_config_path(self.config.as_ref())
    }
}

impl RenderArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.spec.exists() {
            return Err(format!("Render spec '{}' does not exist", self.spec.display()));
        }
        validate_config_path(self.config.as_ref())
    }
}

fn validate_config_path(config: Option<&PathBuf>) -> Result<(), String> {
    if let Some(path) = config {
        if !path.exists() {
            return Err(format!("Config file '{}' does not exist", path.display()));
        }
    }
    Ok(())
}
