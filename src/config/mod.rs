//! Configuration management for the arglist status plugin.
//!
//! Handles:
//! - Command-line argument parsing
//! - Loading the TOML configuration file over built-in defaults
//! - Validation of timings and key bindings
//! - Live reload of the configuration file

pub mod keymap;
pub mod watch;

pub use keymap::{is_valid_key_notation, Binding, Keymaps};
pub use watch::{watch, ConfigWatcher};

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::host::Placement;
use crate::layout::{RenderOptions, Style, ELLIPSIS};

/// Command-line arguments for the plugin process
#[derive(Debug, Parser)]
#[command(name = "arglist-status")]
#[command(about = "Argument list status display for text editors")]
#[command(version)]
pub struct Args {
    /// Configuration file to load
    #[arg(long, help = "Path to the TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Log level for the plugin process
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Disable live reload of the configuration file
    #[arg(long)]
    pub no_watch: bool,
}

impl Args {
    /// Configuration file in effect: the explicit one, else the default location
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_path)
    }
}

/// Highlight group names used for each span style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Highlights {
    pub current: String,
    pub entry: String,
    pub ellipsis: String,
}

impl Default for Highlights {
    fn default() -> Self {
        Self {
            current: "ArglistCurrent".to_string(),
            entry: "Comment".to_string(),
            ellipsis: "NonText".to_string(),
        }
    }
}

impl Highlights {
    pub fn group(&self, style: Style) -> &str {
        match style {
            Style::Current => &self.current,
            Style::Entry => &self.entry,
            Style::Ellipsis => &self.ellipsis,
        }
    }
}

/// Plugin configuration. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Upper bound on the overlay width
    pub max_width: usize,
    /// Width at which a single file name is cropped
    pub name_width: usize,
    /// Quiet period after a list change before re-rendering
    pub debounce_ms: u64,
    /// How long the overlay stays open
    pub timeout_ms: u64,
    /// Re-render when the list changes outside the plugin
    pub auto_refresh: bool,
    /// Render after every plugin action
    pub show_on_action: bool,
    /// Prefix entries with their position
    pub numbers: bool,
    pub placement: Placement,
    pub separator: String,
    pub ellipsis: String,
    pub highlights: Highlights,
    pub keymaps: Keymaps,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: 80,
            name_width: 24,
            debounce_ms: 50,
            timeout_ms: 2000,
            auto_refresh: true,
            show_on_action: true,
            numbers: false,
            placement: Placement::default(),
            separator: " ".to_string(),
            ellipsis: ELLIPSIS.to_string(),
            highlights: Highlights::default(),
            keymaps: Keymaps::default(),
        }
    }
}

impl Config {
    /// Create configuration from parsed arguments.
    ///
    /// A missing configuration file means defaults; an unreadable or invalid one is an error.
    pub fn from_args(args: &Args) -> Result<Self> {
        match args.config_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            Some(path) => {
                if args.config.is_some() {
                    log::warn!("Config file {} not found, using defaults", path.display());
                }
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Default configuration file: `<config dir>/arglist-status/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arglist-status").join("config.toml"))
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unusable values. Invalid key bindings are dropped rather than rejected.
    fn validate(&mut self) -> Result<()> {
        ensure!(self.max_width > 0, "max_width must be positive");
        ensure!(self.name_width >= 2, "name_width must be at least 2");
        ensure!(self.debounce_ms > 0, "debounce_ms must be positive");
        ensure!(self.timeout_ms > 0, "timeout_ms must be positive");

        for (action, keys) in self.keymaps.drop_invalid() {
            log::warn!(
                "Ignoring invalid key binding '{}' for '{}'",
                keys,
                action.name()
            );
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            name_width: self.name_width,
            separator: self.separator.clone(),
            ellipsis: self.ellipsis.clone(),
            numbers: self.numbers,
        }
    }
}
