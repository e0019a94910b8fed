//! Host Editor Capabilities
//!
//! Everything the plugin needs from the editor, behind one trait.

pub mod memory;
pub mod rpc;

pub use memory::MemoryHost;
pub use rpc::RpcHost;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::arglist::{ArgList, HostCommand};
use crate::config::{Binding, Highlights};
use crate::layout::StatusLine;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Identifier of an overlay opened by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(pub u64);

/// Where the overlay is anchored in the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A highlight range with its resolved highlight group name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub start: usize,
    pub len: usize,
    pub group: String,
}

/// Content and geometry of a transient overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub text: String,
    pub highlights: Vec<Highlight>,
    /// Display width of `text` in cells
    pub width: usize,
    pub placement: Placement,
}

impl Overlay {
    pub fn new(line: &StatusLine, highlights: &Highlights, placement: Placement) -> Self {
        Self {
            text: line.text.clone(),
            highlights: line
                .spans
                .iter()
                .map(|span| Highlight {
                    start: span.start,
                    len: span.len,
                    group: highlights.group(span.style).to_string(),
                })
                .collect(),
            width: line.width(),
            placement,
        }
    }
}

/// The editor as seen by the plugin
pub trait Host: Send + 'static {
    /// Snapshot of the argument list
    fn arglist(&self) -> ArgList;

    /// File shown in the current buffer, if it has one
    fn current_file(&self) -> Option<String>;

    /// Width of the editor in columns
    fn columns(&self) -> usize;

    /// Run a built-in list command
    fn execute(&mut self, command: HostCommand) -> Result<()>;

    fn open_overlay(&mut self, overlay: &Overlay) -> Result<OverlayId>;

    fn close_overlay(&mut self, id: OverlayId) -> Result<()>;

    /// Install key bindings, replacing the previous set
    fn register_keymaps(&mut self, bindings: &[Binding]) -> Result<()>;

    /// Show a non-blocking notice
    fn notify(&mut self, level: Level, message: &str);
}
