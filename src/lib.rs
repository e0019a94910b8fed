//! Argument List Status
//!
//! Visual feedback for a text editor's argument list: a transient status line
//! of the list's entries centred on the current one, refreshed automatically
//! after the list changes.
//!
//! This library provides:
//! - Filename cropping and windowed list layout
//! - The plugin state object and its list commands
//! - Host editor abstraction, in-memory and over stdio
//! - Configuration management

pub mod arglist;
pub mod config;
pub mod host;
pub mod layout;
pub mod plugin;
pub mod server;
pub mod timer;

// Re-exports for the public API
pub use arglist::{ArgList, HostCommand};
pub use config::Config;
pub use host::{Host, MemoryHost, RpcHost};
pub use layout::{crop_filename, render_window, RenderOptions, StatusLine};
pub use plugin::{Action, ArgStatus};
