//! Status Line Layout
//!
//! Pure text layout: filename cropping and the windowed list rendering built on it.
//! No editor state, no I/O.

pub mod crop;
pub mod window;

pub use crop::{crop_filename, ELLIPSIS};
pub use window::{render_window, RenderOptions, Span, StatusLine, Style};
