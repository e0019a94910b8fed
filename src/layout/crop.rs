//! Filename Cropping
//!
//! Shortens file names to a display width while keeping them recognizable.
//! Widths are terminal cells, so wide characters count double.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker inserted where text was cut
pub const ELLIPSIS: char = '…';

/// Longest extension (without the dot) kept intact when cropping
const MAX_EXTENSION_LEN: usize = 4;

/// Crop `name` so that it fits in `max_width` cells.
///
/// Short extensions survive: `verylongname.rs` cropped to 10 cells becomes
/// `verylo….rs`. Names without a usable extension lose their tail instead
/// (`archive.tarball` → `archive…`).
pub fn crop_filename(name: &str, max_width: usize) -> Cow<'_, str> {
    if name.width() <= max_width {
        return Cow::Borrowed(name);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if let Some((base, extension)) = split_short_extension(name) {
        // ".ext" plus the ellipsis plus at least one base character
        let tail_width = extension.width() + 1;
        if max_width > tail_width + 1 {
            let kept = take_width(base, max_width - tail_width - 1);
            if !kept.is_empty() {
                return Cow::Owned(format!("{kept}{ELLIPSIS}.{extension}"));
            }
        }
    }

    Cow::Owned(format!("{}{ELLIPSIS}", take_width(name, max_width - 1)))
}

/// Split `name` into base and extension when the extension is short enough to keep.
fn split_short_extension(name: &str) -> Option<(&str, &str)> {
    let dot = name.rfind('.')?;
    if dot == 0 {
        // dotfiles like ".bashrc" have no extension
        return None;
    }

    let extension = &name[dot + 1..];
    let len = extension.chars().count();
    if len == 0 || len > MAX_EXTENSION_LEN {
        return None;
    }

    Some((&name[..dot], extension))
}

/// Longest prefix of `text` that fits in `max_width` cells.
pub(crate) fn take_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            return &text[..idx];
        }
        used += w;
    }
    text
}
