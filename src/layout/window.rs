//! Windowed List Rendering
//!
//! Lays out a width-bounded slice of the argument list around the current
//! entry, with ellipsis markers for whatever falls outside the slice.

use std::path::Path;

use unicode_width::UnicodeWidthStr;

use super::crop::{crop_filename, ELLIPSIS};

/// Highlight style of a span in a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// The current entry
    Current,
    /// Any other entry
    Entry,
    /// Leading or trailing marker for omitted entries
    Ellipsis,
}

/// A styled byte range of a [`StatusLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset into the line text
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    pub style: Style,
}

/// A single rendered line plus its highlight spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub spans: Vec<Span>,
}

impl StatusLine {
    /// Display width of the line in terminal cells
    pub fn width(&self) -> usize {
        self.text.width()
    }

    /// Span of the given style, if any. Returns the first match.
    pub fn span(&self, style: Style) -> Option<&Span> {
        self.spans.iter().find(|span| span.style == style)
    }

    /// Text covered by a span
    pub fn slice(&self, span: &Span) -> &str {
        &self.text[span.start..span.start + span.len]
    }

    fn push(&mut self, text: &str, style: Option<Style>) {
        if text.is_empty() {
            return;
        }
        if let Some(style) = style {
            self.spans.push(Span {
                start: self.text.len(),
                len: text.len(),
                style,
            });
        }
        self.text.push_str(text);
    }
}

/// Knobs for [`render_window`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum width of a single entry's file name
    pub name_width: usize,
    /// Text between entries
    pub separator: String,
    /// Marker for omitted entries
    pub ellipsis: String,
    /// Prefix every entry with its 1-based position
    pub numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            name_width: 24,
            separator: " ".to_string(),
            ellipsis: ELLIPSIS.to_string(),
            numbers: false,
        }
    }
}

/// Render the entries of `paths` around `current` into at most `width` cells.
///
/// Returns `None` for an empty list. The current entry is always present, cropped
/// further when it does not fit on its own; every other entry is only included
/// while the whole line still fits.
pub fn render_window<S: AsRef<str>>(
    paths: &[S],
    current: usize,
    width: usize,
    options: &RenderOptions,
) -> Option<StatusLine> {
    if paths.is_empty() {
        return None;
    }

    let last = paths.len() - 1;
    let current = current.min(last);

    let mut labels: Vec<String> = paths
        .iter()
        .enumerate()
        .map(|(idx, path)| entry_label(idx, path.as_ref(), options))
        .collect();

    let separator_width = options.separator.width();
    let marker_width = options.ellipsis.width() + separator_width;
    // brackets around the current entry
    let decoration = 2;

    let mut widths: Vec<usize> = labels.iter().map(|label| label.width()).collect();
    widths[current] += decoration;

    let total = |widths: &[usize], lo: usize, hi: usize| -> usize {
        let entries: usize = widths[lo..=hi].iter().sum::<usize>() + separator_width * (hi - lo);
        let leading = if lo > 0 { marker_width } else { 0 };
        let trailing = if hi < last { marker_width } else { 0 };
        entries + leading + trailing
    };

    if total(&widths, current, current) > width {
        let leading = if current > 0 { marker_width } else { 0 };
        let trailing = if current < last { marker_width } else { 0 };
        let room = width
            .saturating_sub(leading + trailing + decoration)
            .max(1);
        labels[current] = crop_filename(&labels[current], room).into_owned();
        widths[current] = labels[current].width() + decoration;
    }

    let (mut lo, mut hi) = (current, current);
    let (mut backward, mut forward) = (true, true);
    while backward || forward {
        if backward {
            if lo > 0 && total(&widths, lo - 1, hi) <= width {
                lo -= 1;
            } else {
                backward = false;
            }
        }
        if forward {
            if hi < last && total(&widths, lo, hi + 1) <= width {
                hi += 1;
            } else {
                forward = false;
            }
        }
    }

    let mut line = StatusLine::default();
    if lo > 0 {
        line.push(&options.ellipsis, Some(Style::Ellipsis));
        line.push(&options.separator, None);
    }
    for idx in lo..=hi {
        if idx > lo {
            line.push(&options.separator, None);
        }
        if idx == current {
            line.push(&format!("[{}]", labels[idx]), Some(Style::Current));
        } else {
            line.push(&labels[idx], Some(Style::Entry));
        }
    }
    if hi < last {
        line.push(&options.separator, None);
        line.push(&options.ellipsis, Some(Style::Ellipsis));
    }

    Some(line)
}

/// Display label of one entry: its file name, cropped, optionally numbered.
fn entry_label(idx: usize, path: &str, options: &RenderOptions) -> String {
    let name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);
    let name = crop_filename(name, options.name_width);

    if options.numbers {
        format!("{} {}", idx + 1, name)
    } else {
        name.into_owned()
    }
}
