//! Shared rendering utilities.
//!
//! Components draw into a [`Canvas`], a line buffer that either emits ANSI
//! styling from a [`Theme`] or, for export, plain text only. Every width
//! computation counts characters, not bytes.
//!
//! # Example
//!
//! ```rust
//! use watchtier::ui::helpers::{truncate, Canvas};
//!
//! let mut canvas = Canvas::plain(20);
//! canvas.text(&truncate("Dr. Strangelove or: How I Learned", 12));
//! canvas.newline();
//! assert_eq!(canvas.finish(), "Dr. Strang...\n");
//! ```

use crate::ui::theme::Theme;

/// Line buffer with optional styling.
#[derive(Debug)]
pub struct Canvas<'a> {
    out: String,
    theme: Option<&'a Theme>,
    cols: usize,
}

impl<'a> Canvas<'a> {
    /// Canvas emitting ANSI styling from `theme`.
    #[must_use]
    pub fn styled(theme: &'a Theme, cols: usize) -> Self {
        Self {
            out: String::new(),
            theme: Some(theme),
            cols,
        }
    }

    /// Canvas emitting text only.
    #[must_use]
    pub fn plain(cols: usize) -> Self {
        Self {
            out: String::new(),
            theme: None,
            cols,
        }
    }

    /// Terminal width in columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Active theme, `None` on a plain canvas.
    #[must_use]
    pub const fn theme(&self) -> Option<&'a Theme> {
        self.theme
    }

    pub fn text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Writes `text` in foreground color `hex`.
    pub fn colored(&mut self, text: &str, hex: &str) {
        self.paint(text, Some(hex), None, false);
    }

    /// Writes `text` bold, optionally colored.
    pub fn bold(&mut self, text: &str, hex: Option<&str>) {
        self.paint(text, hex, None, true);
    }

    /// Writes `text` dimmed in color `hex`.
    pub fn dimmed(&mut self, text: &str, hex: &str) {
        if self.theme.is_some() {
            self.out.push_str(Theme::dim());
        }
        self.paint(text, Some(hex), None, false);
    }

    /// Writes `text` with foreground and background colors.
    pub fn badge(&mut self, text: &str, fg: &str, bg: &str) {
        self.paint(text, Some(fg), Some(bg), false);
    }

    /// Writes `text` centered over the full width.
    pub fn centered(&mut self, text: &str, hex: Option<&str>, bold: bool) {
        let len = text.chars().count();
        let padding = self.cols.saturating_sub(len) / 2;
        self.out.push_str(&" ".repeat(padding));
        self.paint(text, hex, None, bold);
    }

    /// Full-width horizontal rule.
    pub fn rule(&mut self, hex: &str) {
        let line = "─".repeat(self.cols);
        self.colored(&line, hex);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn paint(&mut self, text: &str, fg: Option<&str>, bg: Option<&str>, bold: bool) {
        if self.theme.is_none() {
            self.out.push_str(text);
            return;
        }
        if bold {
            self.out.push_str(Theme::bold());
        }
        if let Some(fg) = fg {
            self.out.push_str(&Theme::fg(fg));
        }
        if let Some(bg) = bg {
            self.out.push_str(&Theme::bg(bg));
        }
        self.out.push_str(text);
        self.out.push_str(Theme::reset());
    }
}

/// Shortens `text` to at most `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let head: String = text.chars().take(keep).collect();
    format!("{head}...")
}

/// Packs `cells` into lines no wider than `width`, separated by two spaces.
///
/// A single cell wider than `width` gets a line of its own.
#[must_use]
pub fn wrap_cells(cells: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for cell in cells {
        let len = cell.chars().count();
        if current_len > 0 && current_len + 2 + len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push_str("  ");
            current_len += 2;
        }
        current.push_str(cell);
        current_len += len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
