//! Terminal color theme.
//!
//! The built-in theme uses the Catppuccin Mocha palette. Custom themes are
//! loaded from TOML files named by the `theme_file` configuration key. Tier row
//! colors are not part of the theme; they come from the tier definitions.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! section_fg = "#89b4fa"
//! badge_fg = "#1e1e2e"
//! badge_bg = "#f9e2af"
//! status_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! drag_fg = "#f5c2e7"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use watchtier::ui::theme::Theme;
//!
//! let theme = Theme::default();
//! let title = format!("{}{}Tier List{}", Theme::fg(&theme.colors.header_fg), Theme::bold(), Theme::reset());
//! assert!(title.ends_with("\u{1b}[0m"));
//! ```

use crate::domain::error::{Result, WatchTierError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colors as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Header band; none draws the title on the terminal background.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Normal text color.
    pub text_normal: String,
    /// Ids, hints and the footer.
    pub text_dim: String,

    /// Rules between header, body and footer.
    pub border: String,

    /// Section titles ("Trending Now", "Unranked").
    pub section_fg: String,

    /// Membership badge foreground.
    pub badge_fg: String,
    /// Membership badge background.
    pub badge_bg: String,

    /// Status line color.
    pub status_fg: String,
    /// Error line color.
    pub error_fg: String,

    /// Drag overlay color.
    pub drag_fg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Reads a theme written in the TOML format shown above.
    ///
    /// # Errors
    ///
    /// [`WatchTierError::Theme`] when the file is unreadable or a color key is
    /// missing or mistyped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| WatchTierError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| WatchTierError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// 24-bit foreground color escape for a `#rrggbb` color.
    ///
    /// Malformed colors render as white rather than failing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use watchtier::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ef4444"), "\u{1b}[38;2;239;68;68m");
    /// assert_eq!(Theme::fg("red"), "\u{1b}[38;2;255;255;255m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        truecolor(38, hex)
    }

    /// 24-bit background color escape for a `#rrggbb` color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        truecolor(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears every attribute set by the other escapes.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

fn truecolor(selector: u8, hex: &str) -> String {
    let (r, g, b) = parse_hex(hex).unwrap_or((255, 255, 255));
    format!("\u{001b}[{selector};2;{r};{g};{b}m")
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl Default for Theme {
    /// Returns the built-in Catppuccin Mocha theme.
    fn default() -> Self {
        Self {
            name: "catppuccin-mocha".to_string(),
            colors: ThemeColors {
                header_fg: "#cdd6f4".to_string(),
                header_bg: None,
                text_normal: "#cdd6f4".to_string(),
                text_dim: "#6c7086".to_string(),
                border: "#45475a".to_string(),
                section_fg: "#89b4fa".to_string(),
                badge_fg: "#1e1e2e".to_string(),
                badge_bg: "#f9e2af".to_string(),
                status_fg: "#a6e3a1".to_string(),
                error_fg: "#f38ba8".to_string(),
                drag_fg: "#f5c2e7".to_string(),
                empty_state_fg: "#89b4fa".to_string(),
            },
        }
    }
}
