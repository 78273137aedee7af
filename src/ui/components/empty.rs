//! Empty state component renderer.

use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message.
///
/// The message uses the `empty_state_fg` theme color, the subtitle `text_dim`
/// with dim styling.
pub fn render_empty_state(canvas: &mut Canvas<'_>, empty: &EmptyState) {
    let theme = canvas.theme();

    canvas.newline();
    canvas.centered(&empty.message, theme.map(|t| t.colors.empty_state_fg.as_str()), false);
    canvas.newline();
    match theme {
        Some(theme) => {
            let len = empty.subtitle.chars().count();
            let padding = canvas.cols().saturating_sub(len) / 2;
            canvas.text(&" ".repeat(padding));
            canvas.dimmed(&empty.subtitle, &theme.colors.text_dim);
        }
        None => canvas.centered(&empty.subtitle, None, false),
    }
    canvas.newline();
}
