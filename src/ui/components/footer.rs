//! Footer component renderer.

use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::{FooterInfo, StatusLine};

/// Renders the status line (if any), a rule and the command hints.
pub fn render_footer(canvas: &mut Canvas<'_>, footer: &FooterInfo, status: Option<&StatusLine>) {
    let theme = canvas.theme();

    if let Some(status) = status {
        canvas.newline();
        match theme {
            Some(theme) if status.is_error => canvas.colored(&status.message, &theme.colors.error_fg),
            Some(theme) => canvas.colored(&status.message, &theme.colors.status_fg),
            None => canvas.text(&status.message),
        }
        canvas.newline();
    }

    if let Some(theme) = theme {
        canvas.rule(&theme.colors.border);
        canvas.dimmed(&footer.keybindings, &theme.colors.text_dim);
    } else {
        canvas.text(&footer.keybindings);
    }
    canvas.newline();
}
