//! Header component renderer.

use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title, then the drag overlay line if a drag is active.
pub fn render_header(canvas: &mut Canvas<'_>, header: &HeaderInfo, dragging: Option<&str>) {
    let theme = canvas.theme();

    canvas.centered(&header.title, theme.map(|t| t.colors.header_fg.as_str()), true);
    canvas.newline();
    if let Some(theme) = theme {
        canvas.rule(&theme.colors.border);
    }

    if let Some(title) = dragging {
        let overlay = format!("Dragging: {title}");
        match theme {
            Some(theme) => canvas.bold(&overlay, Some(&theme.colors.drag_fg)),
            None => canvas.text(&overlay),
        }
        canvas.newline();
    }
}
