//! Board component renderer.
//!
//! Layout, one block per tier, then the pool:
//!
//! ```text
//!  S │ The Matrix #603  Heat #949
//!  A │ Inception #27205
//!  B │
//!  C │
//!  D │
//!
//! Unranked (1)
//!   Ronin #8195
//! ```
//!
//! Long rows wrap under the label column.

use super::item_cell;
use crate::ui::helpers::{wrap_cells, Canvas};
use crate::ui::viewmodel::BoardViewModel;

const LABEL_WIDTH: usize = 5;
const MAX_TITLE: usize = 32;

pub fn render_board(canvas: &mut Canvas<'_>, board: &BoardViewModel) {
    let theme = canvas.theme();
    let width = canvas.cols().saturating_sub(LABEL_WIDTH).max(20);

    for row in &board.rows {
        let cells: Vec<String> = row.items.iter().map(|i| item_cell(i, MAX_TITLE)).collect();
        let lines = wrap_cells(&cells, width);

        canvas.text(" ");
        canvas.bold(&format!("{:<2}", row.label), Some(&row.color));
        canvas.text("│ ");
        canvas.text(lines.first().map_or("", String::as_str));
        canvas.newline();

        for line in lines.iter().skip(1) {
            canvas.text(&format!("{:<3}│ {line}", ""));
            canvas.newline();
        }
    }

    canvas.newline();
    let heading = format!("Unranked ({})", board.pool.len());
    match theme {
        Some(theme) => canvas.bold(&heading, Some(&theme.colors.section_fg)),
        None => canvas.text(&heading),
    }
    canvas.newline();

    if board.pool.is_empty() {
        let hint = "  Add movies from Discover to start ranking";
        match theme {
            Some(theme) => canvas.dimmed(hint, &theme.colors.text_dim),
            None => canvas.text(hint),
        }
        canvas.newline();
        return;
    }

    let cells: Vec<String> = board.pool.iter().map(|i| item_cell(i, MAX_TITLE)).collect();
    for line in wrap_cells(&cells, canvas.cols().saturating_sub(2).max(20)) {
        canvas.text(&format!("  {line}"));
        canvas.newline();
    }
}
