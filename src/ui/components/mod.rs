//! Composable UI component renderers.
//!
//! Each component draws one part of the interface onto a
//! [`Canvas`](crate::ui::helpers::Canvas).
//!
//! # Components
//!
//! - [`header`]: Centered view title and drag overlay
//! - [`board`]: Tier rows and the unranked pool
//! - [`discover`]: Search results and browse listings
//! - [`detail`]: Single movie with recommendations
//! - [`empty`]: Empty state message
//! - [`footer`]: Status line and command hints

pub mod board;
pub mod detail;
pub mod discover;
pub mod empty;
pub mod footer;
pub mod header;

pub use board::render_board;
pub use detail::render_detail;
pub use discover::render_discover;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;

use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::DisplayItem;

/// Formats a movie card as `Title #id [badge]`.
fn item_cell(item: &DisplayItem, max_title: usize) -> String {
    let title = crate::ui::helpers::truncate(&item.title, max_title);
    match item.badge {
        Some(badge) => format!("{title} #{} [{}]", item.id, badge.label()),
        None => format!("{title} #{}", item.id),
    }
}

/// Draws a numbered list of cards, one per line, badges highlighted.
fn render_item_list(canvas: &mut Canvas<'_>, items: &[DisplayItem]) {
    let max_title = canvas.cols().saturating_sub(24).max(12);
    let width = items.len().to_string().len();

    for (idx, item) in items.iter().enumerate() {
        canvas.text(&format!("  {:>width$}. ", idx + 1));
        canvas.text(&crate::ui::helpers::truncate(&item.title, max_title));

        let id = format!(" #{}", item.id);
        match canvas.theme() {
            Some(theme) => canvas.dimmed(&id, &theme.colors.text_dim),
            None => canvas.text(&id),
        }

        if let Some(badge) = item.badge {
            let label = format!(" {} ", badge.label());
            canvas.text(" ");
            match canvas.theme() {
                Some(theme) => canvas.badge(&label, &theme.colors.badge_fg, &theme.colors.badge_bg),
                None => canvas.text(&format!("[{}]", badge.label())),
            }
        }
        canvas.newline();
    }
}
