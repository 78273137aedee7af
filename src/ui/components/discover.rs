//! Discover component renderer: search box, section title, listing, pager.

use super::{render_empty_state, render_item_list};
use crate::domain::GENRES;
use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::DiscoverViewModel;

pub fn render_discover(canvas: &mut Canvas<'_>, vm: &DiscoverViewModel) {
    let theme = canvas.theme();

    canvas.text(&format!("Search: {}", vm.query));
    canvas.newline();

    let genres: Vec<&str> = GENRES.iter().map(|g| g.name).collect();
    let genres = format!("Genres: Trending, {}", genres.join(", "));
    match theme {
        Some(theme) => canvas.dimmed(&genres, &theme.colors.text_dim),
        None => canvas.text(&genres),
    }
    canvas.newline();
    canvas.newline();

    match theme {
        Some(theme) => canvas.bold(&vm.section_title, Some(&theme.colors.section_fg)),
        None => canvas.text(&vm.section_title),
    }
    if vm.is_loading {
        canvas.text("  loading...");
    }
    canvas.newline();

    if let Some(empty) = &vm.empty_state {
        render_empty_state(canvas, empty);
        return;
    }

    render_item_list(canvas, &vm.items);

    if let Some(page) = vm.page {
        canvas.newline();
        let pager = if page > 1 {
            format!("Page {page}  (prev / next)")
        } else {
            format!("Page {page}  (next)")
        };
        match theme {
            Some(theme) => canvas.dimmed(&pager, &theme.colors.text_dim),
            None => canvas.text(&pager),
        }
        canvas.newline();
    }
}
