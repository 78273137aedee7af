//! Detail component renderer.

use super::render_item_list;
use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::DetailViewModel;

/// Renders title, facts, overview and up to five recommendations.
pub fn render_detail(canvas: &mut Canvas<'_>, vm: &DetailViewModel) {
    let theme = canvas.theme();

    let mut title = vm.title.clone();
    if let Some(year) = &vm.year {
        title.push_str(&format!(" ({year})"));
    }
    canvas.bold(&title, theme.map(|t| t.colors.text_normal.as_str()));
    if let Some(badge) = vm.badge {
        canvas.text(&format!("  [{}]", badge.label()));
    }
    canvas.newline();

    if vm.is_loading && vm.overview.is_empty() {
        canvas.text("loading...");
        canvas.newline();
        return;
    }

    let mut facts = vec![format!("Rating {}", vm.rating)];
    if let Some(runtime) = &vm.runtime {
        facts.push(runtime.clone());
    }
    if !vm.genres.is_empty() {
        facts.push(vm.genres.clone());
    }
    let facts = facts.join("  ·  ");
    match theme {
        Some(theme) => canvas.dimmed(&facts, &theme.colors.text_dim),
        None => canvas.text(&facts),
    }
    canvas.newline();
    canvas.newline();

    for line in wrap_words(&vm.overview, canvas.cols().max(20)) {
        canvas.text(&line);
        canvas.newline();
    }

    if !vm.can_collect {
        canvas.newline();
        canvas.text("No poster available; this movie cannot be collected.");
        canvas.newline();
    }

    if !vm.recommendations.is_empty() {
        canvas.newline();
        match theme {
            Some(theme) => canvas.bold("Recommendations", Some(&theme.colors.section_fg)),
            None => canvas.text("Recommendations"),
        }
        canvas.newline();
        render_item_list(canvas, &vm.recommendations);
    }
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in words {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
