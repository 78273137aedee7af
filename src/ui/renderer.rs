//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! Output is returned as a string; the caller decides where it goes (the
//! terminal, or an export file for the plain variant).
//!
//! # Example
//!
//! ```rust
//! use watchtier::app::{AppState, TierStore};
//! use watchtier::ui::{render, Theme};
//!
//! let state = AppState::new(TierStore::in_memory(), Theme::default());
//! let screen = render(&state, 80);
//! assert!(screen.contains("Trending Now"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BoardViewModel, UIViewModel, ViewBody};

/// Renders the current view with theme colors.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, Some(&state.theme), cols)
}

/// Renders a view model; `theme: None` produces plain text.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: Option<&Theme>, cols: usize) -> String {
    let mut canvas = theme.map_or_else(|| Canvas::plain(cols), |t| Canvas::styled(t, cols));

    components::render_header(&mut canvas, &vm.header, vm.dragging.as_deref());
    match &vm.body {
        ViewBody::Board(board) => components::render_board(&mut canvas, board),
        ViewBody::Discover(discover) => components::render_discover(&mut canvas, discover),
        ViewBody::Detail(detail) => components::render_detail(&mut canvas, detail),
    }
    components::render_footer(&mut canvas, &vm.footer, vm.status.as_ref());

    canvas.finish()
}

/// Renders only the board, without header, footer or styling.
#[must_use]
pub fn render_board_plain(board: &BoardViewModel, cols: usize) -> String {
    let mut canvas = Canvas::plain(cols);
    components::render_board(&mut canvas, board);
    canvas.finish()
}
