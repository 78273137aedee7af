//! User interface rendering layer with component-based architecture.
//!
//! This module transforms view models into text, ANSI-styled for the terminal or
//! plain for export, through composable rendering components.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Canvas and text layout utilities
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//! - [`export`]: Writing the board to a text file

pub mod components;
pub mod export;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use export::export_board;
pub use renderer::{render, render_board_plain, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    Badge, BoardViewModel, DetailViewModel, DiscoverViewModel, DisplayItem, EmptyState,
    FooterInfo, HeaderInfo, StatusLine, TierRow, UIViewModel, ViewBody,
};
