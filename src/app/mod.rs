//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! front end (the CLI and interactive shell in `main.rs`, driven through
//! [`crate::runtime`]) and the domain, storage and worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Intent → Events → Event Handler → State Mutations → Actions → Side Effects
//!                             ↑                                  ↓
//!                             └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Quiet-interval debouncing of typed queries
//! - [`dnd`]: Drag-and-drop coordinator
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View state types
//! - [`state`]: Central application state container and view model computation
//! - [`store`]: Collection store owning the pool and tier rows
//!
//! # Example
//!
//! ```rust
//! use watchtier::app::{handle_event, AppState, Event, TierStore};
//! use watchtier::ui::Theme;
//!
//! let mut state = AppState::new(TierStore::in_memory(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::ShowDiscover)?;
//! assert_eq!(actions.len(), 1); // trending request
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod dnd;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::Action;
pub use debounce::Debouncer;
pub use dnd::{DragCoordinator, DragPayload, DropOutcome, DropTarget};
pub use handler::{handle_event, Event, DEFAULT_EXPORT_NAME};
pub use modes::View;
pub use state::AppState;
pub use store::{BrowseKind, FetchOutcome, Placement, TierStore, TierToggle};
