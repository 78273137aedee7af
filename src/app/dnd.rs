//! Drag-and-drop coordinator.
//!
//! Turns a drag gesture (start, then drop or cancel) into exactly one
//! [`TierStore`] mutation, or none. The coordinator holds no movie state of its
//! own beyond the drag in progress; every placement decision reads the store at
//! drop time.
//!
//! # State Machine
//!
//! ```text
//!          start(payload)             drop_on(target) / cancel()
//!   Idle ─────────────────▶ Dragging ───────────────────────────▶ Idle
//! ```
//!
//! Dropping and cancelling both return to `Idle` unconditionally, whatever the
//! outcome of the drop.

use super::store::{TierStore, TierToggle};
use crate::domain::error::Result;
use crate::domain::{Movie, MovieId, TierId};
use std::fmt;

/// What is being dragged and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// An item of the search or browse results.
    SearchItem(Movie),
    /// An item of the unranked pool.
    PoolItem(Movie),
    /// An item already placed in a tier, identified by id.
    TierItem(MovieId),
}

/// Where a drag was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A tier row container.
    Tier(TierId),
    /// A movie card; its container is resolved at drop time.
    Movie(MovieId),
    /// The pool container.
    Pool,
}

/// Container a drop target resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Tier(TierId),
    Pool,
}

/// Why a drop changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// No drag was in progress.
    NotDragging,
    /// Released outside any container.
    NoTarget,
    /// The target movie is not on the board.
    UnknownTarget,
    /// The dragged tier item is no longer in any tier.
    SourceMissing,
    /// Dropped back where it already was.
    SamePosition,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotDragging => "no drag in progress",
            Self::NoTarget => "dropped outside any row",
            Self::UnknownTarget => "drop target not found",
            Self::SourceMissing => "dragged movie not found",
            Self::SamePosition => "position unchanged",
        };
        f.write_str(text)
    }
}

/// What a drop did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A search or pool item was appended to a tier.
    Placed { movie: MovieId, tier: TierId },
    /// A search or pool item was dropped on the tier already holding it.
    ToggledOff { movie: MovieId, tier: TierId },
    /// A tier item moved within its own tier.
    Reordered { tier: TierId, from: usize, to: usize },
    /// A tier item moved to another tier at `index`.
    Moved { movie: MovieId, from: TierId, to: TierId, index: usize },
    /// A tier item was returned to the pool.
    Unranked { movie: MovieId, from: TierId },
    /// A search item was added to the pool.
    Pooled { movie: MovieId },
    /// Nothing changed.
    NoOp(NoOpReason),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        active_movie: Option<Movie>,
    },
}

/// Tracks the drag in progress and resolves drops into store mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragCoordinator {
    phase: Phase,
}

impl DragCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// The movie being dragged, for overlay rendering.
    #[must_use]
    pub fn active_movie(&self) -> Option<&Movie> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Dragging { active_movie, .. } => active_movie.as_ref(),
        }
    }

    /// Enters `Dragging` with `payload`, replacing any drag in progress.
    ///
    /// A tier item's movie is looked up across all tiers.
    pub fn start(&mut self, payload: DragPayload, store: &TierStore) {
        let active_movie = match &payload {
            DragPayload::SearchItem(movie) | DragPayload::PoolItem(movie) => Some(movie.clone()),
            DragPayload::TierItem(id) => store
                .find_ranked(*id)
                .map(|(tier, idx)| store.tier(tier).movies[idx].clone()),
        };

        tracing::debug!(
            ?payload,
            resolved = active_movie.is_some(),
            "drag started"
        );
        self.phase = Phase::Dragging {
            payload,
            active_movie,
        };
    }

    /// Abandons the drag in progress.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            tracing::debug!("drag cancelled");
        }
        self.phase = Phase::Idle;
    }

    /// Resolves a drop on `target` and applies the matching store mutation.
    ///
    /// `None` means the drag was released outside every container. The
    /// coordinator is back in `Idle` when this returns, even on error.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting store mutation cannot be persisted.
    pub fn drop_on(&mut self, target: Option<DropTarget>, store: &mut TierStore) -> Result<DropOutcome> {
        let Phase::Dragging { payload, .. } = std::mem::take(&mut self.phase) else {
            return Ok(DropOutcome::NoOp(NoOpReason::NotDragging));
        };

        let _span = tracing::debug_span!("drag_drop", ?payload, ?target).entered();

        let outcome = Self::resolve(payload, target, store)?;
        tracing::debug!(?outcome, "drop resolved");
        Ok(outcome)
    }

    fn resolve(payload: DragPayload, target: Option<DropTarget>, store: &mut TierStore) -> Result<DropOutcome> {
        let Some(target) = target else {
            return Ok(DropOutcome::NoOp(NoOpReason::NoTarget));
        };
        let Some(container) = resolve_container(target, store) else {
            return Ok(DropOutcome::NoOp(NoOpReason::UnknownTarget));
        };

        match (payload, container) {
            (DragPayload::SearchItem(movie) | DragPayload::PoolItem(movie), Container::Tier(tier)) => {
                let id = movie.id;
                Ok(match store.add_movie_to_tier(movie, tier)? {
                    TierToggle::Placed => DropOutcome::Placed { movie: id, tier },
                    TierToggle::ToggledOff => DropOutcome::ToggledOff { movie: id, tier },
                })
            }

            (DragPayload::SearchItem(movie), Container::Pool) => {
                let id = movie.id;
                if store.add_to_pool(movie)? {
                    Ok(DropOutcome::Pooled { movie: id })
                } else {
                    Ok(DropOutcome::NoOp(NoOpReason::SamePosition))
                }
            }

            (DragPayload::PoolItem(_), Container::Pool) => Ok(DropOutcome::NoOp(NoOpReason::SamePosition)),

            (DragPayload::TierItem(id), Container::Pool) => {
                let Some((from, idx)) = store.find_ranked(id) else {
                    return Ok(DropOutcome::NoOp(NoOpReason::SourceMissing));
                };
                let movie = store.tier(from).movies[idx].clone();
                store.unrank_movie(movie, from)?;
                Ok(DropOutcome::Unranked { movie: id, from })
            }

            (DragPayload::TierItem(id), Container::Tier(to)) => {
                let Some((from, old_index)) = store.find_ranked(id) else {
                    return Ok(DropOutcome::NoOp(NoOpReason::SourceMissing));
                };

                if from == to {
                    reorder_within(store, id, to, old_index, target)
                } else {
                    move_across(store, id, from, old_index, to, target)
                }
            }
        }
    }
}

/// Maps a drop target onto the container that receives the drop.
fn resolve_container(target: DropTarget, store: &TierStore) -> Option<Container> {
    match target {
        DropTarget::Tier(tier) => Some(Container::Tier(tier)),
        DropTarget::Pool => Some(Container::Pool),
        DropTarget::Movie(id) => {
            if let Some((tier, _)) = store.find_ranked(id) {
                Some(Container::Tier(tier))
            } else if store.pool().iter().any(|m| m.id == id) {
                Some(Container::Pool)
            } else {
                None
            }
        }
    }
}

/// Same-tier drop: only a drop onto another item of the row moves anything.
fn reorder_within(
    store: &mut TierStore,
    id: MovieId,
    tier: TierId,
    old_index: usize,
    target: DropTarget,
) -> Result<DropOutcome> {
    let new_index = match target {
        DropTarget::Movie(over) => store.tier(tier).position(over),
        DropTarget::Tier(_) | DropTarget::Pool => None,
    };

    let Some(new_index) = new_index.filter(|&n| n != old_index) else {
        return Ok(DropOutcome::NoOp(NoOpReason::SamePosition));
    };

    let movies = array_move(&store.tier(tier).movies, old_index, new_index);
    store.update_tier_movies(tier, movies)?;
    tracing::debug!(movie_id = id, from = old_index, to = new_index, "reordered within tier");

    Ok(DropOutcome::Reordered {
        tier,
        from: old_index,
        to: new_index,
    })
}

/// Cross-tier drop: insert before the target item, or append on the container.
fn move_across(
    store: &mut TierStore,
    id: MovieId,
    from: TierId,
    old_index: usize,
    to: TierId,
    target: DropTarget,
) -> Result<DropOutcome> {
    let mut source = store.tier(from).movies.clone();
    let moved = source.remove(old_index);

    let mut destination = store.tier(to).movies.clone();
    let index = match target {
        DropTarget::Movie(over) => destination.iter().position(|m| m.id == over),
        DropTarget::Tier(_) | DropTarget::Pool => None,
    }
    .unwrap_or(destination.len());
    destination.insert(index, moved);

    store.move_between(from, source, to, destination)?;

    Ok(DropOutcome::Moved {
        movie: id,
        from,
        to,
        index,
    })
}

/// Returns `items` with the element at `from` relocated to `to`.
///
/// Every other element keeps its relative order. Out-of-range indices return an
/// unchanged copy.
///
/// # Examples
///
/// ```
/// use watchtier::app::dnd::array_move;
///
/// assert_eq!(array_move(&[1, 2, 3], 0, 2), vec![2, 3, 1]);
/// assert_eq!(array_move(&[1, 2, 3], 2, 0), vec![3, 1, 2]);
/// ```
#[must_use]
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() || to >= out.len() {
        return out;
    }
    let item = out.remove(from);
    out.insert(to, item);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Placement;

    fn movie(id: MovieId) -> Movie {
        Movie::new(id, format!("Movie {id}"), format!("https://img/{id}.jpg"))
    }

    fn tier_ids(store: &TierStore, tier: TierId) -> Vec<MovieId> {
        store.tier(tier).movies.iter().map(|m| m.id).collect()
    }

    fn board(rows: &[(TierId, &[MovieId])]) -> TierStore {
        let mut store = TierStore::in_memory();
        for (tier, ids) in rows {
            for id in *ids {
                store.add_movie_to_tier(movie(*id), *tier).unwrap();
            }
        }
        store
    }

    #[test]
    fn pool_item_dropped_on_tier_is_ranked() {
        let mut store = TierStore::in_memory();
        store.add_to_pool(movie(1)).unwrap();
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::PoolItem(movie(1)), &store);
        assert_eq!(dnd.active_movie().map(|m| m.id), Some(1));
        let outcome = dnd.drop_on(Some(DropTarget::Tier(TierId::S)), &mut store).unwrap();

        assert_eq!(outcome, DropOutcome::Placed { movie: 1, tier: TierId::S });
        assert!(store.pool().is_empty());
        assert!(!dnd.is_dragging());
        assert!(dnd.active_movie().is_none());
    }

    #[test]
    fn search_item_dropped_on_item_appends_to_its_tier() {
        let mut store = board(&[(TierId::A, &[1, 2])]);
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::SearchItem(movie(9)), &store);
        dnd.drop_on(Some(DropTarget::Movie(1)), &mut store).unwrap();

        assert_eq!(tier_ids(&store, TierId::A), vec![1, 2, 9]);
    }

    #[test]
    fn reorder_within_tier_moves_single_element() {
        let mut store = board(&[(TierId::A, &[1, 2, 3])]);
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::TierItem(1), &store);
        let outcome = dnd.drop_on(Some(DropTarget::Movie(3)), &mut store).unwrap();

        assert_eq!(outcome, DropOutcome::Reordered { tier: TierId::A, from: 0, to: 2 });
        assert_eq!(tier_ids(&store, TierId::A), vec![2, 3, 1]);
    }

    #[test]
    fn drop_on_own_container_is_noop() {
        let mut store = board(&[(TierId::A, &[1, 2])]);
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::TierItem(2), &store);
        let outcome = dnd.drop_on(Some(DropTarget::Tier(TierId::A)), &mut store).unwrap();

        assert_eq!(outcome, DropOutcome::NoOp(NoOpReason::SamePosition));
        assert_eq!(tier_ids(&store, TierId::A), vec![1, 2]);
    }

    #[test]
    fn cross_tier_drop_inserts_before_target_item() {
        let mut store = board(&[(TierId::A, &[1, 2]), (TierId::B, &[3])]);
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::TierItem(1), &store);
        let outcome = dnd.drop_on(Some(DropTarget::Movie(3)), &mut store).unwrap();

        assert_eq!(
            outcome,
            DropOutcome::Moved { movie: 1, from: TierId::A, to: TierId::B, index: 0 }
        );
        assert_eq!(tier_ids(&store, TierId::A), vec![2]);
        assert_eq!(tier_ids(&store, TierId::B), vec![1, 3]);
    }

    #[test]
    fn cross_tier_drop_on_container_appends() {
        let mut store = board(&[(TierId::A, &[1, 2]), (TierId::D, &[3])]);
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::TierItem(2), &store);
        dnd.drop_on(Some(DropTarget::Tier(TierId::D)), &mut store).unwrap();

        assert_eq!(tier_ids(&store, TierId::D), vec![3, 2]);
    }

    #[test]
    fn tier_item_dropped_on_pool_is_unranked() {
        let mut store = board(&[(TierId::C, &[5])]);
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::TierItem(5), &store);
        let outcome = dnd.drop_on(Some(DropTarget::Pool), &mut store).unwrap();

        assert_eq!(outcome, DropOutcome::Unranked { movie: 5, from: TierId::C });
        assert_eq!(store.pool()[0].id, 5);
    }

    #[test]
    fn drop_outside_or_unknown_changes_nothing() {
        let mut store = board(&[(TierId::A, &[1])]);
        let before = store.snapshot();
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::TierItem(1), &store);
        assert_eq!(
            dnd.drop_on(None, &mut store).unwrap(),
            DropOutcome::NoOp(NoOpReason::NoTarget)
        );

        dnd.start(DragPayload::TierItem(1), &store);
        assert_eq!(
            dnd.drop_on(Some(DropTarget::Movie(404)), &mut store).unwrap(),
            DropOutcome::NoOp(NoOpReason::UnknownTarget)
        );

        dnd.start(DragPayload::TierItem(77), &store);
        assert!(dnd.active_movie().is_none());
        assert_eq!(
            dnd.drop_on(Some(DropTarget::Tier(TierId::B)), &mut store).unwrap(),
            DropOutcome::NoOp(NoOpReason::SourceMissing)
        );

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn cancel_returns_to_idle_without_mutation() {
        let mut store = TierStore::in_memory();
        let mut dnd = DragCoordinator::new();

        dnd.start(DragPayload::SearchItem(movie(1)), &store);
        dnd.cancel();

        assert!(!dnd.is_dragging());
        assert_eq!(
            dnd.drop_on(Some(DropTarget::Tier(TierId::S)), &mut store).unwrap(),
            DropOutcome::NoOp(NoOpReason::NotDragging)
        );
        assert_eq!(store.ranked_count(), 0);
    }

    #[test]
    fn failed_save_during_cross_tier_drop_keeps_the_movie_on_the_board() {
        use crate::domain::WatchTierError;
        use crate::storage::{PersistedBoard, Storage};
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::{Arc, Mutex};

        struct BrokenDisk {
            failing: Arc<AtomicBool>,
            saved: Arc<Mutex<Option<PersistedBoard>>>,
        }

        impl Storage for BrokenDisk {
            fn load(&self) -> Result<Option<PersistedBoard>> {
                Ok(None)
            }

            fn save(&mut self, board: &PersistedBoard) -> Result<()> {
                if self.failing.load(Ordering::SeqCst) {
                    return Err(WatchTierError::Storage("disk full".to_string()));
                }
                *self.saved.lock().unwrap() = Some(board.clone());
                Ok(())
            }
        }

        let failing = Arc::new(AtomicBool::new(false));
        let saved = Arc::new(Mutex::new(None));
        let disk = BrokenDisk {
            failing: Arc::clone(&failing),
            saved: Arc::clone(&saved),
        };
        let mut store = TierStore::with_storage(Box::new(disk)).unwrap();
        store.add_movie_to_tier(movie(1), TierId::A).unwrap();
        store.add_movie_to_tier(movie(3), TierId::B).unwrap();
        let last_good = saved.lock().unwrap().clone().unwrap();

        failing.store(true, Ordering::SeqCst);
        let mut dnd = DragCoordinator::new();
        dnd.start(DragPayload::TierItem(1), &store);
        let result = dnd.drop_on(Some(DropTarget::Movie(3)), &mut store);

        assert!(matches!(result, Err(WatchTierError::Storage(_))));
        assert_eq!(store.placement_of(1), Placement::Tier(TierId::B));
        assert!(tier_ids(&store, TierId::A).is_empty());
        assert_eq!(tier_ids(&store, TierId::B), vec![1, 3]);
        assert_eq!(saved.lock().unwrap().clone(), Some(last_good));
    }

    #[test]
    fn array_move_ignores_out_of_range() {
        assert_eq!(array_move(&[1, 2], 0, 5), vec![1, 2]);
    }
}
