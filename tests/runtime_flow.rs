//! End-to-end flows through the runtime: commands in, worker responses back,
//! store and board out.

mod common;

use common::{detail, persistent_runtime, posterless, raw, runtime, FakeCatalog, IMAGE_BASE};
use std::sync::Arc;
use std::time::{Duration, Instant};
use watchtier::app::{Debouncer, Event, View};
use watchtier::cli::{Command, MoveTarget};
use watchtier::domain::{MovieId, TierId, WatchTierError};

fn ids(movies: &[watchtier::domain::Movie]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}

fn cmd(reference: &str) -> String {
    reference.to_string()
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overlapping_searches_keep_the_newest_dispatch() {
    let catalog = Arc::new(
        FakeCatalog::new()
            .with_search("matr", Duration::from_millis(150), vec![raw(1, "Matrimony")])
            .with_search("matrix", Duration::ZERO, vec![raw(603, "The Matrix")]),
    );
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.dispatch(Event::SubmitSearch("matr".to_string())).unwrap();
    rt.dispatch(Event::SubmitSearch("matrix".to_string())).unwrap();
    assert!(rt.state().store.is_loading());

    rt.settle().await.unwrap();

    assert_eq!(ids(rt.state().store.search_results()), vec![603]);
    assert!(!rt.state().store.is_loading());
    assert_eq!(catalog.calls().len(), 2);
}

#[tokio::test]
async fn blank_search_clears_results_without_a_request() {
    let catalog = Arc::new(FakeCatalog::new().with_search(
        "heat",
        Duration::ZERO,
        vec![raw(949, "Heat")],
    ));
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Search { query: vec![cmd("heat")] }).await.unwrap();
    rt.settle().await.unwrap();
    assert_eq!(ids(rt.state().store.search_results()), vec![949]);

    rt.run_command(Command::Search { query: vec![cmd("   ")] }).await.unwrap();

    assert_eq!(rt.pending(), 0);
    assert!(rt.state().store.search_results().is_empty());
    assert_eq!(catalog.calls(), vec!["search:heat".to_string()]);
}

#[tokio::test]
async fn typed_query_searches_once_after_the_quiet_interval() {
    let catalog = Arc::new(FakeCatalog::new().with_search(
        "alien",
        Duration::ZERO,
        vec![raw(348, "Alien")],
    ));
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());
    rt.state_mut().debouncer = Debouncer::new(Duration::from_millis(50));

    let start = Instant::now();
    rt.dispatch(Event::QueryChanged { text: "ali".to_string(), at: start }).unwrap();
    rt.dispatch(Event::QueryChanged { text: "alien".to_string(), at: start }).unwrap();

    assert!(!rt.tick(start + Duration::from_millis(10)).unwrap());
    assert_eq!(rt.pending(), 0);

    assert!(rt.tick(start + Duration::from_millis(60)).unwrap());
    assert!(!rt.tick(start + Duration::from_millis(120)).unwrap());
    rt.settle().await.unwrap();

    assert_eq!(catalog.calls(), vec!["search:alien".to_string()]);
    assert_eq!(ids(rt.state().discover_results()), vec![348]);
}

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trending_drops_posterless_items() {
    let catalog = Arc::new(FakeCatalog::new().with_trending(
        1,
        vec![raw(1, "Dune"), posterless(2, "Untitled"), raw(3, "Oppenheimer")],
    ));
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Trending { page: 1 }).await.unwrap();
    rt.settle().await.unwrap();

    let results = rt.state().store.browse_results();
    assert_eq!(ids(results), vec![1, 3]);
    assert!(results[0].poster_url.starts_with(IMAGE_BASE));
    assert_eq!(rt.state().discover_title(), "Trending Now");
}

#[tokio::test]
async fn genre_paging_follows_the_active_genre() {
    let catalog = Arc::new(
        FakeCatalog::new()
            .with_genre(35, 1, vec![raw(10, "Airplane!")])
            .with_genre(35, 2, vec![raw(11, "Hot Shots!")]),
    );
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Genre { genre: cmd("comedy"), page: 1 }).await.unwrap();
    rt.settle().await.unwrap();
    rt.run_command(Command::Next).await.unwrap();
    rt.settle().await.unwrap();

    assert_eq!(rt.state().store.current_page(), 2);
    assert_eq!(rt.state().store.active_genre(), Some(35));
    assert_eq!(ids(rt.state().store.browse_results()), vec![11]);
    assert_eq!(rt.state().discover_title(), "Comedy Movies");

    rt.run_command(Command::Prev).await.unwrap();
    rt.settle().await.unwrap();
    assert_eq!(rt.state().store.current_page(), 1);
}

#[tokio::test]
async fn failed_browse_keeps_previous_results() {
    let catalog = Arc::new(FakeCatalog::new().failing());
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Trending { page: 1 }).await.unwrap();
    rt.settle().await.unwrap();

    let store = &rt.state().store;
    assert!(!store.is_loading());
    assert!(store.browse_results().is_empty());
    assert!(store.last_error().is_some_and(|e| e.contains("service unavailable")));
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_loads_recommendations() {
    let catalog = Arc::new(FakeCatalog::new().with_detail(
        detail(550, "Fight Club"),
        vec![raw(807, "Se7en"), posterless(1, "Nope"), raw(680, "Pulp Fiction")],
    ));
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Detail { reference: cmd("550") }).await.unwrap();
    rt.settle().await.unwrap();

    assert_eq!(rt.state().view, View::Detail(550));
    let loaded = rt.state().detail.as_ref().unwrap();
    assert_eq!(loaded.movie.title, "Fight Club");
    assert_eq!(ids(&loaded.recommendations), vec![807, 680]);
    assert!(!rt.state().detail_loading);
}

#[tokio::test]
async fn adding_an_unknown_id_fetches_it_first() {
    let catalog = Arc::new(FakeCatalog::new().with_detail(detail(550, "Fight Club"), vec![]));
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Board).await.unwrap();
    rt.run_command(Command::Add { reference: cmd("550") }).await.unwrap();

    assert_eq!(ids(rt.state().store.pool()), vec![550]);
    assert_eq!(catalog.calls(), vec!["detail:550".to_string()]);
    assert_eq!(rt.state().view, View::Board);
    assert!(rt.state().detail.is_none());
    assert_eq!(rt.pending(), 0);
}

#[tokio::test]
async fn failed_lookup_ranks_nothing_and_keeps_the_view() {
    let catalog = Arc::new(FakeCatalog::new());
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Rank { reference: cmd("#77"), tier: TierId::A })
        .await
        .unwrap();

    assert_eq!(rt.state().store.ranked_count(), 0);
    assert_eq!(rt.state().view, View::Discover);
    assert!(rt.state().store.last_error().is_some_and(|e| e.contains("movie 77 not found")));
    assert!(rt.state().status.as_deref().is_some_and(|s| s.contains("No movie matches")));
}

#[tokio::test]
async fn unknown_reference_reports_without_changes() {
    let catalog = Arc::new(FakeCatalog::new());
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Rank { reference: cmd("nothing here"), tier: TierId::S })
        .await
        .unwrap();

    assert_eq!(rt.state().store.ranked_count(), 0);
    assert!(rt.state().status.as_deref().is_some_and(|s| s.contains("No movie matches")));
    assert!(catalog.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Drag and drop
// ---------------------------------------------------------------------------

async fn ranked_runtime(
    catalog: &Arc<FakeCatalog>,
    dir: &std::path::Path,
) -> watchtier::runtime::Runtime {
    let mut rt = runtime(catalog, dir);
    rt.run_command(Command::Trending { page: 1 }).await.unwrap();
    rt.settle().await.unwrap();
    rt
}

fn trio() -> Arc<FakeCatalog> {
    Arc::new(FakeCatalog::new().with_trending(
        1,
        vec![raw(1, "Heat"), raw(2, "Ronin"), raw(3, "Collateral")],
    ))
}

#[tokio::test]
async fn move_within_a_tier_reorders() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();
    let mut rt = ranked_runtime(&catalog, dir.path()).await;
    for reference in ["1", "2", "3"] {
        rt.run_command(Command::Rank { reference: cmd(reference), tier: TierId::A })
            .await
            .unwrap();
    }

    rt.run_command(Command::Move {
        reference: cmd("heat"),
        to: None,
        before: Some(cmd("collateral")),
    })
    .await
    .unwrap();

    assert_eq!(ids(&rt.state().store.tier(TierId::A).movies), vec![2, 3, 1]);
    assert!(!rt.state().drag.is_dragging());
}

#[tokio::test]
async fn move_across_tiers_inserts_at_target_position() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();
    let mut rt = ranked_runtime(&catalog, dir.path()).await;
    rt.run_command(Command::Rank { reference: cmd("1"), tier: TierId::A }).await.unwrap();
    rt.run_command(Command::Rank { reference: cmd("2"), tier: TierId::A }).await.unwrap();
    rt.run_command(Command::Rank { reference: cmd("3"), tier: TierId::B }).await.unwrap();

    rt.run_command(Command::Move {
        reference: cmd("1"),
        to: None,
        before: Some(cmd("3")),
    })
    .await
    .unwrap();

    assert_eq!(ids(&rt.state().store.tier(TierId::A).movies), vec![2]);
    assert_eq!(ids(&rt.state().store.tier(TierId::B).movies), vec![1, 3]);
}

#[tokio::test]
async fn dragging_to_the_pool_unranks() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();
    let mut rt = ranked_runtime(&catalog, dir.path()).await;
    rt.run_command(Command::Rank { reference: cmd("2"), tier: TierId::S }).await.unwrap();

    rt.run_command(Command::Move {
        reference: cmd("ronin"),
        to: Some(MoveTarget::Pool),
        before: None,
    })
    .await
    .unwrap();

    assert!(rt.state().store.tier(TierId::S).movies.is_empty());
    assert_eq!(ids(rt.state().store.pool()), vec![2]);
}

#[tokio::test]
async fn dragging_a_result_onto_a_tier_ranks_it() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();
    let mut rt = ranked_runtime(&catalog, dir.path()).await;

    rt.run_command(Command::Move {
        reference: cmd("collateral"),
        to: Some(MoveTarget::Tier(TierId::C)),
        before: None,
    })
    .await
    .unwrap();

    assert_eq!(ids(&rt.state().store.tier(TierId::C).movies), vec![3]);
    assert!(rt.state().status.as_deref().is_some_and(|s| s.contains("Ranked in C")));
}

#[tokio::test]
async fn ranking_twice_in_the_same_tier_toggles_off() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();
    let mut rt = ranked_runtime(&catalog, dir.path()).await;
    let rank_in_c = || Command::Rank { reference: cmd("collateral"), tier: TierId::C };

    rt.run_command(rank_in_c()).await.unwrap();
    rt.run_command(rank_in_c()).await.unwrap();

    assert!(rt.state().store.tier(TierId::C).movies.is_empty());
    assert_eq!(rt.state().store.ranked_count(), 0);
}

// ---------------------------------------------------------------------------
// Persistence and export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn board_survives_a_restart() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();

    {
        let mut rt = persistent_runtime(&catalog, dir.path());
        rt.run_command(Command::Trending { page: 1 }).await.unwrap();
        rt.settle().await.unwrap();
        rt.run_command(Command::Add { reference: cmd("heat") }).await.unwrap();
        rt.run_command(Command::Rank { reference: cmd("ronin"), tier: TierId::S })
            .await
            .unwrap();
    }

    let rt = persistent_runtime(&catalog, dir.path());
    let store = &rt.state().store;
    assert_eq!(ids(store.pool()), vec![1]);
    assert_eq!(ids(&store.tier(TierId::S).movies), vec![2]);
    assert!(store.browse_results().is_empty());
}

#[tokio::test]
async fn reset_all_clears_persisted_state() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();

    {
        let mut rt = persistent_runtime(&catalog, dir.path());
        rt.run_command(Command::Trending { page: 1 }).await.unwrap();
        rt.settle().await.unwrap();
        rt.run_command(Command::Rank { reference: cmd("1"), tier: TierId::B }).await.unwrap();
        rt.run_command(Command::ResetAll).await.unwrap();
    }

    let rt = persistent_runtime(&catalog, dir.path());
    assert_eq!(rt.state().store.ranked_count(), 0);
    assert!(rt.state().store.pool().is_empty());
}

#[tokio::test]
async fn failed_save_is_reported_and_the_session_continues() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let mut rt = persistent_runtime(&catalog, &data);
    rt.run_command(Command::Trending { page: 1 }).await.unwrap();
    rt.settle().await.unwrap();

    std::fs::remove_dir_all(&data).unwrap();
    std::fs::write(&data, "not a directory").unwrap();

    let result = rt.run_command(Command::Rank { reference: cmd("heat"), tier: TierId::S }).await;
    assert!(result.is_err());
    assert!(rt.recover(result).unwrap());
    assert!(rt.state().status.as_deref().is_some_and(|s| s.starts_with("Something went wrong")));
    assert_eq!(ids(&rt.state().store.tier(TierId::S).movies), vec![1]);

    let result = rt.run_command(Command::Board).await;
    assert!(rt.recover(result).is_ok());
    assert_eq!(rt.state().view, View::Board);

    let closed = Err(WatchTierError::Worker("response channel closed".to_string()));
    assert!(matches!(rt.recover(closed), Err(WatchTierError::Worker(_))));
}

#[tokio::test]
async fn export_writes_the_board() {
    let catalog = trio();
    let dir = tempfile::tempdir().unwrap();
    let mut rt = ranked_runtime(&catalog, dir.path()).await;
    rt.run_command(Command::Rank { reference: cmd("heat"), tier: TierId::S }).await.unwrap();
    rt.run_command(Command::Add { reference: cmd("ronin") }).await.unwrap();

    let out = dir.path().join("out");
    rt.run_command(Command::Export { name: Some(cmd("friday")), dir: Some(out.clone()) })
        .await
        .unwrap();

    let path = rt.last_export().cloned().unwrap();
    assert_eq!(path, out.join("friday.txt"));
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.starts_with("Movie Tier List"));
    assert!(text.contains("Heat #1"));
    assert!(text.contains("Ronin #2"));
    assert!(!text.contains('\x1b'));
}

#[tokio::test]
async fn export_without_a_name_uses_the_default() {
    let catalog = Arc::new(FakeCatalog::new());
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime(&catalog, dir.path());

    rt.run_command(Command::Export { name: None, dir: None }).await.unwrap();

    assert!(dir.path().join("tier-list.txt").exists());
}
