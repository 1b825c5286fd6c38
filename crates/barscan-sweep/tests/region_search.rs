//! Integration tests for `RegionSearch` and `SearchSession`.
//!
//! Most tests drive the orchestrator with a scripted in-memory searcher; the
//! last group runs the real `CategorySweep` against a wiremock server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use barscan_core::{BoundingRegion, GeoPoint, GridCell, PlaceRecord};
use barscan_kakao::{CategorySweep, KakaoClient, SweepParams};
use barscan_sweep::{
    CellSearch, Progress, RegionSearch, SearchOutcome, SearchSession, SortField, SweepError,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, thiserror::Error)]
#[error("scripted failure")]
struct ScriptedFailure;

/// Replays one scripted response per call, then empty results.
#[derive(Default)]
struct ScriptedSearch {
    responses: Mutex<VecDeque<Result<Vec<PlaceRecord>, ScriptedFailure>>>,
    calls: AtomicUsize,
}

impl ScriptedSearch {
    fn new(responses: Vec<Result<Vec<PlaceRecord>, ScriptedFailure>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CellSearch for ScriptedSearch {
    type Error = ScriptedFailure;

    async fn search_cell(&self, _cell: &GridCell) -> Result<Vec<PlaceRecord>, ScriptedFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn record(id: &str, name: &str) -> PlaceRecord {
    PlaceRecord {
        id: id.to_owned(),
        name: name.to_owned(),
        category_path: "음식점 > 술집".to_owned(),
        address_legacy: String::new(),
        address_road: String::new(),
        phone: String::new(),
        longitude: "126.98".to_owned(),
        latitude: "37.505".to_owned(),
        detail_url: String::new(),
        distance_meters: "50".to_owned(),
    }
}

fn seoul_region() -> BoundingRegion {
    BoundingRegion::from_corners(GeoPoint::new(37.50, 126.97), GeoPoint::new(37.51, 126.99))
}

fn seoul_cells() -> Vec<GridCell> {
    barscan_core::tile(&seoul_region(), 1000.0)
}

// ---------------------------------------------------------------------------
// RegionSearch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overlapping_cells_yield_one_record_per_place() {
    let cells = seoul_cells();
    assert_eq!(cells.len(), 4);

    let searcher = ScriptedSearch::new(vec![
        Ok(vec![record("X", "first sighting")]),
        Ok(vec![record("X", "second sighting")]),
    ]);

    let results = RegionSearch::default()
        .run(&cells, &searcher, |_| {})
        .await
        .expect("search should succeed");

    assert_eq!(searcher.calls(), 4);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "first sighting");
}

#[tokio::test]
async fn results_follow_discovery_order() {
    let searcher = ScriptedSearch::new(vec![
        Ok(vec![record("c", "c"), record("a", "a")]),
        Ok(vec![record("b", "b"), record("c", "dup")]),
    ]);

    let results = RegionSearch::default()
        .run(&seoul_cells(), &searcher, |_| {})
        .await
        .unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn progress_is_reported_once_per_cell_and_ends_at_total() {
    let cells = seoul_cells();
    let searcher = ScriptedSearch::default();
    let mut seen: Vec<Progress> = Vec::new();

    RegionSearch::default()
        .run(&cells, &searcher, |p| seen.push(p))
        .await
        .unwrap();

    let completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
    assert_eq!(completed, vec![1, 2, 3, 4]);
    assert!(seen.iter().all(|p| p.total == 4));
    assert!((seen.last().unwrap().fraction() - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn cell_failure_aborts_remaining_cells() {
    let searcher = ScriptedSearch::new(vec![
        Ok(vec![record("1", "one")]),
        Ok(vec![]),
        Err(ScriptedFailure),
    ]);

    let result = RegionSearch::default()
        .run(&seoul_cells(), &searcher, |_| {})
        .await;

    assert!(
        matches!(result, Err(SweepError::CellFailed { cell_index: 2, .. })),
        "got: {result:?}"
    );
    assert_eq!(searcher.calls(), 3);
}

#[tokio::test]
async fn cancel_flag_stops_before_the_next_cell() {
    let flag = Arc::new(AtomicBool::new(false));
    let search = RegionSearch::new(Duration::ZERO).with_cancel(Arc::clone(&flag));
    let searcher = ScriptedSearch::default();

    let trip = Arc::clone(&flag);
    let result = search
        .run(&seoul_cells(), &searcher, move |p| {
            if p.completed == 1 {
                trip.store(true, Ordering::SeqCst);
            }
        })
        .await;

    assert!(
        matches!(
            result,
            Err(SweepError::Cancelled {
                completed: 1,
                total: 4
            })
        ),
        "got: {result:?}"
    );
    assert_eq!(searcher.calls(), 1);
}

#[tokio::test]
async fn empty_cell_list_returns_no_records() {
    let searcher = ScriptedSearch::default();
    let results = RegionSearch::default()
        .run(&[], &searcher, |_| panic!("no progress expected"))
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(searcher.calls(), 0);
}

// ---------------------------------------------------------------------------
// Cell pacing (paused clock)
// ---------------------------------------------------------------------------

/// Records the virtual time at which each cell search starts.
#[derive(Default)]
struct TimedSearch {
    started: Mutex<Vec<tokio::time::Instant>>,
}

impl CellSearch for TimedSearch {
    type Error = ScriptedFailure;

    async fn search_cell(&self, _cell: &GridCell) -> Result<Vec<PlaceRecord>, ScriptedFailure> {
        self.started
            .lock()
            .expect("timing lock poisoned")
            .push(tokio::time::Instant::now());
        Ok(Vec::new())
    }
}

const CELL_DELAY: Duration = Duration::from_secs(1);

#[tokio::test(start_paused = true)]
async fn cell_delay_runs_between_cells_but_not_after_the_last() {
    let cells = seoul_cells();
    let searcher = TimedSearch::default();

    let begin = tokio::time::Instant::now();
    RegionSearch::new(CELL_DELAY)
        .run(&cells, &searcher, |_| {})
        .await
        .unwrap();
    let elapsed = begin.elapsed();

    assert_eq!(cells.len(), 4);
    assert_eq!(elapsed, CELL_DELAY * 3);

    let started = searcher.started.lock().unwrap();
    assert_eq!(started[0], begin);
    for pair in started.windows(2) {
        assert_eq!(pair[1] - pair[0], CELL_DELAY);
    }
}

#[tokio::test(start_paused = true)]
async fn single_cell_run_is_not_delayed() {
    let cells = seoul_cells();

    let begin = tokio::time::Instant::now();
    RegionSearch::new(CELL_DELAY)
        .run(&cells[..1], &TimedSearch::default(), |_| {})
        .await
        .unwrap();

    assert_eq!(begin.elapsed(), Duration::ZERO);
}

// ---------------------------------------------------------------------------
// SearchSession
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_without_region_reports_no_cells() {
    let mut session = SearchSession::new();
    let outcome = session
        .run_search(&RegionSearch::default(), &ScriptedSearch::default(), |_| {})
        .await
        .unwrap();
    assert_eq!(outcome, SearchOutcome::NoCells);
}

#[tokio::test]
async fn session_reports_empty_search_as_no_results() {
    let mut session = SearchSession::new();
    session.set_region(seoul_region(), 1000.0);
    let outcome = session
        .run_search(&RegionSearch::default(), &ScriptedSearch::default(), |_| {})
        .await
        .unwrap();
    assert_eq!(outcome, SearchOutcome::NoResults);
}

#[tokio::test]
async fn new_search_resets_results_but_keeps_cells() {
    let mut session = SearchSession::new();
    assert_eq!(session.set_region(seoul_region(), 1000.0).len(), 4);

    let first = ScriptedSearch::new(vec![Ok(vec![record("1", "one"), record("2", "two")])]);
    let outcome = session
        .run_search(&RegionSearch::default(), &first, |_| {})
        .await
        .unwrap();
    assert_eq!(outcome, SearchOutcome::Found(2));
    session.results_mut().toggle_sort(SortField::Name);

    let second = ScriptedSearch::new(vec![Ok(vec![record("3", "three")])]);
    let outcome = session
        .run_search(&RegionSearch::default(), &second, |_| {})
        .await
        .unwrap();

    assert_eq!(outcome, SearchOutcome::Found(1));
    assert_eq!(session.cells().len(), 4);
    assert_eq!(session.results().records()[0].id, "3");
    assert!(session.results().sort_spec().is_none());
}

#[tokio::test]
async fn new_region_drops_previous_results() {
    let mut session = SearchSession::new();
    session.set_region(seoul_region(), 1000.0);
    let searcher = ScriptedSearch::new(vec![Ok(vec![record("1", "one")])]);
    session
        .run_search(&RegionSearch::default(), &searcher, |_| {})
        .await
        .unwrap();
    assert_eq!(session.results().len(), 1);

    session.set_region(seoul_region(), 100.0);
    assert!(session.results().is_empty());
    assert!(session.cells().len() > 4);

    session.clear();
    assert!(session.region().is_none());
    assert!(session.cells().is_empty());
}

#[tokio::test]
async fn begin_search_clears_results_only() {
    let mut session = SearchSession::new();
    session.set_region(seoul_region(), 1000.0);
    let searcher = ScriptedSearch::new(vec![Ok(vec![record("1", "one")])]);
    session
        .run_search(&RegionSearch::default(), &searcher, |_| {})
        .await
        .unwrap();

    session.begin_search();
    assert!(session.results().is_empty());
    assert_eq!(session.cells().len(), 4);
    assert!(session.region().is_some());
}

// ---------------------------------------------------------------------------
// End to end against a mock Kakao server
// ---------------------------------------------------------------------------

#[tokio::test]
async fn kakao_sweep_over_every_cell_deduplicates_shared_places() {
    let server = MockServer::start().await;

    // Every cell sees the same bar plus one restaurant that the filter drops.
    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "is_end": true },
            "documents": [
                { "id": "777", "place_name": "Joe's Bar", "category_name": "음식점 > 술집 > 호프,요리주점" },
                { "id": "888", "place_name": "Noodle House", "category_name": "음식점 > 한식 > 국수" }
            ]
        })))
        .expect(4)
        .mount(&server)
        .await;

    let client = KakaoClient::with_base_url("test-key", 5, "barscan-test/0.1", &server.uri())
        .expect("client construction should not fail");
    let sweep = CategorySweep::new(
        client,
        SweepParams {
            category_group_code: "FD6".to_owned(),
            radius_m: 710,
            page_size: 15,
            max_pages: 45,
            category_filter: "음식점 > 술집".to_owned(),
            page_delay: Duration::ZERO,
        },
    );

    let mut session = SearchSession::new();
    session.set_region(seoul_region(), 1000.0);
    let outcome = session
        .run_search(&RegionSearch::default(), &sweep, |_| {})
        .await
        .expect("search should succeed");

    assert_eq!(outcome, SearchOutcome::Found(1));
    assert_eq!(session.results().records()[0].id, "777");
    assert_eq!(session.results().filter("bar").len(), 1);
}
