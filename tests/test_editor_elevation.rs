//! Path editing together with concurrent elevation lookups, using a local provider
#![cfg(not(target_arch = "wasm32"))]

use std::{
    thread,
    time::{Duration, Instant},
};

use geotrace_elevation::{ElevationError, ElevationFetcher, ElevationMessage, ElevationProvider};
use geotrace_geo::LatLng;
use geotrace_path::{Edit, ElevationUpdate, FetchTicket, PathEditor};
use geotrace_test_util::phitsanulok_walk;
use pretty_assertions::assert_eq;
use testresult::TestResult;

/// Elevation derived from the position, fails for points east of `fail_east_of`
struct FakeTerrain {
    fail_east_of: f64,
    delay: Duration,
}

impl FakeTerrain {
    fn elevation_at(point: LatLng) -> f64 {
        ((point.lat - 16.8) * 10_000.0).round()
    }
}

impl ElevationProvider for FakeTerrain {
    fn elevation(&self, point: LatLng) -> Result<f64, ElevationError> {
        thread::sleep(self.delay);
        if point.lng > self.fail_east_of {
            return Err(ElevationError::EmptyResponse);
        }
        Ok(Self::elevation_at(point))
    }
}

fn dispatch(editor: &mut PathEditor, fetcher: &mut ElevationFetcher<FetchTicket>) {
    for request in editor.take_elevation_requests() {
        fetcher.request(request.ticket, request.position);
    }
}

/// Poll like the UI does until every lookup has delivered, returns the updates applied
fn settle(
    editor: &mut PathEditor,
    fetcher: &mut ElevationFetcher<FetchTicket>,
) -> Vec<Result<ElevationUpdate, ElevationError>> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut updates = Vec::new();
    while !fetcher.is_idle() && Instant::now() < deadline {
        for ElevationMessage {
            ticket, outcome, ..
        } in fetcher.poll()
        {
            updates.push(outcome.map(|e| editor.resolve_elevation(ticket, e)));
        }
        thread::sleep(Duration::from_millis(5));
    }
    updates
}

#[test]
fn test_failed_lookup_leaves_gap_and_does_not_block_others() -> TestResult {
    let walk = phitsanulok_walk();
    // Fail the lookup for the point furthest east
    let fail_east_of = walk
        .iter()
        .map(|p| p.lng)
        .fold(f64::NEG_INFINITY, f64::max)
        - 1e-9;
    let mut fetcher = ElevationFetcher::with_provider(FakeTerrain {
        fail_east_of,
        delay: Duration::from_millis(1),
    });
    let mut editor = PathEditor::default();
    for p in &walk {
        editor.apply(Edit::Append(*p))?;
    }
    dispatch(&mut editor, &mut fetcher);

    let updates = settle(&mut editor, &mut fetcher);
    assert_eq!(updates.len(), walk.len());
    assert_eq!(updates.iter().filter(|u| u.is_err()).count(), 1);

    let series = editor.series().ok_or("no series")?;
    assert_eq!(series.len(), walk.len());
    for (sample, point) in series.samples().iter().zip(&walk) {
        if point.lng > fail_east_of {
            assert_eq!(sample.elevation_m, None);
        } else {
            assert_eq!(sample.elevation_m, Some(FakeTerrain::elevation_at(*point)));
        }
    }
    Ok(())
}

#[test]
fn test_results_after_clear_are_discarded() -> TestResult {
    let mut fetcher = ElevationFetcher::with_provider(FakeTerrain {
        fail_east_of: f64::INFINITY,
        delay: Duration::from_millis(20),
    });
    let mut editor = PathEditor::default();
    for p in phitsanulok_walk() {
        editor.apply(Edit::Append(p))?;
    }
    dispatch(&mut editor, &mut fetcher);
    editor.apply(Edit::Clear)?;

    let updates = settle(&mut editor, &mut fetcher);
    assert!(
        updates
            .iter()
            .all(|u| matches!(u, Ok(ElevationUpdate::Detached)))
    );
    assert!(editor.markers().is_empty());
    assert_eq!(editor.profile().sample_count(), 0);
    Ok(())
}

#[test]
fn test_drag_supersedes_pending_lookup() -> TestResult {
    let mut fetcher = ElevationFetcher::with_provider(FakeTerrain {
        fail_east_of: f64::INFINITY,
        delay: Duration::from_millis(10),
    });
    let mut editor = PathEditor::default();
    let start = LatLng::new(16.81, 100.46);
    let moved = LatLng::new(16.82, 100.46);
    editor.apply(Edit::Append(start))?;
    dispatch(&mut editor, &mut fetcher);
    editor.apply(Edit::Move {
        index: 0,
        to: moved,
    })?;
    dispatch(&mut editor, &mut fetcher);

    let updates = settle(&mut editor, &mut fetcher);
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().any(|u| matches!(u, Ok(ElevationUpdate::Stale))));
    assert_eq!(
        editor.markers().markers()[0].elevation(),
        Some(FakeTerrain::elevation_at(moved))
    );
    Ok(())
}
