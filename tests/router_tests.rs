//! Pipeline tests
//!
//! Sequencing, failure isolation and report shape, with stub providers.

use scenario_router::error::{GeocodeFailure, RouteFailure, ScenarioFailure};
use scenario_router::polyline::Polyline;
use scenario_router::route::{Leg, RouteResult};
use scenario_router::router::{RouterOptions, ScenarioRouter};
use scenario_router::scenario::{LoadOffset, Scenario};
use scenario_router::test_support::{RecordingSurface, StubGeocoder, StubRoutePlanner};
use scenario_router::traits::{Coordinate, DEPOT_LABEL, Geocoder, RoutePlanner, WAYPOINT_LABEL};

// ============================================================================
// Test Fixtures
// ============================================================================

fn at(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng)
}

fn geocoder() -> StubGeocoder {
    StubGeocoder::new()
        .with("A", at(0.0, 0.0))
        .with("B", at(0.0, 0.05))
        .with("C", at(0.05, 0.0))
        .with("D", at(0.05, 0.05))
}

fn leg(from: &str, to: &str, km: u32, end: Coordinate) -> Leg {
    Leg::new(from, to, f64::from(km) * 1000.0)
        .with_distance_text(format!("{km} km"))
        .with_end_location(end)
}

/// A → B → A, 5 km each way.
fn a_b_a() -> RouteResult {
    RouteResult::new(
        vec![leg("A", "B", 5, at(0.0, 0.05)), leg("B", "A", 5, at(0.0, 0.0))],
        Polyline::new(vec![(0.0, 0.0), (0.0, 0.05), (0.0, 0.0)]),
    )
}

/// A → D → C → B → A.
fn a_dcb_a() -> RouteResult {
    RouteResult::new(
        vec![
            leg("A", "D", 7, at(0.05, 0.05)),
            leg("D", "C", 5, at(0.05, 0.0)),
            leg("C", "B", 7, at(0.0, 0.05)),
            leg("B", "A", 5, at(0.0, 0.0)),
        ],
        Polyline::default(),
    )
}

fn planner() -> StubRoutePlanner {
    StubRoutePlanner::new()
        .with_route(["B"], a_b_a())
        .with_route(["B", "C", "D"], a_dcb_a())
        .with_route(
            Vec::<String>::new(),
            RouteResult::new(vec![leg("A", "A", 0, at(0.0, 0.0))], Polyline::default()),
        )
        .with_failure(
            ["C"],
            RouteFailure::Service {
                code: "NoRoute".to_string(),
                message: "Impossible route between points".to_string(),
            },
        )
}

fn example_scenario() -> Scenario {
    Scenario::new("A", "A").with_stops(["B"]).with_loads(vec![0, 5, 5])
}

// ============================================================================
// Success path
// ============================================================================

#[test]
fn produces_one_line_per_leg() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());
    let scenarios = vec![
        Scenario::new("A", "A"),
        example_scenario(),
        Scenario::new("A", "A").with_stops(["B", "C", "D"]),
    ];

    let runs = router.run_all(&scenarios, &RecordingSurface);

    for (run, scenario) in runs.iter().zip(&scenarios) {
        let report = run.outcome.as_ref().expect("scenario succeeds");
        assert_eq!(report.lines.len(), scenario.stops.len() + 1);
        assert_eq!(run.surface.report(), Some(report));
    }
}

#[test]
fn example_scenario_reports_load_five_on_return_leg() {
    let geocoder = geocoder();
    let planner = planner();

    for offset in [LoadOffset::Departing, LoadOffset::Arriving] {
        let options = RouterOptions {
            load_offset: offset,
            ..RouterOptions::default()
        };
        let router = ScenarioRouter::new(&geocoder, &planner, options);
        let run = router.run_one(0, &example_scenario(), &RecordingSurface);

        let report = run.outcome.expect("scenario succeeds");
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.lines[1].load, Some(5));
        assert_eq!(report.lines[1].distance_text, "5 km");
        assert_eq!(report.header, "Route for Map A to A via B");
    }
}

#[test]
fn departing_offset_differs_from_legacy_on_first_leg() {
    let geocoder = geocoder();
    let planner = planner();

    let departing = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default())
        .run_one(0, &example_scenario(), &RecordingSurface)
        .outcome
        .expect("scenario succeeds");
    let arriving = ScenarioRouter::new(
        &geocoder,
        &planner,
        RouterOptions {
            load_offset: LoadOffset::Arriving,
            ..RouterOptions::default()
        },
    )
    .run_one(0, &example_scenario(), &RecordingSurface)
    .outcome
    .expect("scenario succeeds");

    assert_eq!(departing.lines[0].load, Some(5));
    assert_eq!(arriving.lines[0].load, Some(0));
}

#[test]
fn draws_depots_route_then_waypoints() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());

    let run = router.run_one(0, &Scenario::new("A", "A").with_stops(["B", "C", "D"]), &RecordingSurface);

    assert!(run.surface.rendered_route());
    assert_eq!(
        run.surface.marker_labels(),
        vec![DEPOT_LABEL, DEPOT_LABEL, WAYPOINT_LABEL, WAYPOINT_LABEL, WAYPOINT_LABEL]
    );
}

#[test]
fn geocodes_start_then_end() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());

    let run = router.run_one(0, &Scenario::new("A", "D"), &RecordingSurface);

    assert!(run.outcome.is_ok());
    assert_eq!(geocoder.calls(), vec!["A".to_string(), "D".to_string()]);
    assert_eq!(planner.calls(), vec![Vec::<String>::new()]);
}

#[test]
fn boxed_providers_route_like_borrowed_ones() {
    let geocoder = geocoder();
    let planner = planner();
    let scenario = example_scenario();
    let borrowed = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default())
        .run_one(0, &scenario, &RecordingSurface);

    let boxed_geocoder: Box<dyn Geocoder + Sync + '_> = Box::new(&geocoder);
    let boxed_planner: Box<dyn RoutePlanner + Sync + '_> = Box::new(&planner);
    let boxed = ScenarioRouter::new(boxed_geocoder, boxed_planner, RouterOptions::default())
        .run_one(0, &scenario, &RecordingSurface);

    assert_eq!(boxed.outcome, borrowed.outcome);
    assert_eq!(boxed.surface, borrowed.surface);
}

#[test]
fn identical_runs_give_identical_reports() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());
    let scenario = Scenario::new("A", "A").with_stops(["B", "C", "D"]);

    let first = router.run_one(0, &scenario, &RecordingSurface).outcome.expect("first run");
    let second = router.run_one(0, &scenario, &RecordingSurface).outcome.expect("second run");

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn start_geocode_failure_short_circuits() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());

    let run = router.run_one(0, &Scenario::new("Nowhere", "A").with_stops(["B"]), &RecordingSurface);

    assert_eq!(
        run.outcome,
        Err(ScenarioFailure::Start(GeocodeFailure::NoResults {
            label: "Nowhere".to_string()
        }))
    );
    assert_eq!(geocoder.calls(), vec!["Nowhere".to_string()]);
    assert!(planner.calls().is_empty());
    assert!(run.surface.events.is_empty());
}

#[test]
fn end_geocode_failure_skips_routing() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());

    let run = router.run_one(0, &Scenario::new("A", "Nowhere").with_stops(["B"]), &RecordingSurface);

    assert!(matches!(run.outcome, Err(ScenarioFailure::End(_))));
    assert!(planner.calls().is_empty());
    assert_eq!(run.surface.marker_labels(), vec![DEPOT_LABEL]);
}

#[test]
fn route_failure_renders_nothing() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());

    let run = router.run_one(0, &Scenario::new("A", "A").with_stops(["C"]), &RecordingSurface);

    assert!(matches!(
        run.outcome,
        Err(ScenarioFailure::Route(RouteFailure::Service { .. }))
    ));
    assert!(!run.surface.rendered_route());
    assert!(run.surface.report().is_none());
}

#[test]
fn failure_in_one_scenario_leaves_siblings_untouched() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());

    let healthy = vec![example_scenario(), Scenario::new("A", "A").with_stops(["B", "C", "D"])];
    let mut mixed = healthy.clone();
    mixed.insert(1, Scenario::new("A", "A").with_stops(["C"]));
    mixed.push(Scenario::new("Nowhere", "A"));

    let baseline = router.run_all(&healthy, &RecordingSurface);
    let runs = router.run_all(&mixed, &RecordingSurface);

    assert_eq!(runs.len(), 4);
    assert!(runs[1].outcome.is_err());
    assert!(runs[3].outcome.is_err());
    assert_eq!(runs[0].outcome, baseline[0].outcome);
    assert_eq!(runs[2].outcome, baseline[1].outcome);
    assert_eq!(runs[0].surface, baseline[0].surface);
    assert_eq!(runs[2].surface, baseline[1].surface);
}

#[test]
fn runs_keep_input_order() {
    let geocoder = geocoder();
    let planner = planner();
    let router = ScenarioRouter::new(&geocoder, &planner, RouterOptions::default());
    let scenarios: Vec<_> = (0..16)
        .map(|i| {
            if i % 2 == 0 {
                example_scenario()
            } else {
                Scenario::new("A", "A")
            }
        })
        .collect();

    let runs = router.run_all(&scenarios, &RecordingSurface);

    for (i, run) in runs.iter().enumerate() {
        assert_eq!(run.index, i);
        let expected_lines = if i % 2 == 0 { 2 } else { 1 };
        assert_eq!(run.outcome.as_ref().map(|r| r.lines.len()), Ok(expected_lines));
    }
}
