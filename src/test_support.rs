//! Deterministic test doubles for the router's collaborators.
//!
//! None of these touch the network. Each records the calls it receives so
//! tests can check what the pipeline asked for and in which order.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{GeocodeFailure, RouteFailure};
use crate::itinerary::ItineraryReport;
use crate::route::RouteResult;
use crate::traits::{Coordinate, Geocoder, PresentationSurface, RoutePlanner};

/// Geocoder backed by a fixed label table. Unknown labels fail with
/// [`GeocodeFailure::NoResults`].
#[derive(Debug, Default)]
pub struct StubGeocoder {
    places: HashMap<String, Coordinate>,
    calls: Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, label: impl Into<String>, at: Coordinate) -> Self {
        self.places.insert(label.into(), at);
        self
    }

    /// Labels looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, label: &str) -> Result<Coordinate, GeocodeFailure> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(label.to_string());
        }
        self.places
            .get(label)
            .copied()
            .ok_or_else(|| GeocodeFailure::NoResults {
                label: label.to_string(),
            })
    }
}

/// Planner returning canned routes keyed by the stop list.
#[derive(Debug, Default)]
pub struct StubRoutePlanner {
    responses: HashMap<Vec<String>, Result<RouteResult, RouteFailure>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl StubRoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_route<S: Into<String>>(
        mut self,
        stops: impl IntoIterator<Item = S>,
        route: RouteResult,
    ) -> Self {
        self.responses
            .insert(stops.into_iter().map(Into::into).collect(), Ok(route));
        self
    }

    #[must_use]
    pub fn with_failure<S: Into<String>>(
        mut self,
        stops: impl IntoIterator<Item = S>,
        failure: RouteFailure,
    ) -> Self {
        self.responses
            .insert(stops.into_iter().map(Into::into).collect(), Err(failure));
        self
    }

    /// Stop lists requested so far, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl RoutePlanner for StubRoutePlanner {
    fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        stops: &[String],
        _optimize: bool,
    ) -> Result<RouteResult, RouteFailure> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(stops.to_vec());
        }
        self.responses
            .get(stops)
            .cloned()
            .unwrap_or(Err(RouteFailure::NoRoute))
    }
}

/// One call made on a [`RecordingSurface`] handle.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Marker { at: Coordinate, label: String },
    Route { legs: usize },
    Report(ItineraryReport),
}

/// Per-scenario record of everything drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPanel {
    pub title: String,
    pub events: Vec<SurfaceEvent>,
}

impl RecordedPanel {
    pub fn rendered_route(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, SurfaceEvent::Route { .. }))
    }

    pub fn report(&self) -> Option<&ItineraryReport> {
        self.events.iter().find_map(|event| match event {
            SurfaceEvent::Report(report) => Some(report),
            _ => None,
        })
    }

    pub fn marker_labels(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Marker { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Surface that only records calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordingSurface;

impl PresentationSurface for RecordingSurface {
    type Handle = RecordedPanel;

    fn create_map_surface(&self, title: &str) -> RecordedPanel {
        RecordedPanel {
            title: title.to_string(),
            events: Vec::new(),
        }
    }

    fn place_marker(&self, surface: &mut RecordedPanel, at: Coordinate, label: &str) {
        surface.events.push(SurfaceEvent::Marker {
            at,
            label: label.to_string(),
        });
    }

    fn render_route(&self, surface: &mut RecordedPanel, route: &RouteResult) {
        surface.events.push(SurfaceEvent::Route {
            legs: route.legs.len(),
        });
    }

    fn append_report_lines(&self, surface: &mut RecordedPanel, report: &ItineraryReport) {
        surface.events.push(SurfaceEvent::Report(report.clone()));
    }
}
