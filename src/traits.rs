//! Collaborator traits for the scenario router.
//!
//! The router owns no routing or geocoding logic. Concrete backends implement
//! these traits; the pipeline only sequences calls between them.

use serde::{Deserialize, Serialize};

use crate::error::{GeocodeFailure, RouteFailure};
use crate::itinerary::ItineraryReport;
use crate::route::RouteResult;

/// Marker label for the depot (start and end of a scenario).
pub const DEPOT_LABEL: &str = "DEPOT";

/// Marker label for intermediate stops.
pub const WAYPOINT_LABEL: &str = "WAYPOINT";

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `(lat, lng)` tuple, matching [`crate::polyline::Polyline`] points.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Resolves a free-text location label to a coordinate.
pub trait Geocoder {
    fn geocode(&self, label: &str) -> Result<Coordinate, GeocodeFailure>;
}

/// Computes a driving route through labelled stops.
///
/// When `optimize` is set the provider may reorder `stops`; the returned legs
/// are in visiting order.
pub trait RoutePlanner {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        stops: &[String],
        optimize: bool,
    ) -> Result<RouteResult, RouteFailure>;
}

/// Where routes and itineraries end up.
///
/// Each scenario gets its own handle so pipelines never share a surface.
pub trait PresentationSurface {
    type Handle;

    fn create_map_surface(&self, title: &str) -> Self::Handle;

    fn place_marker(&self, surface: &mut Self::Handle, at: Coordinate, label: &str);

    fn render_route(&self, surface: &mut Self::Handle, route: &RouteResult);

    fn append_report_lines(&self, surface: &mut Self::Handle, report: &ItineraryReport);
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn geocode(&self, label: &str) -> Result<Coordinate, GeocodeFailure> {
        (**self).geocode(label)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    fn geocode(&self, label: &str) -> Result<Coordinate, GeocodeFailure> {
        (**self).geocode(label)
    }
}

impl<T: RoutePlanner + ?Sized> RoutePlanner for &T {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        stops: &[String],
        optimize: bool,
    ) -> Result<RouteResult, RouteFailure> {
        (**self).route(origin, destination, stops, optimize)
    }
}

impl<T: RoutePlanner + ?Sized> RoutePlanner for Box<T> {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        stops: &[String],
        optimize: bool,
    ) -> Result<RouteResult, RouteFailure> {
        (**self).route(origin, destination, stops, optimize)
    }
}
