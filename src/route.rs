//! Route results as returned by a [`crate::traits::RoutePlanner`].

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;
use crate::traits::Coordinate;

/// One driving segment between consecutive visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub start_address: String,
    pub end_address: String,
    /// Human-readable distance, e.g. `"5.2 km"`.
    pub distance_text: String,
    pub distance_meters: f64,
    /// Where the leg ends, when the provider reports it.
    pub end_location: Option<Coordinate>,
}

impl Leg {
    pub fn new(
        start_address: impl Into<String>,
        end_address: impl Into<String>,
        distance_meters: f64,
    ) -> Self {
        Self {
            start_address: start_address.into(),
            end_address: end_address.into(),
            distance_text: format_distance(distance_meters),
            distance_meters,
            end_location: None,
        }
    }

    pub fn with_distance_text(mut self, text: impl Into<String>) -> Self {
        self.distance_text = text.into();
        self
    }

    pub fn with_end_location(mut self, at: Coordinate) -> Self {
        self.end_location = Some(at);
        self
    }
}

/// Legs in visiting order plus the overall route geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub legs: Vec<Leg>,
    pub overview: Polyline,
}

impl RouteResult {
    pub fn new(legs: Vec<Leg>, overview: Polyline) -> Self {
        Self { legs, overview }
    }

    pub fn total_distance_meters(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_meters).sum()
    }

    /// End locations of every leg but the last, i.e. the intermediate stops.
    pub fn waypoint_locations(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let intermediate = self.legs.len().saturating_sub(1);
        self.legs[..intermediate]
            .iter()
            .filter_map(|leg| leg.end_location)
    }
}

/// Format a distance the way driving directions usually print it.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters.max(0.0))
    } else if meters < 100_000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} km", meters / 1000.0)
    }
}
