//! OSRM HTTP adapter for routing with stop reordering.
//!
//! Optimised requests go to the Trip service, which solves the visiting order;
//! plain requests go to the Route service and keep the given order.

use serde::Deserialize;
use tracing::debug;

use crate::error::RouteFailure;
use crate::polyline::Polyline;
use crate::route::{Leg, RouteResult};
use crate::traits::{Coordinate, Geocoder, RoutePlanner};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Routes through OSRM, resolving stop labels with `G` first.
#[derive(Debug, Clone)]
pub struct OsrmClient<G> {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
    geocoder: G,
}

impl<G: Geocoder> OsrmClient<G> {
    pub fn new(config: OsrmConfig, geocoder: G) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            geocoder,
        })
    }

    fn request_url(&self, plan: &RequestPlan) -> String {
        let coords = plan
            .coordinates
            .iter()
            .map(|at| format!("{:.6},{:.6}", at.lng, at.lat))
            .collect::<Vec<_>>()
            .join(";");

        let base = self.config.base_url.trim_end_matches('/');
        let common = "overview=full&geometries=polyline&steps=false";
        match plan.service {
            Service::Route => format!(
                "{}/route/v1/{}/{}?{}",
                base, self.config.profile, coords, common
            ),
            Service::RoundTrip => format!(
                "{}/trip/v1/{}/{}?source=first&roundtrip=true&{}",
                base, self.config.profile, coords, common
            ),
            Service::OneWayTrip => format!(
                "{}/trip/v1/{}/{}?source=first&destination=last&roundtrip=false&{}",
                base, self.config.profile, coords, common
            ),
        }
    }
}

impl<G: Geocoder> RoutePlanner for OsrmClient<G> {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        stops: &[String],
        optimize: bool,
    ) -> Result<RouteResult, RouteFailure> {
        let stop_coordinates = stops
            .iter()
            .map(|label| {
                self.geocoder
                    .geocode(label)
                    .map_err(|source| RouteFailure::UnresolvedStop {
                        label: label.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let plan = RequestPlan::new(origin, destination, &stop_coordinates, stops, optimize);
        let url = self.request_url(&plan);
        debug!(%url, "requesting route");

        let body = self
            .client
            .get(&url)
            .send()
            .map_err(|err| RouteFailure::Http {
                message: err.to_string(),
            })?
            .json::<OsrmResponse>()
            .map_err(|err| RouteFailure::Malformed {
                message: err.to_string(),
            })?;

        plan.into_route(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Service {
    Route,
    RoundTrip,
    OneWayTrip,
}

/// Coordinates and labels in request order, plus the service to call.
#[derive(Debug, Clone)]
struct RequestPlan {
    service: Service,
    coordinates: Vec<Coordinate>,
    /// Stop labels by request index; `None` for origin and destination.
    labels: Vec<Option<String>>,
}

impl RequestPlan {
    fn new(
        origin: Coordinate,
        destination: Coordinate,
        stop_coordinates: &[Coordinate],
        stop_labels: &[String],
        optimize: bool,
    ) -> Self {
        let service = match (optimize && !stop_coordinates.is_empty(), origin == destination) {
            (false, _) => Service::Route,
            (true, true) => Service::RoundTrip,
            (true, false) => Service::OneWayTrip,
        };

        let mut coordinates = Vec::with_capacity(stop_coordinates.len() + 2);
        coordinates.push(origin);
        coordinates.extend_from_slice(stop_coordinates);

        let mut labels = Vec::with_capacity(stop_labels.len() + 2);
        labels.push(None);
        labels.extend(stop_labels.iter().cloned().map(Some));

        // A round trip returns to the first coordinate on its own.
        if service != Service::RoundTrip {
            coordinates.push(destination);
            labels.push(None);
        }

        Self {
            service,
            coordinates,
            labels,
        }
    }

    fn into_route(self, response: OsrmResponse) -> Result<RouteResult, RouteFailure> {
        if response.code != "Ok" {
            return Err(RouteFailure::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = match self.service {
            Service::Route => response.routes.into_iter().next(),
            Service::RoundTrip | Service::OneWayTrip => response.trips.into_iter().next(),
        }
        .ok_or(RouteFailure::NoRoute)?;

        if response.waypoints.len() != self.coordinates.len() {
            return Err(RouteFailure::Malformed {
                message: format!(
                    "expected {} waypoints, got {}",
                    self.coordinates.len(),
                    response.waypoints.len()
                ),
            });
        }

        // Request indices sorted by position in the returned route.
        let mut visit_order: Vec<usize> = (0..self.coordinates.len()).collect();
        visit_order.sort_by_key(|&index| response.waypoints[index].waypoint_index.unwrap_or(index));
        if self.service == Service::RoundTrip {
            visit_order.push(0);
        }

        if route.legs.len() + 1 != visit_order.len() {
            return Err(RouteFailure::Malformed {
                message: format!(
                    "expected {} legs, got {}",
                    visit_order.len() - 1,
                    route.legs.len()
                ),
            });
        }

        let address = |index: usize| -> String {
            let waypoint = &response.waypoints[index];
            match &self.labels[index] {
                Some(label) => label.clone(),
                None if !waypoint.name.is_empty() => waypoint.name.clone(),
                None => {
                    let at = waypoint.coordinate();
                    format!("{:.5}, {:.5}", at.lat, at.lng)
                }
            }
        };

        let legs = route
            .legs
            .iter()
            .zip(visit_order.windows(2))
            .map(|(leg, pair)| {
                Leg::new(address(pair[0]), address(pair[1]), leg.distance)
                    .with_end_location(response.waypoints[pair[1]].coordinate())
            })
            .collect();

        let overview = match route.geometry.as_deref() {
            Some(encoded) => Polyline::decode(encoded).map_err(|err| RouteFailure::Malformed {
                message: err.to_string(),
            })?,
            None => Polyline::default(),
        };

        Ok(RouteResult::new(legs, overview))
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
    #[serde(default)]
    trips: Vec<OsrmRoute>,
    #[serde(default)]
    waypoints: Vec<OsrmWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    legs: Vec<OsrmLeg>,
    geometry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmWaypoint {
    #[serde(default)]
    name: String,
    /// `[lng, lat]`.
    location: [f64; 2],
    /// Position in the trip; absent from Route service responses.
    waypoint_index: Option<usize>,
}

impl OsrmWaypoint {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.location[1], self.location[0])
    }
}
