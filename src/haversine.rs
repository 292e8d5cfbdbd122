//! Straight-line route planner (fallback when no routing service is reachable).
//!
//! Uses great-circle distance between geocoded stops. Less accurate than OSRM
//! (ignores roads) but needs nothing beyond a geocoder.

use crate::error::RouteFailure;
use crate::polyline::Polyline;
use crate::route::{Leg, RouteResult};
use crate::traits::{Coordinate, Geocoder, RoutePlanner};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line planner. With `optimize`, stops are visited nearest-first
/// from the origin.
#[derive(Debug, Clone)]
pub struct StraightLinePlanner<G> {
    geocoder: G,
}

impl<G: Geocoder> StraightLinePlanner<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c * 1000.0
}

/// Indices of `points` in nearest-neighbour order starting from `origin`.
fn nearest_neighbour_order(origin: Coordinate, points: &[Coordinate]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut order = Vec::with_capacity(points.len());
    let mut current = origin;

    while !remaining.is_empty() {
        let (slot, _) = remaining
            .iter()
            .enumerate()
            .map(|(slot, &index)| (slot, haversine_meters(current, points[index])))
            .fold((0, f64::INFINITY), |best, candidate| {
                if candidate.1 < best.1 { candidate } else { best }
            });
        let index = remaining.remove(slot);
        current = points[index];
        order.push(index);
    }

    order
}

fn describe(at: Coordinate) -> String {
    format!("{:.5}, {:.5}", at.lat, at.lng)
}

impl<G: Geocoder> RoutePlanner for StraightLinePlanner<G> {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        stops: &[String],
        optimize: bool,
    ) -> Result<RouteResult, RouteFailure> {
        let points = stops
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

        let order = if optimize {
            nearest_neighbour_order(origin, &points)
        } else {
            (0..points.len()).collect()
        };

        let mut visits = Vec::with_capacity(order.len() + 2);
        visits.push((describe(origin), origin));
        visits.extend(order.iter().map(|&index| (stops[index].clone(), points[index])));
        visits.push((describe(destination), destination));

        let legs = visits
            .windows(2)
            .map(|pair| {
                let (from_label, from) = &pair[0];
                let (to_label, to) = &pair[1];
                Leg::new(from_label.clone(), to_label.clone(), haversine_meters(*from, *to))
                    .with_end_location(*to)
            })
            .collect();

        let overview = Polyline::new(visits.iter().map(|(_, at)| at.as_tuple()).collect());
        Ok(RouteResult::new(legs, overview))
    }
}
