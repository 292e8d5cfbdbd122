//! scenario-router core
//!
//! Geocodes each scenario's depot, asks a routing provider for an optimised
//! driving route through the scenario's stops, and reports every leg.

pub mod error;
pub mod haversine;
pub mod html;
pub mod itinerary;
pub mod nominatim;
pub mod osrm;
pub mod polyline;
pub mod route;
pub mod router;
pub mod scenario;
pub mod throttle;
pub mod traits;

#[doc(hidden)]
pub mod test_support;
