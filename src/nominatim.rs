//! Nominatim HTTP adapter for geocoding.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::GeocodeFailure;
use crate::throttle::RequestGate;
use crate::traits::{Coordinate, Geocoder};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Spacing between requests across all clones of the geocoder. The
    /// public instance allows one request per second.
    pub min_request_interval: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("scenario-router/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            min_request_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
    gate: RequestGate,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let gate = RequestGate::new(config.min_request_interval);

        Ok(Self {
            config,
            client,
            gate,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, label: &str) -> Result<Coordinate, GeocodeFailure> {
        let http_failure = |err: reqwest::Error| GeocodeFailure::Http {
            label: label.to_string(),
            message: err.to_string(),
        };

        self.gate.wait();
        let places = self
            .client
            .get(self.search_url())
            .query(&[("q", label), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(http_failure)?
            .json::<Vec<NominatimPlace>>()
            .map_err(|err| GeocodeFailure::Malformed {
                label: label.to_string(),
                message: err.to_string(),
            })?;

        let place = first_place(label, places)?;
        debug!(label, display_name = %place.display_name, "geocoded");
        place.coordinate(label)
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimPlace {
    fn coordinate(&self, label: &str) -> Result<Coordinate, GeocodeFailure> {
        let parse = |value: &str| {
            value.parse::<f64>().map_err(|err| GeocodeFailure::Malformed {
                label: label.to_string(),
                message: format!("{value:?}: {err}"),
            })
        };
        Ok(Coordinate::new(parse(&self.lat)?, parse(&self.lon)?))
    }
}

fn first_place(label: &str, places: Vec<NominatimPlace>) -> Result<NominatimPlace, GeocodeFailure> {
    places
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeFailure::NoResults {
            label: label.to_string(),
        })
}
