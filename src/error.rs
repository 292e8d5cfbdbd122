//! Error types. Provider failures are scenario-scoped; only configuration
//! errors stop a run.

use std::path::PathBuf;

use thiserror::Error;

/// A label could not be resolved to a coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeFailure {
    #[error("no results for {label:?}")]
    NoResults { label: String },
    #[error("geocoding request for {label:?} failed: {message}")]
    Http { label: String, message: String },
    #[error("malformed geocoder response for {label:?}: {message}")]
    Malformed { label: String, message: String },
}

/// The routing provider rejected the request or produced no route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteFailure {
    #[error("stop {label:?} could not be resolved: {source}")]
    UnresolvedStop {
        label: String,
        #[source]
        source: GeocodeFailure,
    },
    #[error("routing request failed: {message}")]
    Http { message: String },
    #[error("routing service returned {code}: {message}")]
    Service { code: String, message: String },
    #[error("malformed routing response: {message}")]
    Malformed { message: String },
    #[error("no route found")]
    NoRoute,
}

/// Why a single scenario's pipeline stopped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioFailure {
    #[error("unable to geocode start location: {0}")]
    Start(#[source] GeocodeFailure),
    #[error("unable to geocode end location: {0}")]
    End(#[source] GeocodeFailure),
    #[error("directions request failed due to {0}")]
    Route(#[source] RouteFailure),
}

/// Scenario file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("solver output line {line}: {message}")]
    SolverOutput { line: usize, message: String },
    #[error("scenario file lists no scenarios")]
    NoScenarios,
}
