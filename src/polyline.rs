//! Polyline representation for route geometries.
//!
//! Routing services ship geometry in the compact encoded polyline format
//! (precision 5). Decoding happens once, at the adapter boundary; the rest of
//! the crate works with plain `(lat, lng)` points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PRECISION: f64 = 1e5;

/// The encoded string ended in the middle of a value or held a byte outside
/// the polyline alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid encoded polyline at byte {offset}")]
pub struct PolylineError {
    pub offset: usize,
}

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Decode an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let bytes = encoded.as_bytes();
        let mut offset = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while offset < bytes.len() {
            lat += next_delta(bytes, &mut offset)?;
            lng += next_delta(bytes, &mut offset)?;
            points.push((lat as f64 / PRECISION, lng as f64 / PRECISION));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

fn next_delta(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*offset).ok_or(PolylineError { offset: *offset })?;
        if !(63..127).contains(&byte) || shift > 60 {
            return Err(PolylineError { offset: *offset });
        }
        *offset += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
