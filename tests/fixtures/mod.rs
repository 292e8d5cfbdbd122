//! Test fixtures for scenario-router.
//!
//! Provides the Mohali / Zirakpur courier demo:
//! - Approximate depot and stop coordinates
//! - The delivery scenarios with their cumulative loads
//! - A stub geocoder that knows every fixture label

pub mod mohali_locations;

pub use mohali_locations::*;
