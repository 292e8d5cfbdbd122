//! Per-scenario text itinerary.

use std::fmt;

use serde::Serialize;

use crate::route::RouteResult;
use crate::scenario::{LoadOffset, Scenario};

/// One leg of the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryLine {
    /// 1-based segment number.
    pub segment: usize,
    pub start_address: String,
    pub end_address: String,
    pub distance_text: String,
    pub load: Option<u32>,
}

impl fmt::Display for ItineraryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route Segment: {} | {} to {} | {}",
            self.segment, self.start_address, self.end_address, self.distance_text
        )?;
        if let Some(load) = self.load {
            write!(f, " | Load at {}: {}", self.end_address, load)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryReport {
    pub header: String,
    pub lines: Vec<ItineraryLine>,
}

impl ItineraryReport {
    /// Pair each leg with the load selected by `offset`. Loads that cannot
    /// be indexed are left out of the line.
    pub fn build(scenario: &Scenario, route: &RouteResult, offset: LoadOffset) -> Self {
        let lines = route
            .legs
            .iter()
            .enumerate()
            .map(|(index, leg)| ItineraryLine {
                segment: index + 1,
                start_address: leg.start_address.clone(),
                end_address: leg.end_address.clone(),
                distance_text: leg.distance_text.clone(),
                load: scenario
                    .loads
                    .as_ref()
                    .and_then(|loads| loads.get(offset.index_for_leg(index)).copied()),
            })
            .collect();

        Self {
            header: scenario.title(),
            lines,
        }
    }

    /// The report as plain text lines, header excluded.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ItineraryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
