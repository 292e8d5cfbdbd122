//! Scenario definitions and the JSON scenario file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// One depot round (or one-way trip) to route and report on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub stops: Vec<String>,
    /// Cumulative load: index 0 leaving the depot, then after each stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loads: Option<Vec<u32>>,
}

impl Scenario {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            stops: Vec::new(),
            loads: None,
        }
    }

    pub fn with_stops<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stops = stops.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_loads(mut self, loads: impl Into<Vec<u32>>) -> Self {
        self.loads = Some(loads.into());
        self
    }

    /// `true` when `loads` is absent or has one entry per stop plus the depot.
    pub fn loads_consistent(&self) -> bool {
        self.loads
            .as_ref()
            .is_none_or(|loads| loads.len() == self.stops.len() + 1)
    }

    /// Title used for the map surface and the itinerary header.
    pub fn title(&self) -> String {
        if self.stops.is_empty() {
            format!("Route for Map {} to {}", self.start, self.end)
        } else {
            format!(
                "Route for Map {} to {} via {}",
                self.start,
                self.end,
                self.stops.join(",")
            )
        }
    }
}

/// Which entry of `loads` is shown next to each leg.
///
/// Loads follow the stop order written in the scenario, not the order the
/// routing provider returns. When stops are optimised the load shown on leg
/// `i` is still the configured value for position `i`, whichever stop the
/// leg actually ends at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOffset {
    /// Load leaving the leg's end stop (`loads[i + 1]`).
    #[default]
    Departing,
    /// Load on arrival at the leg's end stop (`loads[i]`).
    Arriving,
}

impl LoadOffset {
    pub fn index_for_leg(self, leg_index: usize) -> usize {
        match self {
            LoadOffset::Departing => leg_index + 1,
            LoadOffset::Arriving => leg_index,
        }
    }
}

/// Contents of a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    #[serde(default)]
    pub load_offset: LoadOffset,
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = read_file(path)?;
        let set: ScenarioSet = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        set.validated()
    }

    /// Read a solver route dump from disk. See [`ScenarioSet::from_solver_output`].
    pub fn from_solver_output_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_solver_output(&read_file(path.as_ref())?)
    }

    /// Build scenarios from a printed VRP solution, one per vehicle:
    ///
    /// ```text
    /// Route for vehicle 0:
    /// Depot Time(0,0) Load(0) -> Shop Time(447,447) Load(4) -> Depot Time(900,900) Load(4)
    /// ```
    ///
    /// `Time(..)` annotations are dropped. When every node carries `Load(..)`,
    /// the loads of all nodes but the final one become the scenario's
    /// cumulative loads. Vehicles that never leave the depot are skipped.
    pub fn from_solver_output(text: &str) -> Result<Self, ConfigError> {
        let mut scenarios = Vec::new();
        let mut lines = text.lines().enumerate();

        while let Some((number, line)) = lines.next() {
            if !line.trim_start().starts_with("Route for vehicle") {
                continue;
            }

            let (chain_number, chain) = lines
                .by_ref()
                .find(|(_, line)| !line.trim().is_empty())
                .ok_or_else(|| ConfigError::SolverOutput {
                    line: number + 1,
                    message: "vehicle header without a route".to_string(),
                })?;

            let scenario = parse_vehicle_route(chain).map_err(|message| {
                ConfigError::SolverOutput {
                    line: chain_number + 1,
                    message,
                }
            })?;
            if let Some(scenario) = scenario {
                scenarios.push(scenario);
            }
        }

        ScenarioSet {
            load_offset: LoadOffset::default(),
            scenarios,
        }
        .validated()
    }

    /// Rejects an empty set; inconsistent loads only warn, and the report
    /// leaves out loads it cannot index.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.scenarios.is_empty() {
            return Err(ConfigError::NoScenarios);
        }

        for (index, scenario) in self.scenarios.iter().enumerate() {
            if !scenario.loads_consistent() {
                warn!(
                    scenario = index,
                    stops = scenario.stops.len(),
                    loads = scenario.loads.as_ref().map_or(0, Vec::len),
                    "load count does not match stops + 1; missing loads are left out"
                );
            }
        }

        Ok(self)
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `None` for a vehicle that goes straight from depot back to depot.
fn parse_vehicle_route(chain: &str) -> Result<Option<Scenario>, String> {
    let nodes = chain
        .split("->")
        .map(parse_route_node)
        .collect::<Result<Vec<_>, _>>()?;

    let [first, middle @ .., last] = nodes.as_slice() else {
        return Err(format!("route needs a start and an end: {:?}", chain.trim()));
    };
    if middle.is_empty() {
        return Ok(None);
    }

    let loads: Vec<Option<u32>> = nodes[..nodes.len() - 1].iter().map(|(_, load)| *load).collect();
    let loads = if loads.iter().all(Option::is_some) {
        Some(loads.into_iter().flatten().collect())
    } else if loads.iter().all(Option::is_none) {
        None
    } else {
        return Err("Load(..) is missing on some nodes".to_string());
    };

    Ok(Some(Scenario {
        start: first.0.clone(),
        end: last.0.clone(),
        stops: middle.iter().map(|(label, _)| label.clone()).collect(),
        loads,
    }))
}

/// Split `Label Time(a,b) Load(x)` into the label and its load.
fn parse_route_node(node: &str) -> Result<(String, Option<u32>), String> {
    let mut label = node.trim();
    let mut load = None;

    while !label.is_empty() {
        let (head, token) = label.rsplit_once(' ').unwrap_or(("", label));
        if token.starts_with("Time(") && token.ends_with(')') {
            label = head.trim_end();
        } else if let Some(value) = token.strip_prefix("Load(").and_then(|rest| rest.strip_suffix(')')) {
            load = Some(
                value
                    .parse::<u32>()
                    .map_err(|err| format!("bad load {value:?}: {err}"))?,
            );
            label = head.trim_end();
        } else {
            break;
        }
    }

    if label.is_empty() {
        return Err(format!("route node without a label: {:?}", node.trim()));
    }
    Ok((label.to_string(), load))
}
