//! Scenario pipeline: geocode start, geocode end, route, render.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::ScenarioFailure;
use crate::itinerary::ItineraryReport;
use crate::scenario::{LoadOffset, Scenario};
use crate::traits::{DEPOT_LABEL, Geocoder, PresentationSurface, RoutePlanner, WAYPOINT_LABEL};

#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Let the routing provider reorder stops for the shortest route.
    pub optimize: bool,
    pub load_offset: LoadOffset,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            load_offset: LoadOffset::default(),
        }
    }
}

/// What one scenario produced. `surface` holds whatever was drawn before the
/// pipeline stopped.
#[derive(Debug)]
pub struct ScenarioRun<H> {
    pub index: usize,
    pub surface: H,
    pub outcome: Result<ItineraryReport, ScenarioFailure>,
}

impl<H> ScenarioRun<H> {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub struct ScenarioRouter<G, R> {
    geocoder: G,
    planner: R,
    options: RouterOptions,
}

impl<G, R> ScenarioRouter<G, R>
where
    G: Geocoder + Sync,
    R: RoutePlanner + Sync,
{
    pub fn new(geocoder: G, planner: R, options: RouterOptions) -> Self {
        Self {
            geocoder,
            planner,
            options,
        }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Run every scenario on the rayon pool. Results come back in input
    /// order; a failure in one scenario never touches another.
    pub fn run_all<S>(&self, scenarios: &[Scenario], surface: &S) -> Vec<ScenarioRun<S::Handle>>
    where
        S: PresentationSurface + Sync,
        S::Handle: Send,
    {
        let runs: Vec<_> = scenarios
            .par_iter()
            .enumerate()
            .map(|(index, scenario)| self.run_one(index, scenario, surface))
            .collect();

        let failed = runs.iter().filter(|run| !run.is_success()).count();
        info!(scenarios = runs.len(), failed, "routing finished");
        runs
    }

    pub fn run_one<S>(&self, index: usize, scenario: &Scenario, surface: &S) -> ScenarioRun<S::Handle>
    where
        S: PresentationSurface,
    {
        let mut handle = surface.create_map_surface(&scenario.title());
        let outcome = self.route_scenario(index, scenario, surface, &mut handle);

        if let Err(failure) = &outcome {
            warn!(scenario = index, error = %failure, "scenario failed");
        }

        ScenarioRun {
            index,
            surface: handle,
            outcome,
        }
    }

    fn route_scenario<S>(
        &self,
        index: usize,
        scenario: &Scenario,
        surface: &S,
        handle: &mut S::Handle,
    ) -> Result<ItineraryReport, ScenarioFailure>
    where
        S: PresentationSurface,
    {
        let origin = self
            .geocoder
            .geocode(&scenario.start)
            .map_err(ScenarioFailure::Start)?;
        debug!(scenario = index, label = %scenario.start, ?origin, "start resolved");
        surface.place_marker(handle, origin, DEPOT_LABEL);

        let destination = self
            .geocoder
            .geocode(&scenario.end)
            .map_err(ScenarioFailure::End)?;
        debug!(scenario = index, label = %scenario.end, ?destination, "end resolved");
        surface.place_marker(handle, destination, DEPOT_LABEL);

        let route = self
            .planner
            .route(origin, destination, &scenario.stops, self.options.optimize)
            .map_err(ScenarioFailure::Route)?;

        if route.legs.len() != scenario.stops.len() + 1 {
            warn!(
                scenario = index,
                legs = route.legs.len(),
                stops = scenario.stops.len(),
                "provider returned an unexpected number of legs"
            );
        }

        surface.render_route(handle, &route);
        for at in route.waypoint_locations() {
            surface.place_marker(handle, at, WAYPOINT_LABEL);
        }

        let report = ItineraryReport::build(scenario, &route, self.options.load_offset);
        surface.append_report_lines(handle, &report);

        info!(
            scenario = index,
            legs = route.legs.len(),
            meters = route.total_distance_meters(),
            "scenario routed"
        );
        Ok(report)
    }
}
