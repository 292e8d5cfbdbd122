//! Command-line entry point: route every scenario in a file and write an HTML
//! page with one map per scenario.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scenario_router::haversine::StraightLinePlanner;
use scenario_router::html::HtmlSurface;
use scenario_router::nominatim::{NominatimConfig, NominatimGeocoder};
use scenario_router::osrm::{OsrmClient, OsrmConfig};
use scenario_router::router::{RouterOptions, ScenarioRouter};
use scenario_router::scenario::ScenarioSet;
use scenario_router::traits::RoutePlanner;

#[derive(Debug, Parser)]
#[command(name = "scenario-router", version, about)]
struct Cli {
    /// JSON scenario file, or a printed solver solution with `--solver-output`.
    scenarios: PathBuf,

    /// Read the input as `Route for vehicle N:` solver output.
    #[arg(long)]
    solver_output: bool,

    /// Where to write the HTML page.
    #[arg(short, long, default_value = "routes.html")]
    output: PathBuf,

    #[arg(long, default_value = "https://nominatim.openstreetmap.org")]
    geocoder_url: String,

    /// Minimum spacing between geocoder requests, shared by all workers.
    #[arg(long, default_value_t = 1000)]
    geocoder_interval_ms: u64,

    #[arg(long, default_value = "http://localhost:5000")]
    osrm_url: String,

    #[arg(long, default_value = "car")]
    profile: String,

    /// HTTP timeout for each provider call.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Use straight-line distances instead of OSRM.
    #[arg(long)]
    offline: bool,

    /// Keep stops in file order.
    #[arg(long)]
    no_optimize: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("scenario-router: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let set = if cli.solver_output {
        ScenarioSet::from_solver_output_path(&cli.scenarios)?
    } else {
        ScenarioSet::from_path(&cli.scenarios)?
    };
    info!(scenarios = set.scenarios.len(), path = %cli.scenarios.display(), "loaded scenarios");

    let geocoder = NominatimGeocoder::new(NominatimConfig {
        base_url: cli.geocoder_url.clone(),
        timeout_secs: cli.timeout_secs,
        min_request_interval: Duration::from_millis(cli.geocoder_interval_ms),
        ..NominatimConfig::default()
    })?;

    let planner: Box<dyn RoutePlanner + Sync> = if cli.offline {
        Box::new(StraightLinePlanner::new(geocoder.clone()))
    } else {
        Box::new(OsrmClient::new(
            OsrmConfig {
                base_url: cli.osrm_url.clone(),
                profile: cli.profile.clone(),
                timeout_secs: cli.timeout_secs,
            },
            geocoder.clone(),
        )?)
    };

    let options = RouterOptions {
        optimize: !cli.no_optimize,
        load_offset: set.load_offset,
    };
    let router = ScenarioRouter::new(&geocoder, planner, options);
    let surface = HtmlSurface::default();
    let runs = router.run_all(&set.scenarios, &surface);

    for run in &runs {
        match &run.outcome {
            Ok(report) => println!("{report}"),
            Err(failure) => println!("{}\n{failure}\n", run.surface.title),
        }
    }

    fs::write(&cli.output, surface.render_page("Scenario routes", &runs))?;
    info!(path = %cli.output.display(), "wrote route page");
    Ok(())
}
