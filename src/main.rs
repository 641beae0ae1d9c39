use gravitation::{ScenarioConfig, Scenario};
use gravitation::bench_step;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gravitation")]
#[command(about = "2D N-body gravitation with a central attractor", long_about = None)]
struct Args {
    /// Scenario file; looked up under `scenarios/` when not found as given
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Ignore scenario files and run with built-in defaults
    #[arg(short, long)]
    defaults: bool,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value = "1000")]
    frames: u64,

    /// Print step timings for growing body counts and exit
    #[arg(long)]
    bench: bool,

    /// Debug logging; otherwise `RUST_LOG` applies, falling back to info
    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    if args.defaults {
        return Ok(ScenarioConfig::default());
    }

    let given = PathBuf::from(&args.file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name)
    };

    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

/// `-v` wins, then a valid `RUST_LOG`, then info
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn run_headless(scenario: Scenario, frames: u64) {
    let mut sim = scenario.simulation;
    let mut respawned = 0usize;

    for _ in 0..frames {
        respawned += sim.step().respawned.len();
    }

    info!(
        frames,
        bodies = sim.system.len(),
        respawned,
        t = sim.system.t,
        "headless run finished"
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(args.verbose, rust_log.as_deref()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let mut scenario_cfg = load_scenario(&args)?;
    if let Some(seed) = args.seed {
        scenario_cfg.parameters.seed = seed;
    }

    if args.bench {
        bench_step(&scenario_cfg)?;
        return Ok(());
    }

    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    if args.headless {
        run_headless(scenario, args.frames);
        return Ok(());
    }

    #[cfg(feature = "viewer")]
    gravitation::run_2d(scenario);

    #[cfg(not(feature = "viewer"))]
    {
        tracing::warn!("built without the `viewer` feature, running headless");
        run_headless(scenario, args.frames);
    }

    Ok(())
}
