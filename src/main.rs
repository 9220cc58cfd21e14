//! wind-yield entry point: CLI wiring, park run, reporting and export.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wind_yield::config::ParkConfig;
use wind_yield::io::export::{ExportLayout, export_csv};
use wind_yield::pipeline::{ParkRun, load_weather, run_park};

#[derive(Parser, Debug)]
#[command(
    name = "wind-yield",
    version,
    about = "Estimate wind turbine energy yield from weather forecasts"
)]
struct Args {
    /// Load park configuration from a TOML file
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Use a built-in preset (baseline, offshore, storm)
    #[arg(long)]
    preset: Option<String>,

    /// Turbine sites CSV with a latitude,longitude header
    #[arg(long)]
    sites: Option<PathBuf>,

    /// Long-format weather CSV; replaces the synthetic weather
    #[arg(long)]
    weather: Option<PathBuf>,

    /// Override the random seed of synthetic weather
    #[arg(long)]
    seed: Option<u64>,

    /// Export results to a CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// CSV layout: long (one row per turbine and step) or wide
    #[arg(long, default_value_t = ExportLayout::Long)]
    layout: ExportLayout,

    /// Print reports only, without per-step records
    #[arg(short, long)]
    quiet: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// Start the REST API server after the run
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Open the terminal results viewer after the run
    #[cfg(feature = "tui")]
    #[arg(long)]
    tui: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "wind_yield=debug"
    } else {
        "wind_yield=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration: `--config` first, then `--preset`, then baseline.
fn load_config(args: &Args) -> Result<(ParkConfig, String)> {
    if let Some(ref path) = args.config {
        let cfg = ParkConfig::from_toml_file(path)?;
        let label = path
            .file_stem()
            .map_or_else(|| "config".to_string(), |s| s.to_string_lossy().into_owned());
        Ok((cfg, label))
    } else if let Some(ref name) = args.preset {
        Ok((ParkConfig::from_preset(name)?, name.clone()))
    } else {
        Ok((ParkConfig::baseline(), "baseline".to_string()))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (mut cfg, label) = load_config(&args)?;

    if let Some(seed) = args.seed {
        cfg.forecast.seed = seed;
    }
    if let Some(ref path) = args.sites {
        cfg.sites.path = Some(path.clone());
        cfg.sites.has_header = true;
    }
    if let Some(ref path) = args.weather {
        cfg.weather.source = "csv".to_string();
        cfg.weather.path = Some(path.clone());
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("{} configuration error(s)", errors.len());
    }

    let setup = cfg.build().context("failed to set up park")?;
    let weather = load_weather(setup.weather.as_ref(), &setup.turbines)
        .context("failed to load weather")?;
    let results = run_park(&setup.turbines, &weather, setup.vapor_model)?;
    let run = ParkRun::new(setup.turbines, results);
    info!(%label, turbines = run.turbines.len(), "park run complete");

    if !args.quiet {
        for r in &run.results {
            println!("== turbine {} ==", r.turbine_id);
            for rec in r.records() {
                println!("{rec}");
            }
        }
        println!();
    }
    for report in &run.reports {
        println!("{report}\n");
    }
    println!("{}", run.park);

    if let Some(ref path) = args.output {
        export_csv(&run.results, args.layout, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), layout = %args.layout, "results written");
    }

    #[cfg(feature = "tui")]
    if args.tui {
        wind_yield::tui::run(run.clone(), &label).context("terminal viewer failed")?;
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(wind_yield::api::serve(Arc::new(run), addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    Ok(())
}
