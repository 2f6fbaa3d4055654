//! The `stockflow` command-line runner.
//!
//! ```bash
//! # Run the built-in car model and print speed and distance
//! stockflow car --series v,s --every 100
//!
//! # Run a model described in TOML
//! stockflow run crates/demos/models/drain.toml --series x
//!
//! # Log progress while running
//! stockflow car --trace v,m_fuel --every 500
//!
//! # Include per-tick kernel events
//! RUST_LOG=stockflow_core=trace stockflow run crates/demos/models/drain.toml
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use stockflow_core::{Definition, Event, Model, Observer};
use stockflow_demos::{car, report};
use stockflow_observers::{TickLimit, TraceObserver};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run system-dynamics models built from constants, variables, and streams.
#[derive(Parser)]
#[command(name = "stockflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in car model.
    Car(RunArgs),

    /// Run a model described in a TOML file.
    Run {
        /// Path to the model definition.
        path: PathBuf,

        #[command(flatten)]
        args: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Comma-separated entities to print as a table after the run.
    #[arg(short, long, value_delimiter = ',')]
    series: Vec<String>,

    /// Comma-separated entities to log through tracing while running.
    #[arg(long, value_delimiter = ',')]
    trace: Vec<String>,

    /// Print or log only every n-th tick.
    #[arg(short, long, default_value = "1")]
    every: usize,

    /// Stop after this many ticks even if the model would continue.
    #[arg(long)]
    max_ticks: Option<usize>,

    /// Print the model before and after the run.
    #[arg(short, long)]
    describe: bool,

    /// Plot the printed series in a window after the run.
    #[arg(long, requires = "series")]
    plot: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,stockflow_observers=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Car(args) => simulate(car::model()?, &args),
        Commands::Run { path, args } => simulate(load(&path)?, &args),
    }
}

fn load(path: &Path) -> Result<Model> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let definition: Definition =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let mut model = definition
        .build()
        .with_context(|| format!("building {}", path.display()))?;
    model.initialize_definitions()?;
    Ok(model)
}

fn simulate(mut model: Model, args: &RunArgs) -> Result<()> {
    if args.describe {
        println!("{model}\n");
    }

    let record = !args.series.is_empty();
    let mut trace = TraceObserver::new(&args.trace).every(args.every);
    let mut limit = args.max_ticks.map(TickLimit::new);

    let outcome = model.run_observed(record, |event: &Event<'_>| {
        if !args.trace.is_empty() {
            trace.observe(event);
        }
        limit.as_mut().and_then(|limit| limit.observe(event))
    });

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => bail!("model `{}` failed at t = {}: {err}", model.name(), model.t()),
    };
    info!(status = %outcome.status, ticks = outcome.ticks, "done");
    println!(
        "{}: {} after {} ticks, t = {} s",
        model.name(),
        outcome.status,
        outcome.ticks,
        outcome.time
    );

    if record {
        let names: Vec<&str> = args.series.iter().map(String::as_str).collect();
        print!("{}", report::table(&model, &names, args.every)?);
        if args.plot {
            plot(&model, &names)?;
        }
    }

    if args.describe {
        println!("\n{model}");
    }
    Ok(())
}

#[cfg(feature = "plot")]
fn plot(model: &Model, names: &[&str]) -> Result<()> {
    use stockflow_observers::{ShowConfig, plot_history};

    let Some(history) = model.history() else {
        return Ok(());
    };
    plot_history(history, names, ShowConfig::new().title(model.name()).legend())
        .map_err(|err| anyhow::anyhow!("opening plot window: {err}"))
}

#[cfg(not(feature = "plot"))]
fn plot(_model: &Model, _names: &[&str]) -> Result<()> {
    bail!("plotting needs the `plot` feature: cargo run -p stockflow-demos --features plot")
}
