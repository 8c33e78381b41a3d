//! Civic Select CLI
//!
//! Replays scripted interactions against a select widget and prints what it
//! would render.
//!
//! Usage:
//!   civic-select replay demos/colors.toml
//!   civic-select replay demos/colors.toml --every-step
//!   civic-select replay demos/colors.toml --json
//!   civic-select check demos/colors.toml

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod replay;

use config::Scenario;

#[derive(Parser)]
#[command(name = "civic-select")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replay scripted interactions against an accessible select widget", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and print the resulting widget
    Replay {
        /// Scenario file (TOML)
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Print the widget after every step
        #[arg(long)]
        every_step: bool,
    },

    /// Validate a scenario without replaying it
    Check {
        /// Scenario file (TOML)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Replay {
            file,
            json,
            every_step,
        } => cmd_replay(file, json, every_step),
        Commands::Check { file } => cmd_check(file),
    }
}

fn cmd_replay(file: PathBuf, json: bool, every_step: bool) -> Result<()> {
    let scenario = Scenario::load(&file)?;
    info!(
        "Replaying {} ({} options, {} steps)",
        file.display(),
        scenario.options.len(),
        scenario.steps.len()
    );

    let report = replay::run(&scenario, every_step)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for step in &report.steps {
        println!("# {}: {}", step.index, step.step);
        print!("{}", step.view);
        println!();
    }
    print!("{}", report.view);
    println!("value: {:?}", report.value);
    if !report.commits.is_empty() {
        println!("commits: {}", report.commits.join(", "));
    }
    Ok(())
}

fn cmd_check(file: PathBuf) -> Result<()> {
    let scenario = Scenario::load(&file)?;
    scenario.select_config().validate()?;
    scenario.validate_steps()?;

    info!(
        "{} is valid ({} options, {} steps)",
        file.display(),
        scenario.options.len(),
        scenario.steps.len()
    );
    Ok(())
}
