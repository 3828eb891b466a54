//! l5x-export: turn a Logix Designer L5X project export into plain-text reports.
//!
//! One run reads one `.L5X` file and writes seven reports (controller info,
//! global tags, user-defined types, add-on instructions, I/O modules, tasks
//! and programs) into the output directory:
//!
//! - `l5x-export Project.L5X out/`
//! - `l5x-export -vv --overwrite Project.L5X out/`

mod classify;
mod error;
mod model;
mod output;
mod parser;
mod render;
mod xml;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "l5x-export",
    about = "Export an L5X project file to plain-text reports"
)]
struct Cli {
    /// The .L5X project export to read
    input: PathBuf,

    /// Directory the reports are written to (created if missing)
    out_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Replace existing reports instead of writing timestamped copies
    #[arg(long)]
    overwrite: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    println!("Processing file: {}", cli.input.display());

    // Nothing is written unless the whole document loads.
    let project = parser::load_file(&cli.input)
        .with_context(|| format!("failed to export {}", cli.input.display()))?;
    let reports = render::render_all(&project);

    output::ensure_dir(&cli.out_dir)?;
    for report in &reports {
        let path = output::write_report(&cli.out_dir, report, cli.overwrite)?;
        println!("  > {} exported to {}", report.section.title(), path.display());
    }

    println!("\nExport completed successfully!");
    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
