mod figure;
mod manager;
mod mixture;
mod params;
mod quadrature;
mod response;
mod scenario;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Directory where the generated figures are written.
    #[arg(long, default_value = ".")]
    fig_dir: PathBuf,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.fig_dir).context("failed to construct mgr")?;
    mgr.generate_figures()?;

    Ok(())
}
