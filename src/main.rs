use anyhow::{Context, Result};
use clap::Command;
use colored::*;

use procwatch::ui::run_monitor_app;
use procwatch::Config;

fn main() {
    // No options of its own; clap still answers --help and --version
    Command::new("procwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live process table with CPU and memory usage, refreshed on demand or on a timer")
        .get_matches();

    procwatch::init_logging();

    if let Err(e) = run() {
        log::error!("Fatal: {:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    log::info!("Starting procwatch with {:?}", config);

    run_monitor_app(config)
}
