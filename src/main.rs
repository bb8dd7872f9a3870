//! Task Planner entry point
//!
//! Renders the focused screen of the configured navigator tree. Set
//! `RUST_LOG` to adjust logging.

use anyhow::{Context, Result};
use app_ui::navigation::NavigationHandle;
use clap::Parser;
use task_planner::cli::Cli;
use task_planner::{App, AppConfig};
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(navigator) = cli.navigator {
        config.navigation = navigator.tree();
    }

    let app = App::start(config, NavigationHandle::global().clone()).context("Failed to start the application")?;
    let frame = app.render()?;

    if frame.header_shown {
        println!("== {} ==", frame.title);
    }
    println!("{}", frame.body);
    Ok(())
}
