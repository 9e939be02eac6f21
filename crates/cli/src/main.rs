//! SAP command line
//!
//! Loads Web of Science exports, classifies each citation graph into roots,
//! trunk and leaves, and prints or exports the result:
//! - `export`: GraphML or JSON of the first graph
//! - `describe`: structural summary per graph
//! - `root` / `trunk` / `leaf`: ranked listing per graph

mod cli;
mod handlers;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use handlers::Context;
use sap_common::{config::ObservabilityConfig, metrics, AppConfig, Role, SapError};
use sap_engine::Classifier;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sap: {:#}", e);
            let code = e.downcast_ref::<SapError>().map_or(1, SapError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration, then let the command line win
    let mut config = AppConfig::load(cli.config.as_deref()).map_err(SapError::from)?;
    cli.apply_overrides(&mut config);

    init_tracing(&config.observability, cli.verbose);
    metrics::register_metrics();

    let classifier_config = config.classifier_config();
    info!(version = sap_common::VERSION, "Starting sap");
    debug!(config = ?classifier_config, "Classifier configured");

    let ctx = Context {
        classifier: Classifier::new(classifier_config),
        doi_resolver: config.output.doi_resolver,
    };

    match &cli.command {
        Command::Export(args) => handlers::export::run(&ctx, args),
        Command::Describe(args) => handlers::describe::run(&ctx, args),
        Command::Root(args) => handlers::listing::run(&ctx, Role::Root, args),
        Command::Trunk(args) => handlers::listing::run(&ctx, Role::Trunk, args),
        Command::Leaf(args) => handlers::listing::run(&ctx, Role::Leaf, args),
    }
}

/// Logs go to stderr; stdout carries command output
fn init_tracing(config: &ObservabilityConfig, verbose: u8) {
    let level = match verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1);

    if config.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
