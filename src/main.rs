use anyhow::Context;
use clap::Parser;
use number_classifier::{
    api_server::ClassifierApiServer,
    config::ServerConfig,
    error::{describe_error_code, ClassifierError},
    facts::NumbersApiClient,
};
use std::sync::Arc;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

/// Classify integers over HTTP
#[derive(Parser)]
#[command(name = "number-classifier")]
#[command(about = "Serve GET /api/classify-number (port taken from $PORT, default 3000)", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        2 => "trace",
        _ => "trace,hyper=debug,tower=debug", // -vvv shows everything including dependencies
    };

    // RUST_LOG wins over the -v count when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(cli.verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(cli.verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("number-classifier started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        let exit_code = match e.downcast_ref::<ClassifierError>() {
            Some(err) => {
                debug!("E{:04}: {}", err.code(), describe_error_code(err.code()));
                err.exit_code()
            }
            None => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let facts = NumbersApiClient::new(config.fact_base_url.clone())
        .context("Failed to set up fun fact client")?;

    ClassifierApiServer::from_config(&config, Arc::new(facts))
        .start()
        .await
        .context("Server terminated with an error")?;

    Ok(())
}
