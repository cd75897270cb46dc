//! Arbitrage calculator entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

use arbi::api::{create_router, AppState, CalculateResponse};
use arbi::arbitrage::{compute, render, CalculationOutcome};
use arbi::config::Config;
use arbi::metrics;
use arbi::utils::shutdown_signal;

/// Exit code for rejected calculator input.
const EXIT_INVALID_INPUT: i32 = 2;

/// Arbitrage stake calculator.
#[derive(Parser, Debug)]
#[command(name = "arbi")]
#[command(about = "Find guaranteed-profit stake splits across 2-4 betting outcomes")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the stake allocation for one set of odds.
    Calc {
        /// Decimal odds in outcome order (repeat the flag or separate with commas).
        #[arg(short, long = "odds", required = true, value_delimiter = ',')]
        odds: Vec<String>,

        /// Total amount to stake.
        #[arg(short, long, allow_hyphen_values = true)]
        stake: String,

        /// Number of outcomes (defaults to the number of odds given).
        #[arg(short = 'n', long)]
        outcomes: Option<usize>,

        /// Print the outcome as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Serve the calculator over HTTP.
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let mut config = Config::load()?;
    if args.verbose {
        config.verbose = true;
    }

    // Initialize logging
    config.init_logging();

    match args.command {
        Command::Calc {
            odds,
            stake,
            outcomes,
            json,
        } => cmd_calc(&odds, &stake, outcomes, json),
        Command::Serve { port } => cmd_serve(config, port).await,
        Command::CheckConfig => cmd_check_config(&config),
    }
}

/// Run one calculation and print the result.
fn cmd_calc(odds: &[String], stake: &str, outcomes: Option<usize>, json: bool) -> anyhow::Result<()> {
    let outcome = compute(outcomes.unwrap_or(odds.len()), odds, stake);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&CalculateResponse::from(&outcome))?
        );
    } else {
        println!("{}", render(&outcome));
    }

    if let CalculationOutcome::InvalidInput(reason) = &outcome {
        error!("Invalid input: {}", reason);
        std::process::exit(EXIT_INVALID_INPUT);
    }

    Ok(())
}

/// Run the HTTP API until a shutdown signal arrives.
async fn cmd_serve(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let port = port_override.unwrap_or(config.port);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Initialize metrics
    let handle = metrics::install_recorder()?;
    let app_state = AppState::new(Some(handle));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ARBI - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Log Level: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("  Verbose: {}", config.verbose);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
