//! Car service entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use car_service::api::{self, create_router, swagger_ui_router, AppState};
use car_service::carstore::InMemoryCarStore;
use car_service::config::{Config, VERBOSE_LOG_FILTER};
use car_service::metrics;

/// Vehicle records over HTTP.
#[derive(Parser, Debug)]
#[command(name = "car-service")]
#[command(about = "In-memory vehicle records behind a JSON HTTP API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true, env = "VERBOSE")]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Start with the fixture cars (overrides SEED_FIXTURES).
    #[arg(long)]
    seed: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Start with the fixture cars (overrides SEED_FIXTURES).
        #[arg(long)]
        seed: bool,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Serve { port, seed }) => cmd_serve(port, seed).await,
        None => cmd_serve(args.port, args.seed).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CAR SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

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
    println!("  Swagger UI Dir: {}", config.swagger_ui_dir.display());
    if !config.swagger_ui_dir.is_dir() {
        println!("  WARNING: Swagger UI directory does not exist, /swagger-ui/ will 404");
    }
    println!("  Seed Fixtures: {}", config.seed_fixtures);
    println!("  Log Filter: {}", config.log_filter());
    println!("  JSON Logs: {}", config.log_json);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API until shutdown.
async fn cmd_serve(port_override: Option<u16>, seed_override: bool) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if seed_override {
        config.seed_fixtures = true;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    // Initialize metrics
    let metrics_handle = metrics::install_recorder().map_err(|e| {
        error!("Failed to install metrics recorder: {}", e);
        e
    })?;

    let store = InMemoryCarStore::from_seed_flag(config.seed_fixtures);
    info!(
        cars = store.len(),
        seeded = config.seed_fixtures,
        "Car store ready"
    );

    let state = AppState::new(store).with_metrics(metrics_handle);
    let router = create_router(state).merge(swagger_ui_router(&config.swagger_ui_dir));

    let listener = api::bind(config.port).await?;
    api::serve(listener, router).await.map_err(|e| {
        error!("HTTP server failed: {}", e);
        e
    })?;

    Ok(())
}
