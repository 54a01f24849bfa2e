//! Endpoint catalog service entry point.

use std::str::FromStr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use endpoint_catalog::api::{create_router, register_endpoints, DocCatalog};
use endpoint_catalog::config::Config;
use endpoint_catalog::error::AppError;
use endpoint_catalog::lister::{list_endpoints, EndpointDescriptor};
use endpoint_catalog::utils::shutdown_signal;

/// Self-describing demo web service.
#[derive(Parser, Debug)]
#[command(name = "endpoint-catalog")]
#[command(about = "Demo web service that lists its own registered endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Print the endpoint listing without starting the server.
    Routes,

    /// Print a documentation catalog as JSON.
    Openapi {
        /// Catalog name (v1 or v2).
        catalog: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG and VERBOSE from .env apply
    let loaded = Config::load();

    // Initialize logging
    let directive = match &loaded {
        Ok(config) => config.log_directive(args.verbose),
        Err(_) => Config::default().log_directive(args.verbose),
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid log directive {directive:?}: {e}; falling back to info");
        EnvFilter::new("info")
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = validated(loaded)?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Routes) => cmd_routes(),
        Some(Command::Openapi { catalog }) => cmd_openapi(&config, &catalog),
        Some(Command::Serve) | None => cmd_serve(config, args.port).await,
    }
}

/// Validate loaded configuration, logging the failure reason.
fn validated(loaded: Result<Config, envy::Error>) -> anyhow::Result<Config> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        AppError::from(e)
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ENDPOINT CATALOG - CONFIGURATION CHECK");
    println!("======================================================================");

    println!("Environment:  {}", config.app_env);
    println!("App name:     {}", config.app_name);
    println!("Bind address: {}", config.bind_addr()?);
    println!("Swagger UI:   {}", if config.is_development() { "enabled" } else { "disabled" });
    println!("Log filter:   {}", config.log_directive(false));
    println!();
    println!("Configuration OK");

    Ok(())
}

/// Print the endpoint listing as JSON.
fn cmd_routes() -> anyhow::Result<()> {
    let (_, routes) = register_endpoints();
    let descriptors: Vec<EndpointDescriptor> = list_endpoints(routes.endpoints()).collect();

    println!("{}", serde_json::to_string_pretty(&descriptors).map_err(AppError::from)?);
    Ok(())
}

/// Print one documentation catalog as JSON.
fn cmd_openapi(config: &Config, catalog: &str) -> anyhow::Result<()> {
    let catalog = DocCatalog::from_str(catalog)
        .map_err(|_| AppError::UnknownCatalog(catalog.to_string()))?;
    let (_, routes) = register_endpoints();

    let doc = catalog.openapi(&config.app_name, &routes);
    println!("{}", serde_json::to_string_pretty(&doc).map_err(AppError::from)?);
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Environment: {}", config.app_env);
    if config.is_development() {
        info!("Swagger UI enabled at {}", endpoint_catalog::api::docs::SWAGGER_UI_PATH);
    }

    let router = create_router(&config);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::from)?;

    info!("Server stopped");
    Ok(())
}
