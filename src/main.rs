use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gateway::api::{self, AppState};
use gateway::cli::{Cli, Commands};
use gateway::config::Config;
use gateway::errors::{GatewayError, GatewayResult};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> GatewayResult<()> {
    let cli = Cli::parse();

    init_tracing();

    // Load configuration
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            cmd_serve(&config).await
        }
        Commands::Health => cmd_health(&config).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gateway=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn cmd_serve(config: &Config) -> GatewayResult<()> {
    let state = Arc::new(AppState::from_config(config));
    let app = api::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn cmd_health(config: &Config) -> GatewayResult<()> {
    let state = AppState::from_config(config);

    println!("Checking upstream integrations...\n");

    let status = state.monitoring.check().await;

    println!("Health: {}", status.health);
    if let Some(error) = &status.error {
        println!("  {}", error);
    }

    if status.is_up() {
        Ok(())
    } else {
        let reason = status.error.unwrap_or_else(|| status.health.to_string());
        Err(GatewayError::Unhealthy(reason))
    }
}
