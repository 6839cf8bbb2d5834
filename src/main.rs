//! TaskLinex authentication server
//!
//! Registers accounts and exchanges credentials for signed bearer tokens.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tasklinex_api::{ApiServer, ApiServerConfig};

/// TaskLinex - account registration and authentication API
#[derive(Parser, Debug)]
#[command(name = "tasklinex-server")]
#[command(about = "TaskLinex - account registration and authentication API")]
#[command(version)]
struct Cli {
    /// Address to bind the API server
    #[arg(long, env = "TASKLINEX_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Database connection URL
    #[arg(
        long,
        env = "TASKLINEX_DATABASE_URL",
        default_value = "sqlite://tasklinex.db?mode=rwc"
    )]
    database_url: String,

    /// Symmetric secret for signing access tokens (required; no built-in default)
    #[arg(long, env = "TASKLINEX_JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Setup logging with the specified log level
fn setup_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    // Misconfigured signing secret is fatal here, before any request is served
    if cli.jwt_secret.trim().is_empty() {
        anyhow::bail!("Signing secret (TASKLINEX_JWT_SECRET) must not be empty");
    }

    info!("TaskLinex server starting...");

    let db = tasklinex_db::connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    // One-time idempotent provisioning, before the listener is bound
    tasklinex_db::migrate(&db)
        .await
        .context("Failed to run database migrations")?;

    let config = ApiServerConfig {
        bind_addr: cli.bind,
        jwt_secret: cli.jwt_secret,
    };
    let server = ApiServer::new(config, db);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let serve_task = tokio::spawn(server.start());

    tokio::select! {
        _ = &mut ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        result = serve_task => {
            match result {
                Ok(Ok(())) => {
                    info!("Server stopped normally");
                }
                Ok(Err(e)) => {
                    error!("Server error: {:#}", e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Server task panicked: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    info!("TaskLinex server stopped");
    Ok(())
}
