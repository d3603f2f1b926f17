//! Mentorship server - REST API for mentors, teams and members

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use config::AppConfig;
use mentorship_api::{ApiServer, ApiServerConfig};

/// Serve the mentorship REST API
#[derive(Parser, Debug)]
#[command(name = "mentorship-server")]
#[command(about = "Serve the mentorship REST API", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), "\nCommit: ", env!("GIT_HASH"), "\nBuilt: ", env!("BUILD_TIME")))]
struct Cli {
    /// Path to the YAML config file (defaults to ./mentorship.yml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP API bind address (overrides server.bind_addr)
    #[arg(long)]
    bind_addr: Option<String>,

    /// Database URL (overrides database.url)
    /// PostgreSQL: "postgres://user@localhost/mentorship"
    /// SQLite: "sqlite://./mentorship.db?mode=rwc"
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Database password (overrides database.password)
    #[arg(long, env = "DATABASE_PASSWORD", hide_env_values = true)]
    database_password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the file config
    fn apply(self, config: &mut AppConfig) {
        if let Some(bind_addr) = self.bind_addr {
            config.server.bind_addr = bind_addr;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(password) = self.database_password {
            config.database.password = Some(password);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.no_cors {
            config.server.enable_cors = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::discover(cli.config.as_deref())?;
    cli.apply(&mut config);

    init_logging(&config.logging.level)?;

    info!("Starting mentorship server");

    let bind_addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind_addr))?;

    let database_url = config.database.connection_url()?;
    let db = mentorship_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    mentorship_db::migrate(&db)
        .await
        .context("Failed to run database migrations")?;

    let server = ApiServer::new(
        ApiServerConfig {
            bind_addr,
            enable_cors: config.server.enable_cors,
            cors_origins: config.server.cors_origins.clone(),
        },
        db,
    );

    server.start(shutdown_signal()).await?;

    info!("Mentorship server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(err) => {
            error!("Error listening for shutdown signal: {}", err);
        }
    }
}

fn init_logging(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
