//! Restaurant onboarding server

mod config;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use clap::{Parser, Subcommand};
use config::{AppConfig, LoggingConfig};
use restaurant_onboarding::api::rest::AssetLimits;
use restaurant_onboarding::{OnboardingModule, StorageConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "onboarding-server", version, about = "Restaurant onboarding server")]
struct Cli {
    /// YAML configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Print the effective configuration as YAML
    PrintConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::PrintConfig => {
            print!("{}", serde_yaml::to_string(&cfg)?);
            Ok(())
        }
        Command::Migrate => {
            init_tracing(&cfg.logging);
            let db = connect(&cfg).await?;
            OnboardingModule::migrate(&db).await
        }
        Command::Serve => {
            init_tracing(&cfg.logging);
            serve(cfg).await
        }
    }
}

fn init_tracing(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn connect(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.database.url.clone());
    options
        .max_connections(cfg.database.max_connections)
        .sqlx_logging(false);
    Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.database.url))
}

async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect(&cfg).await?;
    if cfg.database.auto_migrate {
        OnboardingModule::migrate(&db).await?;
    }

    let body_limit = AssetLimits::new(cfg.onboarding.max_upload_bytes).body_limit();
    let module = OnboardingModule::new(cfg.onboarding.clone(), Arc::new(db))?;

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(module.router());
    if let StorageConfig::Filesystem { root, .. } = &cfg.onboarding.storage {
        app = app.nest_service(&cfg.server.uploads_route, ServeDir::new(root));
    }
    let app = app
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr)
        .await
        .context("bind server listener failed")?;
    tracing::info!(addr = %cfg.server.bind_addr, "onboarding-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
