//! poolpass-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! JSON record store, and serves the API under `/api` with the kiosk's
//! static assets on the root path.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::{
  Router,
  http::{HeaderValue, header},
  middleware::{self, Next},
  response::Response,
};
use clap::Parser;
use poolpass_api::AppState;
use poolpass_store_json::JsonFileStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "PoolPass check-in server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` plus
/// `POOLPASS_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:       String,
  port:       u16,
  /// Directory holding the JSON record files.
  data_dir:   PathBuf,
  /// Directory holding the kiosk single-page app.
  assets_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 3000)?
    .set_default("data_dir", "data")?
    .set_default("assets_dir", "public")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("POOLPASS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the record store, seeding any missing records.
  let store = JsonFileStore::open(&server_cfg.data_dir)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.data_dir)
    })?;

  let state = AppState::initialize(Arc::new(store))
    .await
    .context("failed to load occupancy record")?;

  // Unknown paths fall back to index.html so client-side routing works.
  let spa = ServeDir::new(&server_cfg.assets_dir).not_found_service(
    ServeFile::new(server_cfg.assets_dir.join("index.html")),
  );

  let app = Router::new()
    .nest("/api", poolpass_api::api_router(state))
    .fallback_service(spa)
    .layer(middleware::from_fn(security_headers))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("shut down cleanly");
  Ok(())
}

/// Baseline hardening headers for a kiosk deployment.
async fn security_headers(
  request: axum::extract::Request,
  next: Next,
) -> Response {
  let mut response = next.run(request).await;
  let headers = response.headers_mut();
  headers.insert(
    header::X_CONTENT_TYPE_OPTIONS,
    HeaderValue::from_static("nosniff"),
  );
  headers
    .insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
  response
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
  }
}
