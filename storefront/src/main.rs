// storefront/src/main.rs

mod config;
mod db;
mod errors;
mod services;
mod state;
#[cfg(test)]
mod test_support;
mod web;

use crate::config::{AppConfig, LogFormat};
use crate::db::PgClient;
use crate::state::AppState;

use actix_web::middleware::from_fn;
use actix_web::{web as actix_data, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // Allow RUST_LOG override
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

/// `storefront_server hash-password <password>` prints an argon2 hash for
/// seeding `propietarios.password_hash`.
fn run_cli(args: &[String]) -> Option<std::io::Result<()>> {
  match args {
    [command, password] if command == "hash-password" => Some(
      services::auth_service::hash_password(password)
        .map(|hash| println!("{}", hash))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())),
    ),
    [command, ..] if command == "hash-password" => Some(Err(std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      "usage: storefront_server hash-password <password>",
    ))),
    _ => None,
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let args: Vec<String> = std::env::args().skip(1).collect();
  if let Some(result) = run_cli(&args) {
    return result;
  }

  // Peek at LOG_FORMAT before the full config load so config errors are logged
  // in the requested format.
  let log_format = match std::env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
    Ok(v) if v == "json" => LogFormat::Json,
    _ => LogFormat::Pretty,
  };
  init_tracing(log_format);

  tracing::info!("Starting veterinary storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let db_pool = match PgPool::connect(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string()));
    }
  };

  let pg_client = Arc::new(PgClient::new(
    db_pool,
    chrono::Duration::hours(app_config.session_ttl_hours),
  ));
  let app_state = AppState::new(pg_client.clone(), pg_client, app_config.clone());

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(from_fn(web::admin_gate))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
