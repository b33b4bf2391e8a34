// storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use vetclinic::{ImageHosts, SiteRoutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  /// Public base URL, used to build links in outgoing emails.
  pub site_url: String,
  pub routes: SiteRoutes,

  pub session_cookie_name: String,
  pub session_ttl_hours: i64,

  pub email_sender: String,
  pub order_notification_email: String,
  /// Shared secret expected in `X-Webhook-Secret`. Unset disables the check.
  pub webhook_secret: Option<String>,

  pub remote_image_hosts: ImageHosts,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process
  /// environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let site_url = get_env("SITE_URL").unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

    let session_cookie_name = get_env("SESSION_COOKIE_NAME").unwrap_or_else(|_| "vet_session".to_string());
    let session_ttl_hours = get_env("SESSION_TTL_HOURS")
      .unwrap_or_else(|_| "168".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_HOURS: {}", e)))?;
    if session_ttl_hours <= 0 {
      return Err(AppError::Config("SESSION_TTL_HOURS must be positive".to_string()));
    }

    let email_sender = get_env("EMAIL_SENDER").unwrap_or_else(|_| "noreply@example.com".to_string());
    let order_notification_email =
      get_env("ORDER_NOTIFICATION_EMAIL").unwrap_or_else(|_| "pedidos@example.com".to_string());
    let webhook_secret = get_env("WEBHOOK_SECRET").ok();

    let remote_image_hosts = ImageHosts::parse(&get_env("REMOTE_IMAGE_HOSTS").unwrap_or_default());

    let log_format = match get_env("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()).to_lowercase().as_str() {
      "pretty" => LogFormat::Pretty,
      "json" => LogFormat::Json,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected pretty or json", other))),
    };

    // Avoid logging secrets: DATABASE_URL and WEBHOOK_SECRET stay out of this line.
    tracing::info!(
      server_host = %server_host,
      server_port,
      site_url = %site_url,
      webhook_secret_set = webhook_secret.is_some(),
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      site_url,
      routes: SiteRoutes::default(),
      session_cookie_name,
      session_ttl_hours,
      email_sender,
      order_notification_email,
      webhook_secret,
      remote_image_hosts,
      log_format,
    })
  }
}
