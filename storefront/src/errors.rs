// storefront/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use vetclinic::VetError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  /// The backend could not serve the request; the message is safe to show.
  #[error("Service Unavailable: {0}")]
  Unavailable(String),

  #[error("Email Delivery Error: {0}")]
  Email(String),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl From<VetError> for AppError {
  fn from(err: VetError) -> Self {
    match err {
      VetError::Unauthenticated => AppError::Auth(err.to_string()),
      VetError::InvalidCredentials => AppError::Auth(err.to_string()),
      VetError::OrderNotFound => AppError::NotFound(err.to_string()),
      VetError::Validation(m) => AppError::Validation(m),
      VetError::Unavailable(_) => AppError::Unavailable(err.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      AppError::Config(_) | AppError::Email(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    let status = self.status_code();
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::Unavailable(m) => {
        HttpResponse::build(status).json(json!({"error": m}))
      }
      AppError::Config(_) => HttpResponse::build(status).json(json!({"error": "Configuration issue"})),
      AppError::Email(_) => HttpResponse::build(status).json(json!({"error": "Email service error"})),
      AppError::Internal(_) => HttpResponse::build(status).json(json!({"error": "An internal error occurred"})),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
