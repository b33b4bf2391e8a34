// storefront/src/web/handlers/webhook_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::email_service;
use crate::state::AppState;

pub const WEBHOOK_SECRET_HEADER: &str = "X-Webhook-Secret";

/// Database webhook body for a row change in `pedidos`.
#[derive(Deserialize, Debug)]
pub struct NewOrderPayload {
  #[serde(rename = "type", default)]
  pub event_type: Option<String>,
  pub record: NewOrderRecord,
}

#[derive(Deserialize, Debug)]
pub struct NewOrderRecord {
  pub id: Uuid,
  /// Order total in cents.
  pub total: i64,
}

fn check_secret(req: &HttpRequest, expected: Option<&str>) -> Result<(), AppError> {
  let Some(expected) = expected else {
    return Ok(());
  };
  let provided = req.headers().get(WEBHOOK_SECRET_HEADER).and_then(|h| h.to_str().ok());
  if provided == Some(expected) {
    Ok(())
  } else {
    warn!(header_present = provided.is_some(), "Webhook secret mismatch.");
    Err(AppError::Auth("Invalid webhook secret".to_string()))
  }
}

#[instrument(
    name = "handler::new_order_webhook",
    skip(app_state, req, payload),
    fields(order_id = %payload.record.id)
)]
pub async fn new_order_webhook_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  payload: web::Json<NewOrderPayload>,
) -> Result<HttpResponse, AppError> {
  check_secret(&req, app_state.config.webhook_secret.as_deref())?;

  if let Some(event_type) = payload.event_type.as_deref() {
    if !event_type.eq_ignore_ascii_case("INSERT") {
      info!(event_type, "Ignoring non-insert order event.");
      return Ok(HttpResponse::Ok().json(json!({ "status": "ignored" })));
    }
  }

  let sent = email_service::notify_new_order(&app_state.config, payload.record.id, payload.record.total).await?;
  info!(message_id = %sent.message_id, to = %sent.to, subject = %sent.subject, "New order notification sent.");
  Ok(HttpResponse::Ok().json(json!({
      "status": "sent",
      "messageId": sent.message_id,
      "subject": sent.subject,
  })))
}
