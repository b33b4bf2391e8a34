// storefront/src/services/email_service.rs
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};
use tracing::{info, instrument};
use uuid::Uuid;
use vetclinic::{format_total, NewOrderEmail, RenderedEmail};

#[derive(Debug)]
pub struct SentEmailInfo {
  pub to: String,
  pub subject: String,
  pub message_id: String,
}

/// Stand-in for the transactional mail provider: logs instead of delivering.
pub async fn send_mock_email(to: &str, from: &str, email: &RenderedEmail) -> AppResult<SentEmailInfo> {
  info!(
    "Simulating sending email: To='{}', From='{}', Subject='{}'",
    to, from, email.subject
  );
  if to.trim().is_empty() || !to.contains('@') {
    return Err(AppError::Email(format!("Invalid recipient address '{}'", to)));
  }
  tokio::time::sleep(std::time::Duration::from_millis(5)).await; // Simulate network latency

  let body_preview = email.text.chars().take(50).collect::<String>();
  let message_id = format!("mock_email_{}", Uuid::new_v4());
  info!(body_preview = %body_preview, "Mock email sent successfully. Message ID: {}", message_id);

  Ok(SentEmailInfo {
    to: to.to_string(),
    subject: email.subject.clone(),
    message_id,
  })
}

/// Renders the new-order notification and sends it to the clinic's order inbox.
#[instrument(name = "email_service::notify_new_order", skip(config), fields(order_id = %order_id, total_cents))]
pub async fn notify_new_order(config: &AppConfig, order_id: Uuid, total_cents: i64) -> AppResult<SentEmailInfo> {
  let total_display = format_total(total_cents);
  let email = NewOrderEmail {
    order_id,
    total_display: &total_display,
    site_url: &config.site_url,
    routes: &config.routes,
  }
  .render();
  send_mock_email(&config.order_notification_email, &config.email_sender, &email).await
}
