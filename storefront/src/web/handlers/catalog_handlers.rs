// storefront/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{error, instrument};
use vetclinic::{resolve_link, LinkKind, VetError};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::CurrentSession;

pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Header and appointment link targets for the caller.
pub async fn nav_handler(app_state: web::Data<AppState>, session: CurrentSession) -> HttpResponse {
  let routes = &app_state.config.routes;
  HttpResponse::Ok().json(json!({
      "account": resolve_link(LinkKind::Account, session.session(), routes),
      "appointment": resolve_link(LinkKind::Appointment, session.session(), routes),
  }))
}

/// Products with their variants. Images from hosts outside the configured
/// allow-list are dropped.
#[instrument(name = "handler::catalog", skip_all)]
pub async fn catalog_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.data.catalog().await.map_err(|e| {
    error!(error = %e, "Catalog query failed.");
    VetError::Unavailable("load the catalog")
  })?;
  let products = app_state.config.remote_image_hosts.filter_catalog(products);
  Ok(HttpResponse::Ok().json(products))
}
