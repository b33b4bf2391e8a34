// storefront/src/web/handlers/dashboard_handlers.rs

//! Staff pages. Only reachable through `admin_gate`.

use actix_web::{web, HttpResponse};
use tracing::{debug, error, instrument};
use uuid::Uuid;
use vetclinic::VetError;

use crate::errors::AppError;
use crate::state::AppState;

const RECENT_ORDERS_LIMIT: i64 = 50;

#[instrument(name = "handler::dashboard_orders", skip_all)]
pub async fn recent_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = app_state.data.recent_orders(RECENT_ORDERS_LIMIT).await.map_err(|e| {
    error!(error = %e, "Recent orders query failed.");
    VetError::Unavailable("load the orders")
  })?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::dashboard_order", skip(app_state))]
pub async fn order_detail_handler(
  app_state: web::Data<AppState>,
  order_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order_id = order_id.into_inner();
  match app_state.data.order(order_id).await {
    Ok(Some(order)) => Ok(HttpResponse::Ok().json(order)),
    Ok(None) => {
      debug!("No order with this id.");
      Err(VetError::OrderNotFound.into())
    }
    Err(e) => {
      error!(error = %e, "Order query failed.");
      Err(VetError::Unavailable("load the order").into())
    }
  }
}
