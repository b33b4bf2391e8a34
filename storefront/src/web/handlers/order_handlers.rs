// storefront/src/web/handlers/order_handlers.rs

//! Customer account pages: the caller's own orders.

use actix_web::{web, HttpResponse};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::CurrentSession;

#[instrument(name = "handler::customer_orders", skip_all)]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
) -> Result<HttpResponse, AppError> {
  let orders = vetclinic::list_customer_orders(app_state.data.as_ref(), session.session()).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::customer_order", skip(app_state, session))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
  order_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let order = vetclinic::get_customer_order_by_id(app_state.data.as_ref(), session.session(), order_id.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}
