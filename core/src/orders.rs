// core/src/orders.rs

//! Owner-scoped order reads backing the customer account pages.

use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::client::DataClient;
use crate::error::{VetError, VetResult};
use crate::model::{OrderDetail, OrderSummary, Session};

/// Fetches one order for the session's user, with items, variants and catalog
/// products populated.
///
/// Fails with `Unauthenticated` when there is no session, and with
/// `OrderNotFound` when no row matches `id = order_id AND owner = user`, which
/// covers both missing orders and orders owned by someone else.
#[instrument(
  name = "orders::get_customer_order_by_id",
  skip(data, session),
  fields(user_id = ?session.map(|s| s.user_id)),
  err(Display)
)]
pub async fn get_customer_order_by_id<D>(data: &D, session: Option<&Session>, order_id: Uuid) -> VetResult<OrderDetail>
where
  D: DataClient + ?Sized,
{
  let session = session.ok_or(VetError::Unauthenticated)?;

  match data.customer_order(order_id, session.user_id).await {
    Ok(Some(detail)) => {
      debug!(items = detail.items.len(), "Order loaded.");
      Ok(detail)
    }
    Ok(None) => {
      debug!("No order matched the id for this owner (missing or owned by someone else).");
      Err(VetError::OrderNotFound)
    }
    Err(e) => {
      error!(error = %e, "Order query failed.");
      Err(VetError::Unavailable("load the order"))
    }
  }
}

/// Orders placed by the session's user, newest first.
#[instrument(
  name = "orders::list_customer_orders",
  skip(data, session),
  fields(user_id = ?session.map(|s| s.user_id)),
  err(Display)
)]
pub async fn list_customer_orders<D>(data: &D, session: Option<&Session>) -> VetResult<Vec<OrderSummary>>
where
  D: DataClient + ?Sized,
{
  let session = session.ok_or(VetError::Unauthenticated)?;
  data.customer_orders(session.user_id).await.map_err(|e| {
    error!(error = %e, "Order listing query failed.");
    VetError::Unavailable("load your orders")
  })
}
