// storefront/src/db/pg_client.rs

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;
use vetclinic::{
  AuthClient, BackendError, BackendResult, CatalogProduct, DataClient, OrderDetail, OrderSummary, Session,
  SessionToken,
};

use crate::db::rows::{
  assemble_catalog, assemble_order, summary_from_row, CatalogRow, CredentialRow, OrderDetailRow, OrderSummaryRow,
  SessionRow,
};
use crate::services::auth_service;

const ORDER_DETAIL_SELECT: &str = "SELECT o.id AS order_id, o.created_at, o.estado AS status, o.total AS total_cents, \
  o.direccion_envio AS shipping_address, o.propietario_id AS owner_id, \
  i.id AS item_id, i.cantidad AS quantity, i.precio_unitario AS unit_price_cents, \
  v.id AS variant_id, v.nombre AS variant_name, \
  p.id AS product_id, p.nombre AS product_name, p.imagenes AS product_images \
  FROM pedidos o \
  LEFT JOIN items_pedido i ON i.pedido_id = o.id \
  LEFT JOIN producto_variantes v ON v.id = i.variante_id \
  LEFT JOIN productos p ON p.id = v.producto_id";

const ORDER_SUMMARY_SELECT: &str = "SELECT o.id, o.created_at, o.estado AS status, o.total AS total_cents, \
  COUNT(i.id) AS item_count \
  FROM pedidos o \
  LEFT JOIN items_pedido i ON i.pedido_id = o.id";

/// `AuthClient` + `DataClient` over the clinic's Postgres database.
#[derive(Clone)]
pub struct PgClient {
  pool: PgPool,
  session_ttl: Duration,
}

impl PgClient {
  pub fn new(pool: PgPool, session_ttl: Duration) -> Self {
    PgClient { pool, session_ttl }
  }

  fn query_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> BackendError {
    move |e| {
      error!(operation, error = %e, "Database query failed.");
      BackendError::query(e)
    }
  }
}

#[async_trait]
impl AuthClient for PgClient {
  #[instrument(name = "pg::session", skip_all)]
  async fn session(&self, token: &SessionToken) -> BackendResult<Option<Session>> {
    let row: Option<SessionRow> = sqlx::query_as(
      "SELECT s.token, s.propietario_id AS user_id, p.email, s.expira_en AS expires_at \
       FROM sesiones s JOIN propietarios p ON p.id = s.propietario_id \
       WHERE s.token = $1 AND s.expira_en > now()",
    )
    .bind(token.as_str())
    .fetch_optional(&self.pool)
    .await
    .map_err(Self::query_failed("session lookup"))?;
    Ok(row.map(Session::from))
  }

  #[instrument(name = "pg::sign_in_with_password", skip(self, password))]
  async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
    let credentials: Option<CredentialRow> =
      sqlx::query_as("SELECT id, email, password_hash FROM propietarios WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::query_failed("credential lookup"))?;

    let Some(credentials) = credentials else {
      debug!("No owner with this email.");
      return Err(BackendError::InvalidCredentials);
    };
    let Some(stored_hash) = credentials.password_hash.as_deref() else {
      warn!(user_id = %credentials.id, "Owner has no password set; rejecting sign-in.");
      return Err(BackendError::InvalidCredentials);
    };
    if !auth_service::verify_password(stored_hash, password).map_err(BackendError::query)? {
      return Err(BackendError::InvalidCredentials);
    }

    let session = Session {
      token: SessionToken::new(auth_service::generate_session_token()),
      user_id: credentials.id,
      email: Some(credentials.email),
      expires_at: Utc::now() + self.session_ttl,
    };
    sqlx::query("INSERT INTO sesiones (token, propietario_id, expira_en) VALUES ($1, $2, $3)")
      .bind(session.token.as_str())
      .bind(session.user_id)
      .bind(session.expires_at)
      .execute(&self.pool)
      .await
      .map_err(Self::query_failed("session insert"))?;
    Ok(session)
  }

  #[instrument(name = "pg::sign_out", skip_all)]
  async fn sign_out(&self, token: &SessionToken) -> BackendResult<()> {
    sqlx::query("DELETE FROM sesiones WHERE token = $1")
      .bind(token.as_str())
      .execute(&self.pool)
      .await
      .map_err(Self::query_failed("session delete"))?;
    Ok(())
  }
}

#[async_trait]
impl DataClient for PgClient {
  #[instrument(name = "pg::owner_role", skip(self))]
  async fn owner_role(&self, owner_id: Uuid) -> BackendResult<Option<String>> {
    sqlx::query_scalar("SELECT rol FROM propietarios WHERE id = $1")
      .bind(owner_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(Self::query_failed("role lookup"))
  }

  #[instrument(name = "pg::customer_order", skip(self))]
  async fn customer_order(&self, order_id: Uuid, owner_id: Uuid) -> BackendResult<Option<OrderDetail>> {
    let sql = format!("{ORDER_DETAIL_SELECT} WHERE o.id = $1 AND o.propietario_id = $2 ORDER BY i.id");
    let rows: Vec<OrderDetailRow> = sqlx::query_as(&sql)
      .bind(order_id)
      .bind(owner_id)
      .fetch_all(&self.pool)
      .await
      .map_err(Self::query_failed("customer order"))?;
    assemble_order(rows)
  }

  #[instrument(name = "pg::customer_orders", skip(self))]
  async fn customer_orders(&self, owner_id: Uuid) -> BackendResult<Vec<OrderSummary>> {
    let sql = format!("{ORDER_SUMMARY_SELECT} WHERE o.propietario_id = $1 GROUP BY o.id ORDER BY o.created_at DESC");
    let rows: Vec<OrderSummaryRow> = sqlx::query_as(&sql)
      .bind(owner_id)
      .fetch_all(&self.pool)
      .await
      .map_err(Self::query_failed("customer orders"))?;
    rows.into_iter().map(summary_from_row).collect()
  }

  #[instrument(name = "pg::order", skip(self))]
  async fn order(&self, order_id: Uuid) -> BackendResult<Option<OrderDetail>> {
    let sql = format!("{ORDER_DETAIL_SELECT} WHERE o.id = $1 ORDER BY i.id");
    let rows: Vec<OrderDetailRow> = sqlx::query_as(&sql)
      .bind(order_id)
      .fetch_all(&self.pool)
      .await
      .map_err(Self::query_failed("order"))?;
    assemble_order(rows)
  }

  #[instrument(name = "pg::recent_orders", skip(self))]
  async fn recent_orders(&self, limit: i64) -> BackendResult<Vec<OrderSummary>> {
    let sql = format!("{ORDER_SUMMARY_SELECT} GROUP BY o.id ORDER BY o.created_at DESC LIMIT $1");
    let rows: Vec<OrderSummaryRow> = sqlx::query_as(&sql)
      .bind(limit)
      .fetch_all(&self.pool)
      .await
      .map_err(Self::query_failed("recent orders"))?;
    rows.into_iter().map(summary_from_row).collect()
  }

  #[instrument(name = "pg::catalog", skip(self))]
  async fn catalog(&self) -> BackendResult<Vec<CatalogProduct>> {
    let rows: Vec<CatalogRow> = sqlx::query_as(
      "SELECT p.id AS product_id, p.nombre AS product_name, p.descripcion AS description, p.imagenes AS images, \
       v.id AS variant_id, v.nombre AS variant_name, v.precio AS variant_price_cents \
       FROM productos p LEFT JOIN producto_variantes v ON v.producto_id = p.id \
       ORDER BY p.nombre, p.id, v.nombre",
    )
    .fetch_all(&self.pool)
    .await
    .map_err(Self::query_failed("catalog"))?;
    Ok(assemble_catalog(rows))
  }
}
