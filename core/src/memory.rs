// core/src/memory.rs

//! In-process backend implementing both client traits over plain collections.
//!
//! Useful for local runs without a database and as the fixture backend of the
//! test suites. Passwords are compared as given; this backend is not meant to
//! hold real credentials.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::client::{AuthClient, DataClient};
use crate::error::{BackendError, BackendResult};
use crate::model::{CatalogProduct, OrderDetail, OrderSummary, Owner, Session, SessionToken};

#[derive(Default)]
struct MemoryData {
  owners: HashMap<Uuid, (Owner, String)>,
  sessions: HashMap<SessionToken, Session>,
  orders: Vec<OrderDetail>,
  catalog: Vec<CatalogProduct>,
  offline: bool,
}

pub struct InMemoryBackend {
  data: RwLock<MemoryData>,
  session_ttl: Duration,
}

impl Default for InMemoryBackend {
  fn default() -> Self {
    Self::new()
  }
}

impl InMemoryBackend {
  pub fn new() -> Self {
    InMemoryBackend {
      data: RwLock::new(MemoryData::default()),
      session_ttl: Duration::hours(24),
    }
  }

  pub fn add_owner(&self, owner: Owner, password: impl Into<String>) {
    self.data.write().owners.insert(owner.id, (owner, password.into()));
  }

  pub fn add_order(&self, order: OrderDetail) {
    self.data.write().orders.push(order);
  }

  pub fn add_product(&self, product: CatalogProduct) {
    self.data.write().catalog.push(product);
  }

  /// Issues a session for an existing owner without checking a password.
  pub fn issue_session(&self, owner_id: Uuid) -> Option<Session> {
    let mut data = self.data.write();
    let email = data.owners.get(&owner_id).map(|(owner, _)| owner.email.clone())?;
    let session = Session {
      token: SessionToken::new(Uuid::new_v4().simple().to_string()),
      user_id: owner_id,
      email: Some(email),
      expires_at: Utc::now() + self.session_ttl,
    };
    data.sessions.insert(session.token.clone(), session.clone());
    Some(session)
  }

  /// While offline every call fails with `BackendError::Unavailable`.
  pub fn set_offline(&self, offline: bool) {
    self.data.write().offline = offline;
  }

  fn ensure_online(&self) -> BackendResult<()> {
    if self.data.read().offline {
      return Err(BackendError::Unavailable("in-memory backend is offline".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl AuthClient for InMemoryBackend {
  async fn session(&self, token: &SessionToken) -> BackendResult<Option<Session>> {
    self.ensure_online()?;
    let data = self.data.read();
    Ok(data.sessions.get(token).filter(|s| !s.is_expired_at(Utc::now())).cloned())
  }

  async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
    self.ensure_online()?;
    let owner_id = {
      let data = self.data.read();
      data
        .owners
        .values()
        .find(|(owner, secret)| owner.email.eq_ignore_ascii_case(email) && secret == password)
        .map(|(owner, _)| owner.id)
    };
    owner_id
      .and_then(|id| self.issue_session(id))
      .ok_or(BackendError::InvalidCredentials)
  }

  async fn sign_out(&self, token: &SessionToken) -> BackendResult<()> {
    self.ensure_online()?;
    self.data.write().sessions.remove(token);
    Ok(())
  }
}

#[async_trait]
impl DataClient for InMemoryBackend {
  async fn owner_role(&self, owner_id: Uuid) -> BackendResult<Option<String>> {
    self.ensure_online()?;
    Ok(self.data.read().owners.get(&owner_id).map(|(owner, _)| owner.role.clone()))
  }

  async fn customer_order(&self, order_id: Uuid, owner_id: Uuid) -> BackendResult<Option<OrderDetail>> {
    self.ensure_online()?;
    let data = self.data.read();
    Ok(
      data
        .orders
        .iter()
        .find(|d| d.order.id == order_id && d.order.owner_id == owner_id)
        .cloned(),
    )
  }

  async fn customer_orders(&self, owner_id: Uuid) -> BackendResult<Vec<OrderSummary>> {
    self.ensure_online()?;
    let data = self.data.read();
    let mut summaries: Vec<OrderSummary> = data
      .orders
      .iter()
      .filter(|d| d.order.owner_id == owner_id)
      .map(OrderSummary::from)
      .collect();
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(summaries)
  }

  async fn order(&self, order_id: Uuid) -> BackendResult<Option<OrderDetail>> {
    self.ensure_online()?;
    Ok(self.data.read().orders.iter().find(|d| d.order.id == order_id).cloned())
  }

  async fn recent_orders(&self, limit: i64) -> BackendResult<Vec<OrderSummary>> {
    self.ensure_online()?;
    let data = self.data.read();
    let mut summaries: Vec<OrderSummary> = data.orders.iter().map(OrderSummary::from).collect();
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    summaries.truncate(limit.max(0) as usize);
    Ok(summaries)
  }

  async fn catalog(&self) -> BackendResult<Vec<CatalogProduct>> {
    self.ensure_online()?;
    let mut products = self.data.read().catalog.clone();
    products.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(products)
  }
}
