// core/src/client.rs

//! The seams between the storefront and its hosted backend.
//!
//! `AuthClient` covers session issuance, lookup and sign-out; `DataClient`
//! covers the table reads. Both are object safe so the storefront can hold
//! them as `Arc<dyn ...>` and swap the Postgres client for the in-process one.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::error::{BackendError, BackendResult, VetError, VetResult};
use crate::model::{CatalogProduct, OrderDetail, OrderSummary, Session, SessionToken};

#[async_trait]
pub trait AuthClient: Send + Sync {
  /// Looks up a live session. Expired or unknown tokens yield `Ok(None)`.
  async fn session(&self, token: &SessionToken) -> BackendResult<Option<Session>>;

  /// Verifies credentials and issues a new session.
  /// Rejected credentials are reported as `BackendError::InvalidCredentials`.
  async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session>;

  /// Revokes a session. Unknown tokens are not an error.
  async fn sign_out(&self, token: &SessionToken) -> BackendResult<()>;
}

#[async_trait]
pub trait DataClient: Send + Sync {
  /// Raw `propietarios.rol` for the owner, `None` when the row is missing.
  async fn owner_role(&self, owner_id: Uuid) -> BackendResult<Option<String>>;

  /// Single filtered read: `id = order_id AND propietario_id = owner_id`, joined
  /// through items, variants and catalog products.
  async fn customer_order(&self, order_id: Uuid, owner_id: Uuid) -> BackendResult<Option<OrderDetail>>;

  /// Orders placed by `owner_id`, newest first.
  async fn customer_orders(&self, owner_id: Uuid) -> BackendResult<Vec<OrderSummary>>;

  /// Unscoped read for staff pages.
  async fn order(&self, order_id: Uuid) -> BackendResult<Option<OrderDetail>>;

  /// Most recent orders across all owners, for staff pages.
  async fn recent_orders(&self, limit: i64) -> BackendResult<Vec<OrderSummary>>;

  async fn catalog(&self) -> BackendResult<Vec<CatalogProduct>>;
}

/// Auth state change, as observed by a single client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
  SignedIn(Session),
  SignedOut,
}

const AUTH_EVENT_CAPACITY: usize = 16;

/// Browser-side view of authentication: the token this client holds, and a
/// channel of auth state changes that widgets subscribe to.
pub struct ClientSession {
  auth: Arc<dyn AuthClient>,
  token: RwLock<Option<SessionToken>>,
  events: broadcast::Sender<AuthEvent>,
}

impl ClientSession {
  pub fn new(auth: Arc<dyn AuthClient>) -> Self {
    let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
    ClientSession {
      auth,
      token: RwLock::new(None),
      events,
    }
  }

  pub fn with_token(auth: Arc<dyn AuthClient>, token: SessionToken) -> Self {
    let client = Self::new(auth);
    *client.token.write() = Some(token);
    client
  }

  /// Current session, if any. Lookup failures count as "no session".
  pub async fn current_session(&self) -> Option<Session> {
    let token = self.token.read().clone()?;
    match self.auth.session(&token).await {
      Ok(session) => session,
      Err(e) => {
        debug!(error = %e, "Session lookup failed; treating client as signed out.");
        None
      }
    }
  }

  pub async fn sign_in(&self, email: &str, password: &str) -> VetResult<Session> {
    let session = sign_in_with_password(self.auth.as_ref(), email, password).await?;
    *self.token.write() = Some(session.token.clone());
    // No receivers is fine; nobody is listening yet.
    let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
    Ok(session)
  }

  pub async fn sign_out(&self) -> VetResult<()> {
    let token = self.token.write().take();
    if let Some(token) = token {
      sign_out(self.auth.as_ref(), &token).await?;
    }
    let _ = self.events.send(AuthEvent::SignedOut);
    Ok(())
  }

  /// Dropping the receiver is the unsubscribe.
  pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
    self.events.subscribe()
  }
}

/// Validates the credentials' shape, then asks the auth backend for a session.
#[instrument(name = "auth::sign_in_with_password", skip(auth, password), err(Display))]
pub async fn sign_in_with_password(auth: &dyn AuthClient, email: &str, password: &str) -> VetResult<Session> {
  let email = email.trim();
  if email.is_empty() || !email.contains('@') {
    return Err(VetError::Validation("A valid email is required.".to_string()));
  }
  if password.is_empty() {
    return Err(VetError::Validation("Password is required.".to_string()));
  }

  match auth.sign_in_with_password(email, password).await {
    Ok(session) => {
      info!(user_id = %session.user_id, "Signed in.");
      Ok(session)
    }
    Err(BackendError::InvalidCredentials) => {
      debug!("Credentials rejected.");
      Err(VetError::InvalidCredentials)
    }
    Err(e) => {
      error!(error = %e, "Sign-in failed in the auth backend.");
      Err(VetError::Unavailable("sign in"))
    }
  }
}

#[instrument(name = "auth::sign_out", skip_all, err(Display))]
pub async fn sign_out(auth: &dyn AuthClient, token: &SessionToken) -> VetResult<()> {
  auth.sign_out(token).await.map_err(|e| {
    error!(error = %e, "Sign-out failed in the auth backend.");
    VetError::Unavailable("sign out")
  })
}
