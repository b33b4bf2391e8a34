// core/src/access.rs

//! Admin access policy for the dashboard prefix.
//!
//! The decision is default-deny: a request under the admin prefix is allowed
//! only when a session exists AND its owner's role was read successfully AND
//! the normalized role is the admin marker. Every other combination redirects.

use tracing::{debug, warn};

use crate::client::DataClient;
use crate::error::BackendError;
use crate::model::{Role, Session};
use crate::routes::SiteRoutes;

/// Role marker stored in `propietarios.rol` for staff.
pub const ADMIN_ROLE: &str = "administrador";

/// Roles compare after trimming and lowercasing (`" Administrador "` is admin).
pub fn normalize_role(raw: &str) -> String {
  raw.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
  NoSession,
  RoleLookupFailed,
  NotAdmin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
  Allow,
  Redirect { location: String, reason: DenyReason },
}

impl Access {
  pub fn is_allowed(&self) -> bool {
    matches!(self, Access::Allow)
  }
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
  routes: SiteRoutes,
}

impl AccessPolicy {
  pub fn new(routes: SiteRoutes) -> Self {
    AccessPolicy { routes }
  }

  pub fn routes(&self) -> &SiteRoutes {
    &self.routes
  }

  /// Whether `path` lies in the admin namespace. Matching is per segment:
  /// `/dashboard` and `/dashboard/x` are guarded, `/dashboards` is not.
  pub fn guards(&self, path: &str) -> bool {
    let prefix = self.routes.admin_prefix.trim_end_matches('/');
    if prefix.is_empty() {
      return true;
    }
    match path.strip_prefix(prefix) {
      Some(rest) => rest.is_empty() || rest.starts_with('/'),
      None => false,
    }
  }

  /// Pure decision given the session and the outcome of the role lookup.
  /// `Ok(None)` (no owner row) is treated like a failed lookup.
  pub fn decide(&self, session: Option<&Session>, role: Result<Option<&str>, &BackendError>) -> Access {
    if session.is_none() {
      return self.redirect(&self.routes.login, DenyReason::NoSession);
    }
    match role {
      Ok(Some(raw)) if Role::from_raw(raw).is_admin() => Access::Allow,
      Ok(Some(_)) => self.redirect(&self.routes.account_orders, DenyReason::NotAdmin),
      Ok(None) | Err(_) => self.redirect(&self.routes.login, DenyReason::RoleLookupFailed),
    }
  }

  /// Full evaluation for one request. Paths outside the admin prefix are
  /// allowed without touching the backend.
  pub async fn evaluate<D>(&self, path: &str, session: Option<&Session>, data: &D) -> Access
  where
    D: DataClient + ?Sized,
  {
    if !self.guards(path) {
      return Access::Allow;
    }
    let Some(session) = session else {
      debug!(path, "Admin path requested without a session.");
      return self.decide(None, Ok(None));
    };

    let lookup = data.owner_role(session.user_id).await;
    if let Err(e) = &lookup {
      warn!(user_id = %session.user_id, error = %e, "Role lookup failed; denying admin access.");
    }
    let access = self.decide(Some(session), lookup.as_ref().map(|role| role.as_deref()));
    debug!(path, user_id = %session.user_id, ?access, "Admin access evaluated.");
    access
  }

  fn redirect(&self, location: &str, reason: DenyReason) -> Access {
    Access::Redirect {
      location: location.to_string(),
      reason,
    }
  }
}
