// core/src/model/owner.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{normalize_role, ADMIN_ROLE};

/// A row of `propietarios`. Only used for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
  pub id: Uuid,
  pub email: String,
  pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
  Administrator,
  /// Any non-admin role, normalized.
  Customer(String),
}

impl Role {
  pub fn from_raw(raw: &str) -> Self {
    let normalized = normalize_role(raw);
    if normalized == ADMIN_ROLE {
      Role::Administrator
    } else {
      Role::Customer(normalized)
    }
  }

  pub fn is_admin(&self) -> bool {
    matches!(self, Role::Administrator)
  }
}
