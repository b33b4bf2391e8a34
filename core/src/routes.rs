// core/src/routes.rs

/// Paths the storefront redirects and links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoutes {
  pub login: String,
  pub account: String,
  pub account_orders: String,
  /// Staff-only namespace, guarded by the access policy.
  pub admin_prefix: String,
  pub appointment_booking: String,
  pub appointment_request: String,
}

impl Default for SiteRoutes {
  fn default() -> Self {
    SiteRoutes {
      login: "/login".to_string(),
      account: "/cuenta".to_string(),
      account_orders: "/cuenta/pedidos".to_string(),
      admin_prefix: "/dashboard".to_string(),
      appointment_booking: "/cuenta/citas".to_string(),
      appointment_request: "/citas/solicitar".to_string(),
    }
  }
}

impl SiteRoutes {
  /// Dashboard page for a single order, used by notification emails.
  pub fn admin_order(&self, order_id: impl std::fmt::Display) -> String {
    format!("{}/pedidos/{}", self.admin_prefix.trim_end_matches('/'), order_id)
  }
}
