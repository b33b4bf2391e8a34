// storefront/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use vetclinic::{AccessPolicy, AuthClient, DataClient};

#[derive(Clone)]
pub struct AppState {
  pub auth: Arc<dyn AuthClient>,
  pub data: Arc<dyn DataClient>,
  pub policy: Arc<AccessPolicy>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(auth: Arc<dyn AuthClient>, data: Arc<dyn DataClient>, config: Arc<AppConfig>) -> Self {
    let policy = Arc::new(AccessPolicy::new(config.routes.clone()));
    AppState {
      auth,
      data,
      policy,
      config,
    }
  }
}
