// storefront/src/web/middleware.rs

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use tracing::{error, info};
use vetclinic::Access;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::{resolve_session, token_from_request, ResolvedSession};

/// Guards the staff area. Requests outside the admin prefix pass straight
/// through; inside it, anything short of an administrator session is answered
/// with a `307` to wherever the access policy points.
pub async fn admin_gate<B>(req: ServiceRequest, next: Next<B>) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
  B: MessageBody + 'static,
{
  let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
    error!("AppState missing from app data; refusing to serve.");
    return Err(AppError::Internal("Application state is not configured".to_string()).into());
  };

  // Match against the requoted path the router sees, not the raw URI, so
  // percent-encoded spellings of the prefix are guarded too.
  let path = req.match_info().as_str().to_owned();
  if !state.policy.guards(&path) {
    return next.call(req).await.map(ServiceResponse::map_into_left_body);
  }

  let token = token_from_request(req.request(), &state.config.session_cookie_name);
  let session = resolve_session(state.auth.as_ref(), token).await;

  match state.policy.evaluate(&path, session.as_ref(), state.data.as_ref()).await {
    Access::Allow => {
      req.extensions_mut().insert(ResolvedSession(session));
      next.call(req).await.map(ServiceResponse::map_into_left_body)
    }
    Access::Redirect { location, reason } => {
      info!(path = %path, ?reason, location = %location, "Redirecting away from the admin area.");
      let response = HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
        .map_into_right_body();
      Ok(req.into_response(response))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::{clinic, session_cookie, state_with};
  use crate::web::routes::configure_app_routes;
  use actix_web::http::StatusCode;
  use actix_web::middleware::from_fn;
  use actix_web::{test, App};
  use async_trait::async_trait;
  use std::sync::Arc;
  use uuid::Uuid;
  use vetclinic::{BackendError, BackendResult, CatalogProduct, DataClient, OrderDetail, OrderSummary};

  macro_rules! gated_app {
    ($state:expr) => {
      test::init_service(
        App::new()
          .app_data(web::Data::new($state))
          .wrap(from_fn(admin_gate))
          .configure(configure_app_routes),
      )
      .await
    };
  }

  fn location(resp: &ServiceResponse<impl MessageBody>) -> Option<&str> {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
  }

  #[actix_rt::test]
  async fn anonymous_admin_request_goes_to_login() {
    let clinic = clinic();
    let app = gated_app!(clinic.state.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/dashboard/anything").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/login"));
  }

  #[actix_rt::test]
  async fn percent_encoded_admin_paths_are_guarded() {
    let clinic = clinic();
    let app = gated_app!(clinic.state.clone());

    for uri in ["/%64ashboard/pedidos", "/dash%62oard/pedidos", "/%64ashboard"] {
      let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
      assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT, "{} was not redirected", uri);
      assert_eq!(location(&resp), Some("/login"));
    }
  }

  #[actix_rt::test]
  async fn customer_is_sent_to_their_orders() {
    let clinic = clinic();
    let session = clinic.backend.issue_session(clinic.customer.id).unwrap();
    let app = gated_app!(clinic.state.clone());

    let req = test::TestRequest::get()
      .uri("/dashboard/anything")
      .cookie(session_cookie(&session))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/cuenta/pedidos"));
  }

  #[actix_rt::test]
  async fn administrator_reaches_the_dashboard() {
    let clinic = clinic();
    let session = clinic.backend.issue_session(clinic.admin.id).unwrap();
    let app = gated_app!(clinic.state.clone());

    let req = test::TestRequest::get()
      .uri("/dashboard/pedidos")
      .cookie(session_cookie(&session))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Through the gate, unknown admin pages are plain 404s.
    let req = test::TestRequest::get()
      .uri("/dashboard/anything")
      .cookie(session_cookie(&session))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[actix_rt::test]
  async fn bearer_token_is_honoured() {
    let clinic = clinic();
    let session = clinic.backend.issue_session(clinic.admin.id).unwrap();
    let app = gated_app!(clinic.state.clone());

    let req = test::TestRequest::get()
      .uri("/dashboard/pedidos")
      .insert_header((header::AUTHORIZATION, format!("Bearer {}", session.token.as_str())))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
  }

  struct RolelessData;

  #[async_trait]
  impl DataClient for RolelessData {
    async fn owner_role(&self, _owner_id: Uuid) -> BackendResult<Option<String>> {
      Err(BackendError::Unavailable("propietarios unreachable".to_string()))
    }
    async fn customer_order(&self, _order_id: Uuid, _owner_id: Uuid) -> BackendResult<Option<OrderDetail>> {
      Ok(None)
    }
    async fn customer_orders(&self, _owner_id: Uuid) -> BackendResult<Vec<OrderSummary>> {
      Ok(Vec::new())
    }
    async fn order(&self, _order_id: Uuid) -> BackendResult<Option<OrderDetail>> {
      Ok(None)
    }
    async fn recent_orders(&self, _limit: i64) -> BackendResult<Vec<OrderSummary>> {
      Ok(Vec::new())
    }
    async fn catalog(&self) -> BackendResult<Vec<CatalogProduct>> {
      Ok(Vec::new())
    }
  }

  #[actix_rt::test]
  async fn role_lookup_failure_denies_even_administrators() {
    let clinic = clinic();
    let session = clinic.backend.issue_session(clinic.admin.id).unwrap();
    let state = state_with(clinic.backend.clone(), Arc::new(RolelessData));
    let app = gated_app!(state);

    let req = test::TestRequest::get()
      .uri("/dashboard/pedidos")
      .cookie(session_cookie(&session))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/login"));
  }

  #[actix_rt::test]
  async fn paths_outside_the_prefix_skip_the_backend() {
    let clinic = clinic();
    clinic.backend.set_offline(true);
    let app = gated_app!(clinic.state.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/dashboards").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(location(&resp).is_none());
  }
}
