// storefront/src/web/extractors.rs

use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use vetclinic::Session;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::{resolve_session, token_from_request, ResolvedSession};

/// The caller's session, if any. Reuses the one `admin_gate` resolved when
/// the request passed through it.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
  pub fn session(&self) -> Option<&Session> {
    self.0.as_ref()
  }
}

impl FromRequest for CurrentSession {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    if let Some(ResolvedSession(session)) = req.extensions().get::<ResolvedSession>() {
      let session = session.clone();
      return Box::pin(async move { Ok(CurrentSession(session)) });
    }

    let state = req.app_data::<web::Data<AppState>>().cloned();
    let token = state
      .as_ref()
      .and_then(|state| token_from_request(req, &state.config.session_cookie_name));
    Box::pin(async move {
      let state = state.ok_or_else(|| AppError::Internal("Application state is not configured".to_string()))?;
      Ok(CurrentSession(resolve_session(state.auth.as_ref(), token).await))
    })
  }
}
