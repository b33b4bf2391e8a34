// storefront/src/web/session.rs

//! Finding the caller's session on an incoming request.

use actix_web::http::header;
use actix_web::HttpRequest;
use tracing::{debug, warn};
use vetclinic::{AuthClient, Session, SessionToken};

/// Session resolved by `admin_gate`, stored in request extensions so handlers
/// behind the gate don't look it up a second time.
#[derive(Debug, Clone)]
pub struct ResolvedSession(pub Option<Session>);

/// Session token from the session cookie, falling back to `Authorization: Bearer`.
pub fn token_from_request(req: &HttpRequest, cookie_name: &str) -> Option<SessionToken> {
  if let Some(cookie) = req.cookie(cookie_name) {
    let value = cookie.value().trim();
    if !value.is_empty() {
      return Some(SessionToken::new(value));
    }
  }

  req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .map(SessionToken::new)
}

/// Looks the token up in the auth backend. Failures resolve to no session.
pub async fn resolve_session(auth: &dyn AuthClient, token: Option<SessionToken>) -> Option<Session> {
  let token = token?;
  match auth.session(&token).await {
    Ok(Some(session)) => Some(session),
    Ok(None) => {
      debug!("Session token is unknown or expired.");
      None
    }
    Err(e) => {
      warn!(error = %e, "Session lookup failed; continuing without a session.");
      None
    }
  }
}
