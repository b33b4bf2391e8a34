// storefront/src/web/handlers/auth_handlers.rs

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::CurrentSession;
use crate::web::session::token_from_request;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct SigninRequestPayload {
  pub email: String,
  pub password: String,
}

fn session_cookie(name: &str, value: String, max_age_secs: i64) -> Cookie<'static> {
  Cookie::build(name.to_string(), value)
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(time::Duration::seconds(max_age_secs))
    .finish()
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::signin",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SigninRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let session = vetclinic::sign_in_with_password(app_state.auth.as_ref(), &req_payload.email, &req_payload.password).await?;

  let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
  let cookie = session_cookie(
    &app_state.config.session_cookie_name,
    session.token.as_str().to_string(),
    max_age,
  );
  info!(user_id = %session.user_id, "Signin successful.");

  Ok(HttpResponse::Ok().cookie(cookie).json(json!({
      "message": "Signin successful.",
      "userId": session.user_id.to_string(),
      "email": session.email,
      "expiresAt": session.expires_at,
      "token": session.token.as_str(),
  })))
}

#[instrument(name = "handler::signout", skip_all)]
pub async fn signout_handler(app_state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
  if let Some(token) = token_from_request(&req, &app_state.config.session_cookie_name) {
    vetclinic::sign_out(app_state.auth.as_ref(), &token).await?;
  }

  let mut removal = Cookie::build(app_state.config.session_cookie_name.clone(), "")
    .path("/")
    .finish();
  removal.make_removal();
  Ok(HttpResponse::Ok().cookie(removal).json(json!({ "message": "Signed out." })))
}

/// The caller's session, or `null`.
pub async fn session_handler(session: CurrentSession) -> HttpResponse {
  HttpResponse::Ok().json(session.0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::{clinic, PASSWORD};
  use crate::web::routes::configure_app_routes;
  use actix_web::http::{header, StatusCode};
  use actix_web::{test, App};
  use serde_json::Value;

  #[actix_rt::test]
  async fn signin_sets_a_session_cookie_and_signout_clears_it() {
    let clinic = clinic();
    let app = test::init_service(
      App::new()
        .app_data(web::Data::new(clinic.state.clone()))
        .configure(configure_app_routes),
    )
    .await;

    let req = test::TestRequest::post()
      .uri("/api/v1/auth/signin")
      .set_json(json!({ "email": "ana@example.com", "password": PASSWORD }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
      .response()
      .cookies()
      .find(|c| c.name() == "vet_session")
      .expect("session cookie set")
      .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["userId"], clinic.customer.id.to_string());

    let req = test::TestRequest::get()
      .uri("/api/v1/auth/session")
      .cookie(cookie.clone())
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user_id"], clinic.customer.id.to_string());
    assert!(body.get("token").is_none());

    let req = test::TestRequest::post()
      .uri("/api/v1/auth/signout")
      .cookie(cookie.clone())
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_some());

    let req = test::TestRequest::get().uri("/api/v1/auth/session").cookie(cookie).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_null());
  }

  #[actix_rt::test]
  async fn bad_credentials_are_rejected() {
    let clinic = clinic();
    let app = test::init_service(
      App::new()
        .app_data(web::Data::new(clinic.state.clone()))
        .configure(configure_app_routes),
    )
    .await;

    let req = test::TestRequest::post()
      .uri("/api/v1/auth/signin")
      .set_json(json!({ "email": "ana@example.com", "password": "wrong" }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
      .uri("/api/v1/auth/signin")
      .set_json(json!({ "email": "not-an-email", "password": PASSWORD }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
  }
}
