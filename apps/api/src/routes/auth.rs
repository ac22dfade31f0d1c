//! Registration and login handlers.
//!
//! Successful calls return the token in the body and also set it as the
//! `jwt` cookie.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Duration, Utc};

use stockpile_core::{RoleName, User};

use crate::auth::gate::ADMIN_ONLY;
use crate::auth::{authorize, Authenticated};
use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};
use crate::error::ApiError;
use crate::routes::invalid_input;
use crate::services::auth_service;
use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jwt";

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body.map_err(invalid_input)?;

    let (user, token) = auth_service::register(&state, req, RoleName::User, None).await?;
    Ok(session_response(&state, StatusCode::CREATED, &user, token))
}

/// `POST /api/auth/admin/register`
pub async fn register_admin(
    State(state): State<Arc<AppState>>,
    Authenticated(claims): Authenticated,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    authorize(Some(&claims), ADMIN_ONLY)?;
    let Json(req) = body.map_err(invalid_input)?;

    let (user, token) =
        auth_service::register(&state, req, RoleName::Administrator, Some(&claims)).await?;
    Ok(session_response(&state, StatusCode::CREATED, &user, token))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body.map_err(invalid_input)?;

    let (user, token) = auth_service::login(&state, req).await?;
    Ok(session_response(&state, StatusCode::OK, &user, token))
}

fn session_response(state: &AppState, status: StatusCode, user: &User, token: String) -> Response {
    let cookie = session_cookie(&token, state.tokens.ttl_secs(), state.clock.now());
    let body = AuthResponse {
        token,
        user: UserSummary::from(user),
    };

    (status, [(SET_COOKIE, cookie)], Json(body)).into_response()
}

/// `Set-Cookie` value carrying the session token.
pub fn session_cookie(token: &str, ttl_secs: i64, now: DateTime<Utc>) -> String {
    let expires = now + Duration::seconds(ttl_secs);
    format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={ttl_secs}; Expires={}; HttpOnly; SameSite=Lax",
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_cookie() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let cookie = session_cookie("abc", 3600, now);

        assert!(cookie.starts_with("jwt=abc; Path=/;"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("Expires=Mon, 01 Jan 2024 01:00:00 GMT"));
    }
}
