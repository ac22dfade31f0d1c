//! Request gates.
//!
//! ```text
//! request ──► Authenticated (extractor) ──► handler ──► authorize(claims, roles)
//!               │ no / bad bearer → 401         │ role not allowed → 403
//!               ▼                               ▼
//!             Claims passed to the handler as a value
//! ```
//!
//! Claims never travel through request extensions; each handler receives
//! them as an argument and hands them on explicitly.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use stockpile_core::RoleName;

use crate::auth::token::Claims;
use crate::error::ApiError;
use crate::AppState;

/// Roles allowed to mutate inventory and register administrators.
pub const ADMIN_ONLY: &[RoleName] = &[RoleName::Administrator];

/// Verified claims of the caller.
///
/// Extraction fails with 401 before the handler body runs, so no
/// persistence work is started for a rejected request.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

impl FromRequestParts<Arc<AppState>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        let claims = state.tokens.verify(token)?;

        Ok(Authenticated(claims))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Allow the request only if the caller's role is in `allowed`.
///
/// Missing claims are treated as not allowed.
pub fn authorize(claims: Option<&Claims>, allowed: &[RoleName]) -> Result<(), ApiError> {
    match claims {
        Some(claims) if allowed.contains(&claims.role) => Ok(()),
        Some(claims) => {
            tracing::warn!(user_id = claims.sub, role = %claims.role, "Role not allowed");
            Err(ApiError::forbidden())
        }
        None => Err(ApiError::forbidden()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn claims(role: RoleName) -> Claims {
        Claims {
            sub: 7,
            role,
            role_id: 1,
            iat: 0,
            exp: 60,
            jti: "t".to_string(),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_authorize() {
        let admin = claims(RoleName::Administrator);
        let user = claims(RoleName::User);

        assert!(authorize(Some(&admin), ADMIN_ONLY).is_ok());
        assert_eq!(authorize(Some(&user), ADMIN_ONLY), Err(ApiError::forbidden()));
        assert!(authorize(Some(&user), &RoleName::ALL).is_ok());
    }

    #[test]
    fn test_authorize_fails_closed() {
        assert_eq!(authorize(None, &RoleName::ALL), Err(ApiError::forbidden()));
    }
}
