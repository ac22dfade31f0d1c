//! Registration and login.
//!
//! Both flows end by issuing a session token for the user.

use tracing::{info, warn};

use stockpile_core::validation::{validate_login, validate_registration};
use stockpile_core::{NewUser, RoleName, User};

use crate::auth::Claims;
use crate::dto::{LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::AppState;

/// Message for every failed login, whether the email or the password is wrong.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";

/// Register a user with `role` and issue a token.
///
/// `created_by` is the administrator performing an admin registration.
pub async fn register(
    state: &AppState,
    req: RegisterRequest,
    role: RoleName,
    created_by: Option<&Claims>,
) -> Result<(User, String), ApiError> {
    validate_registration(&req.email, &req.password, &req.confirm_password)?;

    // Roles are seeded at startup; a missing one is a server fault.
    let role = state
        .db
        .roles()
        .get_by_name(role)
        .await?
        .ok_or_else(|| ApiError::internal(format!("role {role} is not seeded")))?;

    let password_hash = state.vault.hash_blocking(req.password).await?;

    let user = state
        .db
        .users()
        .insert(
            &NewUser {
                name: req.name.trim().to_string(),
                email: req.email.trim().to_string(),
                password_hash,
                role_id: role.id,
            },
            state.clock.now(),
        )
        .await?;

    info!(
        user_id = user.id,
        role = %user.role.name,
        created_by = created_by.map(|c| c.sub),
        "User registered"
    );

    let token = issue_for(state, &user)?;
    Ok((user, token))
}

/// Check credentials and issue a token.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<(User, String), ApiError> {
    validate_login(&req.email, &req.password)?;

    let user = match state.db.users().get_by_email(req.email.trim()).await? {
        Some(user) => user,
        None => {
            warn!("Login attempt for unknown email");
            return Err(ApiError::unauthorized(INCORRECT_CREDENTIALS));
        }
    };

    let matches = state
        .vault
        .verify_blocking(user.password_hash.clone(), req.password)
        .await?;

    if !matches {
        warn!(user_id = user.id, "Login attempt with wrong password");
        return Err(ApiError::unauthorized(INCORRECT_CREDENTIALS));
    }

    info!(user_id = user.id, "User logged in");

    let token = issue_for(state, &user)?;
    Ok((user, token))
}

fn issue_for(state: &AppState, user: &User) -> Result<String, ApiError> {
    let token = state.tokens.issue(
        user.id,
        user.role.name,
        user.role.id,
        state.tokens.ttl_secs(),
    )?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::test_state;

    fn registration(email: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jo".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (state, _) = test_state().await;

        let (user, token) = register(
            &state,
            registration("jo@example.com", "longenough", "longenough"),
            RoleName::User,
            None,
        )
        .await
        .unwrap();
        assert_eq!(user.role.name, RoleName::User);
        assert_eq!(state.tokens.verify(&token).unwrap().sub, user.id);

        let (again, _) = login(
            &state,
            LoginRequest {
                email: "jo@example.com".to_string(),
                password: "longenough".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (state, _) = test_state().await;

        let mismatch = register(&state, registration("a@example.com", "longenough", "other1234"), RoleName::User, None)
            .await
            .unwrap_err();
        assert_eq!(mismatch, ApiError::validation("Passwords do not match"));

        let short = register(&state, registration("a@example.com", "short", "short"), RoleName::User, None)
            .await
            .unwrap_err();
        assert_eq!(short.kind, ErrorKind::Validation);

        let bad_email = register(&state, registration("not-an-email", "longenough", "longenough"), RoleName::User, None)
            .await
            .unwrap_err();
        assert_eq!(bad_email, ApiError::validation("Invalid email format"));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (state, _) = test_state().await;
        let req = registration("dup@example.com", "longenough", "longenough");

        register(&state, req.clone(), RoleName::User, None).await.unwrap();
        let err = register(&state, req, RoleName::User, None).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (state, _) = test_state().await;
        register(
            &state,
            registration("jo@example.com", "longenough", "longenough"),
            RoleName::User,
            None,
        )
        .await
        .unwrap();

        let wrong_password = login(
            &state,
            LoginRequest {
                email: "jo@example.com".to_string(),
                password: "not-it-at-all".to_string(),
            },
        )
        .await
        .unwrap_err();
        let unknown_email = login(
            &state,
            LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "longenough".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password, ApiError::unauthorized(INCORRECT_CREDENTIALS));

        let missing = login(&state, LoginRequest::default()).await.unwrap_err();
        assert_eq!(missing, ApiError::validation("Email and Password are required"));
    }
}
