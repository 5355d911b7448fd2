// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the resolved StoredUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
};

use super::AuthError;
use crate::state::AppState;
use crate::storage::{StoredUser, UserRepository};

/// Name of the session cookie carrying the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Extractor for authenticated users.
///
/// Pulls the bearer token from the `token` cookie, falling back to the
/// `Authorization: Bearer <token>` header, validates it, and resolves the
/// owning user. The user lives only for the duration of the request.
///
/// # Example
///
/// ```rust,ignore
/// async fn user_assets(
///     State(state): State<AppState>,
///     Auth(user): Auth,
/// ) -> Result<Json<UserAssetsResponse>, ApiError> {
///     // user.username identifies the caller
/// }
/// ```
pub struct Auth(pub StoredUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = token_from_cookie(&parts.headers)
            .or_else(|| token_from_bearer(&parts.headers))
            .ok_or(AuthError::MissingToken)?;

        let subject = state.tokens.validate(&token)?;

        // A structurally valid token can outlive its user
        let users = UserRepository::new(&state.storage);
        let user = users.get(&subject).map_err(|_| AuthError::UserNotFound)?;

        Ok(Auth(user))
    }
}

/// Read the token from the session cookie, if present.
fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("token="))
        .map(str::to_string)
}

/// Read the token from the Authorization header, if present.
fn token_from_bearer(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    raw.strip_prefix("Bearer ").map(|t| t.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use axum::http::Request;

    fn parts_with_header(name: &str, value: String) -> Parts {
        Request::builder()
            .uri("/test")
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn rejects_request_without_token() {
        let (state, _tmp) = test_support::state();
        let mut parts = Request::builder().uri("/test").body(()).unwrap().into_parts().0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn accepts_token_from_bearer_header() {
        let (state, _tmp) = test_support::state();
        let user = test_support::create_user(&state, "alice", "pw1");
        let token = state.tokens.issue(&user.user_id).unwrap();

        let mut parts = parts_with_header("Authorization", format!("Bearer {token}"));
        let Auth(resolved) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(resolved.user_id, user.user_id);
        assert_eq!(resolved.username, "alice");
    }

    #[tokio::test]
    async fn accepts_token_from_cookie() {
        let (state, _tmp) = test_support::state();
        let user = test_support::create_user(&state, "alice", "pw1");
        let token = state.tokens.issue(&user.user_id).unwrap();

        let mut parts = parts_with_header("Cookie", format!("theme=dark; token={token}"));
        let Auth(resolved) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(resolved.user_id, user.user_id);
    }

    #[tokio::test]
    async fn cookie_takes_precedence_over_header() {
        let (state, _tmp) = test_support::state();
        let alice = test_support::create_user(&state, "alice", "pw1");
        let bob = test_support::create_user(&state, "bob", "pw2");

        let cookie_token = state.tokens.issue(&alice.user_id).unwrap();
        let header_token = state.tokens.issue(&bob.user_id).unwrap();

        let mut parts = Request::builder()
            .uri("/test")
            .header("Cookie", format!("token={cookie_token}"))
            .header("Authorization", format!("Bearer {header_token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let Auth(resolved) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(resolved.user_id, alice.user_id);
    }

    #[tokio::test]
    async fn malformed_authorization_header_is_missing_token() {
        let (state, _tmp) = test_support::state();
        let mut parts = parts_with_header("Authorization", "Token abc123".to_string());

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn valid_token_for_missing_user_fails_user_not_found() {
        let (state, _tmp) = test_support::state();
        let token = state.tokens.issue("ghost-user-id").unwrap();

        let mut parts = parts_with_header("Authorization", format!("Bearer {token}"));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn garbage_token_fails_invalid() {
        let (state, _tmp) = test_support::state();
        let mut parts = parts_with_header("Authorization", "Bearer junk".to_string());

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
