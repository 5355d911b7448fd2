// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account endpoints: signup, login, logout, token check.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{password, Auth, TOKEN_COOKIE};
use crate::error::ApiError;
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, SignupRequest, TokenCheckResponse,
};
use crate::state::AppState;
use crate::storage::{StorageError, StoredUser, UserRepository};

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing username or password"),
        (status = 422, description = "Username already taken")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username or password not provided"));
    }

    let password_hash = password::hash(&request.password)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {e}")))?;

    let user = StoredUser {
        user_id: Uuid::new_v4().to_string(),
        username: request.username,
        password_hash,
        wallet_address: None,
        assets: Vec::new(),
        created_at: Utc::now(),
    };

    UserRepository::new(&state.storage)
        .create(&user)
        .map_err(|e| match e {
            StorageError::AlreadyExists(_) => ApiError::unprocessable("Username is already taken"),
            other => other.into(),
        })?;

    tracing::info!(username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User successfully registered".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Logged in; token set as cookie", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username or password not provided"));
    }

    let users = UserRepository::new(&state.storage);
    let user = users
        .find_by_username(&request.username)?
        .filter(|user| password::verify(&request.password, &user.password_hash))
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let token = state
        .tokens
        .issue(&user.user_id)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    let cookie = format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "User logged in".to_string(),
            username: user.username,
        }),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Cookie cleared", body = MessageResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(Auth(_user): Auth) -> Response {
    let cookie = format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");

    (
        [(SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Successfully logged out".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid", body = TokenCheckResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn verify_token(Auth(user): Auth) -> Json<TokenCheckResponse> {
    Json(TokenCheckResponse {
        valid: true,
        user: user.username,
    })
}
