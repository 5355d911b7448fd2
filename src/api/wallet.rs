// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet binding endpoint.

use axum::{extract::State, Json};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{MessageResponse, VerifyWalletRequest};
use crate::state::AppState;
use crate::storage::UserRepository;

#[utoipa::path(
    post,
    path = "/verify_wallet",
    request_body = VerifyWalletRequest,
    tag = "Wallet",
    responses(
        (status = 200, description = "Wallet bound to the account", body = MessageResponse),
        (status = 400, description = "Signature does not prove control of the address"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn verify_wallet(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<VerifyWalletRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state
        .verifier
        .verify(&request.wallet_address, &request.signature)
    {
        tracing::info!(username = %user.username, "wallet verification failed");
        return Err(ApiError::bad_request("Invalid signature"));
    }

    UserRepository::new(&state.storage).set_wallet_address(&user.user_id, &request.wallet_address)?;

    tracing::info!(username = %user.username, wallet = %request.wallet_address, "wallet verified");

    Ok(Json(MessageResponse {
        message: "Wallet verified".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use alloy::signers::{local::PrivateKeySigner, SignerSync};
    use axum::http::StatusCode;

    fn signed_request(state: &AppState, signer: &PrivateKeySigner) -> VerifyWalletRequest {
        let wallet_address = signer.address().to_string();
        let message = state.verifier.challenge(&wallet_address);
        let signature = signer.sign_message_sync(message.as_bytes()).unwrap();

        VerifyWalletRequest {
            wallet_address,
            signature: alloy::hex::encode(signature.as_bytes()),
        }
    }

    #[tokio::test]
    async fn valid_signature_binds_wallet() {
        let (state, _tmp) = test_support::state();
        let user = test_support::create_user(&state, "alice", "pw1");
        let signer = PrivateKeySigner::random();
        let request = signed_request(&state, &signer);
        let expected = request.wallet_address.clone();

        let body = verify_wallet(State(state.clone()), Auth(user.clone()), Json(request))
            .await
            .unwrap();
        assert_eq!(body.message, "Wallet verified");

        let stored = UserRepository::new(&state.storage).get(&user.user_id).unwrap();
        assert_eq!(stored.wallet_address.as_deref(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn invalid_signature_leaves_user_unchanged() {
        let (state, _tmp) = test_support::state();
        let user = test_support::create_user(&state, "alice", "pw1");

        let err = verify_wallet(
            State(state.clone()),
            Auth(user.clone()),
            Json(VerifyWalletRequest {
                wallet_address: "0x0000000000000000000000000000000000000001".into(),
                signature: "deadbeef".into(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid signature");

        let stored = UserRepository::new(&state.storage).get(&user.user_id).unwrap();
        assert!(stored.wallet_address.is_none());
    }

    #[tokio::test]
    async fn reverification_overwrites_previous_binding() {
        let (state, _tmp) = test_support::state();
        let user = test_support::create_user(&state, "alice", "pw1");

        let first = PrivateKeySigner::random();
        let second = PrivateKeySigner::random();

        let request = signed_request(&state, &first);
        verify_wallet(State(state.clone()), Auth(user.clone()), Json(request))
            .await
            .unwrap();

        let request = signed_request(&state, &second);
        let expected = request.wallet_address.clone();
        verify_wallet(State(state.clone()), Auth(user.clone()), Json(request))
            .await
            .unwrap();

        let stored = UserRepository::new(&state.storage).get(&user.user_id).unwrap();
        assert_eq!(stored.wallet_address.as_deref(), Some(expected.as_str()));
    }
}
