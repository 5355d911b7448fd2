// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state.
//!
//! Every service is constructed once at startup with its configuration
//! injected (signing secret, challenge network, pinning credentials) and
//! shared immutably across requests.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::ipfs::PinataClient;
use crate::storage::DocumentStore;
use crate::wallet::ChallengeVerifier;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<DocumentStore>,
    pub tokens: Arc<TokenService>,
    pub verifier: Arc<ChallengeVerifier>,
    pub pinning: Arc<PinataClient>,
}

impl AppState {
    pub fn new(
        storage: DocumentStore,
        tokens: TokenService,
        verifier: ChallengeVerifier,
        pinning: PinataClient,
    ) -> Self {
        Self {
            storage: Arc::new(storage),
            tokens: Arc::new(tokens),
            verifier: Arc::new(verifier),
            pinning: Arc::new(pinning),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for handler and extractor tests.

    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;

    use super::AppState;
    use crate::auth::{password, TokenService};
    use crate::ipfs::PinataClient;
    use crate::storage::{DocumentStore, StoragePaths, StoredUser, UserRepository};
    use crate::wallet::ChallengeVerifier;

    /// AppState over a temp-dir store with fixed test secrets.
    pub(crate) fn state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut storage = DocumentStore::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("initialize storage");

        let state = AppState::new(
            storage,
            TokenService::new(b"test-signing-secret"),
            ChallengeVerifier::new("Testnet"),
            PinataClient::new(
                "https://api.pinata.example",
                "https://gateway.pinata.example/ipfs/",
                "test-jwt",
            )
            .expect("pinata client"),
        );

        (state, temp_dir)
    }

    /// Insert a user with a real Argon2 digest and return it.
    pub(crate) fn create_user(state: &AppState, username: &str, pw: &str) -> StoredUser {
        let user = StoredUser {
            user_id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password::hash(pw).expect("hash password"),
            wallet_address: None,
            assets: Vec::new(),
            created_at: Utc::now(),
        };
        UserRepository::new(&state.storage)
            .create(&user)
            .expect("create user");
        user
    }
}
