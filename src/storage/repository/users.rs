// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Each user is stored as a separate JSON document under `users/`, keyed by
//! the user id. Username lookups scan the collection; usernames are unique
//! and enforced at creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStore, StorageError, StorageResult};

/// User account stored in the document store.
///
/// `password_hash` is a PHC-format Argon2 digest and is never serialized
/// into API responses (response DTOs carry only the username).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub user_id: String,
    /// Unique login name
    pub username: String,
    /// Argon2 password digest (PHC string)
    pub password_hash: String,
    /// Verified wallet address, set after a successful challenge signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    /// Content ids of uploaded assets, in upload order
    #[serde(default)]
    pub assets: Vec<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Repository for user operations on the document store.
pub struct UserRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a user exists.
    pub fn exists(&self, user_id: &str) -> bool {
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get a user by id.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Find a user by username.
    pub fn find_by_username(&self, username: &str) -> StorageResult<Option<StoredUser>> {
        let user_ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        for id in user_ids {
            if let Ok(user) = self.get(&id) {
                if user.username == username {
                    return Ok(Some(user));
                }
            }
        }

        Ok(None)
    }

    /// Create a new user.
    ///
    /// Fails with `AlreadyExists` when the id or the username is taken.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        if self.exists(&user.user_id) {
            return Err(StorageError::AlreadyExists(format!("User {}", user.user_id)));
        }
        if self.find_by_username(&user.username)?.is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "Username {}",
                user.username
            )));
        }

        self.storage
            .write_json(self.storage.paths().user(&user.user_id), user)
    }

    /// Set (or replace) the verified wallet address on a user.
    ///
    /// Re-verification overwrites any previously bound address.
    pub fn set_wallet_address(&self, user_id: &str, wallet_address: &str) -> StorageResult<()> {
        let mut user = self.get(user_id)?;
        user.wallet_address = Some(wallet_address.to_string());
        self.storage
            .write_json(self.storage.paths().user(user_id), &user)
    }

    /// Append an uploaded asset's content id to the user's asset list.
    pub fn push_asset_ref(&self, user_id: &str, content_id: &str) -> StorageResult<()> {
        let mut user = self.get(user_id)?;
        user.assets.push(content_id.to_string());
        self.storage
            .write_json(self.storage.paths().user(user_id), &user)
    }
}
