// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage for users and assets as one JSON file per document.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   users/{user_id}.json      # Account: credentials, wallet binding, asset refs
//!   assets/{content_id}.json  # Asset: metadata, sale window, availability
//! ```
//!
//! ## Consistency Model
//!
//! - Writes are atomic per document (temp-file rename)
//! - Concurrent writers to the same document are last-writer-wins
//! - Secondary-key lookups (username, author) scan the collection
//! - Nothing is ever deleted in this service

pub mod documents;
pub mod paths;
pub mod repository;

pub use documents::{DocumentStore, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    format_timestamp, sale_window_end, AssetRepository, ListingError, StoredAsset, StoredUser,
    UserRepository,
};
