// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repositories over the document store, one per collection.

pub mod assets;
pub mod users;

pub use assets::{format_timestamp, sale_window_end, AssetRepository, ListingError, StoredAsset};
pub use users::{StoredUser, UserRepository};
