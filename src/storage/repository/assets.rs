// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Asset repository and sale-listing rules.
//!
//! Each asset is stored as a separate JSON document under `assets/`, keyed
//! by the IPFS content id assigned at pin time. An asset starts unlisted and
//! can be put up for sale exactly while its sale window is open; the window
//! closes two calendar months after creation.
//!
//! Expiry is checked lazily at the listing transition and again when the
//! public marketplace is read. Nothing ever flips `available` back to false
//! in storage.

use chrono::{Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Sale window length, in calendar months.
const SALE_WINDOW_MONTHS: u32 = 2;

/// Timestamp format for asset documents (naive UTC, ISO-8601).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Asset stored in the document store.
///
/// Field names match the persisted asset documents; existing data stays
/// readable across reimplementations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredAsset {
    /// Content id of the pinned file (unique, immutable)
    pub ipfs_hash: String,
    /// Content id of the pinned metadata document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_hash: Option<String>,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Username of the owning account
    pub author: String,
    /// Owner's verified wallet address at creation time (may be empty)
    pub wallet_address: String,
    /// Creation timestamp (naive UTC, ISO-8601)
    pub created_at: String,
    /// End of the sale window; absent or malformed values block listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    /// Original file name of the upload
    pub file_name: String,
    /// MIME type of the upload
    pub content_type: String,
    /// Asking price (free-form, set by the uploader)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Whether the asset is listed on the public marketplace
    pub available: bool,
}

/// Failure modes of the put-for-sale transition.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Asset not found")]
    NotFound,

    #[error("Asset expiry date is missing")]
    MissingExpiry,

    #[error("Invalid expiry date format")]
    InvalidExpiryFormat,

    #[error("Asset has expired")]
    Expired,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Format a timestamp the way asset documents store them.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Compute the end of the sale window for an asset created at `created_at`.
///
/// Two calendar months, day-of-month clamped (Dec 31 + 2 months = Feb 28/29).
/// `None` only on date overflow.
pub fn sale_window_end(created_at: NaiveDateTime) -> Option<NaiveDateTime> {
    created_at.checked_add_months(Months::new(SALE_WINDOW_MONTHS))
}

/// Repository for asset operations on the document store.
pub struct AssetRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> AssetRepository<'a> {
    /// Create a new AssetRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if an asset exists.
    pub fn exists(&self, content_id: &str) -> bool {
        self.storage.exists(self.storage.paths().asset(content_id))
    }

    /// Get an asset by content id.
    pub fn get(&self, content_id: &str) -> StorageResult<StoredAsset> {
        let path = self.storage.paths().asset(content_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Asset {content_id}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a newly created asset.
    pub fn create(&self, asset: &StoredAsset) -> StorageResult<()> {
        let content_id = &asset.ipfs_hash;

        if self.exists(content_id) {
            return Err(StorageError::AlreadyExists(format!("Asset {content_id}")));
        }

        self.storage
            .write_json(self.storage.paths().asset(content_id), asset)
    }

    /// Put an asset up for sale.
    ///
    /// Validates the expiry field lazily: absent, unparseable, and elapsed
    /// expiries each fail with their own variant. On success `available`
    /// becomes true; re-listing a live asset is a no-op success.
    pub fn mark_for_sale(
        &self,
        content_id: &str,
        now: NaiveDateTime,
    ) -> Result<StoredAsset, ListingError> {
        let mut asset = match self.get(content_id) {
            Ok(asset) => asset,
            Err(StorageError::NotFound(_)) => return Err(ListingError::NotFound),
            Err(e) => return Err(ListingError::Storage(e)),
        };

        let expiry = asset.expiry.as_deref().ok_or(ListingError::MissingExpiry)?;
        let expiry: NaiveDateTime = expiry
            .parse()
            .map_err(|_| ListingError::InvalidExpiryFormat)?;

        if expiry <= now {
            return Err(ListingError::Expired);
        }

        asset.available = true;
        self.storage
            .write_json(self.storage.paths().asset(content_id), &asset)?;

        Ok(asset)
    }

    /// List all assets owned by a user, stable by storage order.
    pub fn list_by_author(&self, username: &str) -> StorageResult<Vec<StoredAsset>> {
        let content_ids = self
            .storage
            .list_files(self.storage.paths().assets_dir(), "json")?;

        let mut assets = Vec::new();
        for id in content_ids {
            if let Ok(asset) = self.get(&id) {
                if asset.author == username {
                    assets.push(asset);
                }
            }
        }

        Ok(assets)
    }

    /// List assets currently purchasable on the public marketplace.
    ///
    /// Re-checks expiry at read time: an asset flagged available whose sale
    /// window has since closed (or whose expiry cannot be parsed) is
    /// filtered out here without touching the stored flag.
    pub fn list_available(&self, now: NaiveDateTime) -> StorageResult<Vec<StoredAsset>> {
        let content_ids = self
            .storage
            .list_files(self.storage.paths().assets_dir(), "json")?;

        let mut assets = Vec::new();
        for id in content_ids {
            if let Ok(asset) = self.get(&id) {
                if asset.available && is_within_sale_window(&asset, now) {
                    assets.push(asset);
                }
            }
        }

        Ok(assets)
    }
}

fn is_within_sale_window(asset: &StoredAsset, now: NaiveDateTime) -> bool {
    asset
        .expiry
        .as_deref()
        .and_then(|raw| raw.parse::<NaiveDateTime>().ok())
        .is_some_and(|expiry| expiry > now)
}
