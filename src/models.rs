// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures for the REST API. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON handling
//! and OpenAPI documentation.
//!
//! Response shapes (field names, projections) match the documents the
//! original frontend consumes; stored-entity types live in
//! [`crate::storage::repository`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::StoredAsset;

// =============================================================================
// Account Models
// =============================================================================

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Desired unique username.
    pub username: String,
    /// Plain-text password; only its Argon2 digest is stored.
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login; the token also travels in the `token` cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}

/// Generic acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Result of a token validity probe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenCheckResponse {
    pub valid: bool,
    /// Username of the token's owner.
    pub user: String,
}

// =============================================================================
// Wallet Models
// =============================================================================

/// Request to bind a wallet address to the calling account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyWalletRequest {
    /// The address being claimed.
    pub wallet_address: String,
    /// Hex signature over the challenge string for that address.
    pub signature: String,
}

// =============================================================================
// Asset Models
// =============================================================================

/// Successful upload: content ids and gateway URLs for file and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadAssetResponse {
    pub success: bool,
    pub file_cid: String,
    pub metadata_cid: String,
    pub file_url: String,
    pub metadata_url: String,
}

/// All assets owned by the calling account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserAssetsResponse {
    pub success: bool,
    pub assets: Vec<StoredAsset>,
}

/// Request to put an asset up for sale.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleRequest {
    /// Content id of the asset to list.
    #[serde(default)]
    pub ipfs_hash: String,
}

/// Acknowledgement of a sale listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleResponse {
    pub message: String,
    pub asset_id: String,
    pub description: String,
    pub author: String,
}

/// Public marketplace projection of a listed asset.
///
/// Deliberately a subset: no price, wallet, or file details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MarketListing {
    pub author: String,
    pub description: String,
    pub ipfs_hash: String,
}

impl From<&StoredAsset> for MarketListing {
    fn from(asset: &StoredAsset) -> Self {
        Self {
            author: asset.author.clone(),
            description: asset.description.clone(),
            ipfs_hash: asset.ipfs_hash.clone(),
        }
    }
}

/// Everything currently purchasable.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarketplaceResponse {
    pub assets: Vec<MarketListing>,
}
