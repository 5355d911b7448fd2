// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Asset endpoints: upload, owner listing, sale listing, public marketplace.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{
    MarketListing, MarketplaceResponse, SaleRequest, SaleResponse, UploadAssetResponse,
    UserAssetsResponse,
};
use crate::state::AppState;
use crate::storage::{
    format_timestamp, sale_window_end, AssetRepository, StoredAsset, UserRepository,
};

/// Parsed fields of an upload form.
struct UploadForm {
    bytes: Vec<u8>,
    file_name: String,
    content_type: String,
    name: Option<String>,
    description: String,
    price: Option<String>,
}

async fn parse_upload(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut name = None;
    let mut description = String::new();
    let mut price = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;
                file = Some((bytes.to_vec(), file_name, content_type));
            }
            Some("name") => name = Some(read_text(field).await?),
            Some("description") => description = read_text(field).await?,
            Some("price") => price = Some(read_text(field).await?),
            _ => {}
        }
    }

    let (bytes, file_name, content_type) = file.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    if file_name.is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }

    Ok(UploadForm {
        bytes,
        file_name,
        content_type,
        name,
        description,
        price,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload field: {e}")))
}

#[utoipa::path(
    post,
    path = "/upload_asset",
    tag = "Assets",
    responses(
        (status = 200, description = "File and metadata pinned, asset recorded", body = UploadAssetResponse),
        (status = 400, description = "Missing file or malformed form"),
        (status = 401, description = "Not authenticated"),
        (status = 502, description = "Pinning service failed")
    )
)]
pub async fn upload_asset(
    State(state): State<AppState>,
    Auth(user): Auth,
    multipart: Multipart,
) -> Result<Json<UploadAssetResponse>, ApiError> {
    let form = parse_upload(multipart).await?;

    // Pin before persisting anything: a pinning failure must leave no
    // partial asset or user-list mutation behind.
    let file_cid = state.pinning.pin_file(form.bytes, &form.file_name).await?;

    let created_at = Utc::now().naive_utc();
    let mut asset = StoredAsset {
        ipfs_hash: file_cid,
        metadata_hash: None,
        name: form.name.unwrap_or_else(|| form.file_name.clone()),
        description: form.description,
        author: user.username.clone(),
        wallet_address: user.wallet_address.clone().unwrap_or_default(),
        created_at: format_timestamp(created_at),
        expiry: sale_window_end(created_at).map(format_timestamp),
        file_name: form.file_name,
        content_type: form.content_type,
        price: form.price,
        available: false,
    };

    let metadata = serde_json::to_value(&asset)
        .map_err(|e| ApiError::internal(format!("Failed to serialize metadata: {e}")))?;
    let metadata_cid = state.pinning.pin_json(&metadata).await?;
    asset.metadata_hash = Some(metadata_cid.clone());

    AssetRepository::new(&state.storage).create(&asset)?;
    UserRepository::new(&state.storage).push_asset_ref(&user.user_id, &asset.ipfs_hash)?;

    tracing::info!(
        username = %user.username,
        cid = %asset.ipfs_hash,
        "asset uploaded"
    );

    Ok(Json(UploadAssetResponse {
        file_url: state.pinning.gateway_url(&asset.ipfs_hash),
        metadata_url: state.pinning.gateway_url(&metadata_cid),
        success: true,
        file_cid: asset.ipfs_hash,
        metadata_cid,
    }))
}

#[utoipa::path(
    get,
    path = "/user_assets",
    tag = "Assets",
    responses(
        (status = 200, description = "All assets owned by the caller", body = UserAssetsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn user_assets(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<UserAssetsResponse>, ApiError> {
    let assets = AssetRepository::new(&state.storage).list_by_author(&user.username)?;

    Ok(Json(UserAssetsResponse {
        success: true,
        assets,
    }))
}

#[utoipa::path(
    post,
    path = "/sale",
    request_body = SaleRequest,
    tag = "Assets",
    responses(
        (status = 200, description = "Asset listed for sale", body = SaleResponse),
        (status = 400, description = "Missing CID, bad expiry, or expired asset"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Unknown content id")
    )
)]
pub async fn put_for_sale(
    State(state): State<AppState>,
    Auth(_user): Auth,
    Json(request): Json<SaleRequest>,
) -> Result<Json<SaleResponse>, ApiError> {
    if request.ipfs_hash.is_empty() {
        return Err(ApiError::bad_request("CID not sent"));
    }

    let asset = AssetRepository::new(&state.storage)
        .mark_for_sale(&request.ipfs_hash, Utc::now().naive_utc())?;

    Ok(Json(SaleResponse {
        message: "Asset is up for sale".to_string(),
        asset_id: asset.ipfs_hash,
        description: asset.description,
        author: asset.author,
    }))
}

#[utoipa::path(
    get,
    path = "/display-all-assets",
    tag = "Assets",
    responses(
        (status = 200, description = "Everything currently purchasable", body = MarketplaceResponse),
        (status = 404, description = "Nothing is for sale")
    )
)]
pub async fn display_assets(
    State(state): State<AppState>,
) -> Result<Json<MarketplaceResponse>, ApiError> {
    let assets = AssetRepository::new(&state.storage).list_available(Utc::now().naive_utc())?;

    // Empty is a distinct user-visible outcome, not a server error
    if assets.is_empty() {
        return Err(ApiError::not_found("No assets for sale"));
    }

    Ok(Json(MarketplaceResponse {
        assets: assets.iter().map(MarketListing::from).collect(),
    }))
}
