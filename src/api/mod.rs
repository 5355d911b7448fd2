// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        LoginRequest, LoginResponse, MarketListing, MarketplaceResponse, MessageResponse,
        SaleRequest, SaleResponse, SignupRequest, TokenCheckResponse, UploadAssetResponse,
        UserAssetsResponse, VerifyWalletRequest,
    },
    state::AppState,
    storage::StoredAsset,
};

use health::{HealthChecks, HealthResponse, ReadyResponse};

pub mod assets;
pub mod auth;
pub mod health;
pub mod wallet;

// Paths are flat (no version prefix) to stay wire-compatible with the
// existing frontend.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/verify", get(auth::verify_token))
        .route("/verify_wallet", post(wallet::verify_wallet))
        .route("/upload_asset", post(assets::upload_asset))
        .route("/user_assets", get(assets::user_assets))
        .route("/sale", post(assets::put_for_sale))
        .route("/display-all-assets", get(assets::display_assets))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup,
        auth::login,
        auth::logout,
        auth::verify_token,
        wallet::verify_wallet,
        assets::upload_asset,
        assets::user_assets,
        assets::put_for_sale,
        assets::display_assets,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            TokenCheckResponse,
            VerifyWalletRequest,
            UploadAssetResponse,
            UserAssetsResponse,
            SaleRequest,
            SaleResponse,
            MarketListing,
            MarketplaceResponse,
            StoredAsset,
            ReadyResponse,
            HealthChecks,
            HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Account registration and sessions"),
        (name = "Wallet", description = "Wallet binding via signed challenges"),
        (name = "Assets", description = "Asset upload and sale lifecycle"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;
