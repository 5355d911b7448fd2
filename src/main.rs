// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use marketplace_server::{
    api::router,
    auth::TokenService,
    config::{CHALLENGE_NETWORK_ENV, DATA_DIR_ENV, DEFAULT_CHALLENGE_NETWORK, SECRET_KEY_ENV},
    ipfs::PinataClient,
    state::AppState,
    storage::{DocumentStore, StoragePaths},
    wallet::ChallengeVerifier,
};

#[tokio::main]
async fn main() {
    init_tracing();

    // Configuration is read once here and injected into each service
    let secret = env::var(SECRET_KEY_ENV).expect("SECRET_KEY must be set");
    let network = env::var(CHALLENGE_NETWORK_ENV)
        .unwrap_or_else(|_| DEFAULT_CHALLENGE_NETWORK.to_string());

    let paths = match env::var(DATA_DIR_ENV) {
        Ok(dir) => StoragePaths::new(dir),
        Err(_) => StoragePaths::default(),
    };
    let mut storage = DocumentStore::new(paths);
    storage.initialize().expect("Failed to initialize storage");

    let pinning = PinataClient::from_env().expect("Pinata pinning must be configured");

    let state = AppState::new(
        storage,
        TokenService::new(secret.as_bytes()),
        ChallengeVerifier::new(network),
        pinning,
    );
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Marketplace server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
