// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pinata integration for IPFS pinning.
//!
//! Uploaded files and their metadata documents are pinned through Pinata's
//! HTTP API; the returned content id (CID) becomes the asset's identity.
//! Pinning failures abort asset creation before anything is persisted.

use std::{env, time::Duration};

use reqwest::{multipart, Client};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_API_BASE_URL: &str = "https://api.pinata.cloud";
const DEFAULT_GATEWAY_BASE_URL: &str = "https://gateway.pinata.cloud/ipfs/";

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("Pinata configuration missing: {0}")]
    MissingConfig(String),

    #[error("Pinata request failed: {0}")]
    Request(String),

    #[error("Pinata response was invalid: {0}")]
    InvalidResponse(String),
}

/// Client for the Pinata pinning API.
#[derive(Debug, Clone)]
pub struct PinataClient {
    api_base_url: String,
    gateway_base_url: String,
    jwt: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataClient {
    /// Whether the environment carries enough configuration to pin.
    pub fn is_configured() -> bool {
        required_env_present("PINATA_JWT")
    }

    /// Build a client from the environment.
    ///
    /// `PINATA_JWT` is required; base and gateway URLs default to Pinata's
    /// production endpoints.
    pub fn from_env() -> Result<Self, PinError> {
        let api_base_url = env_or_default("PINATA_API_BASE_URL", DEFAULT_API_BASE_URL);
        let gateway_base_url = env_or_default("PINATA_GATEWAY_BASE_URL", DEFAULT_GATEWAY_BASE_URL);
        let jwt = env_required("PINATA_JWT")?;

        Self::new(api_base_url, gateway_base_url, jwt)
    }

    /// Build a client with explicit configuration.
    pub fn new(
        api_base_url: impl Into<String>,
        gateway_base_url: impl Into<String>,
        jwt: impl Into<String>,
    ) -> Result<Self, PinError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| PinError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url: api_base_url.into(),
            gateway_base_url: gateway_base_url.into(),
            jwt: jwt.into(),
            http,
        })
    }

    /// Pin raw file bytes; returns the content id.
    pub async fn pin_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, PinError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_base_url))
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinError::Request(e.to_string()))?;

        extract_hash(response).await
    }

    /// Pin a JSON document; returns the content id.
    pub async fn pin_json(&self, value: &Value) -> Result<String, PinError> {
        let response = self
            .http
            .post(format!("{}/pinning/pinJSONToIPFS", self.api_base_url))
            .bearer_auth(&self.jwt)
            .json(value)
            .send()
            .await
            .map_err(|e| PinError::Request(e.to_string()))?;

        extract_hash(response).await
    }

    /// Public gateway URL for a pinned content id.
    pub fn gateway_url(&self, cid: &str) -> String {
        format!("{}{cid}", self.gateway_base_url)
    }
}

async fn extract_hash(response: reqwest::Response) -> Result<String, PinError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PinError::Request(format!("status {status}: {body}")));
    }

    let parsed: PinResponse = response
        .json()
        .await
        .map_err(|e| PinError::InvalidResponse(e.to_string()))?;
    Ok(parsed.ipfs_hash)
}

fn required_env_present(key: &str) -> bool {
    env::var(key).map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn env_required(key: &str) -> Result<String, PinError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PinError::MissingConfig(key.to_string()))
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> PinataClient {
        PinataClient::new(
            "https://api.pinata.example",
            "https://gateway.pinata.example/ipfs/",
            "test-jwt",
        )
        .unwrap()
    }

    #[test]
    fn gateway_url_appends_cid() {
        let client = test_client();
        assert_eq!(
            client.gateway_url("QmTestCid123"),
            "https://gateway.pinata.example/ipfs/QmTestCid123"
        );
    }

    #[test]
    fn pin_response_parses_pinata_shape() {
        let parsed: PinResponse = serde_json::from_str(
            r#"{"IpfsHash":"QmTestCid123","PinSize":1234,"Timestamp":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.ipfs_hash, "QmTestCid123");
    }

    #[test]
    fn missing_jwt_yields_missing_config() {
        // Guard against an ambient PINATA_JWT leaking into the test
        if required_env_present("PINATA_JWT") {
            return;
        }
        let err = PinataClient::from_env().unwrap_err();
        assert!(matches!(err, PinError::MissingConfig(_)));
    }
}
