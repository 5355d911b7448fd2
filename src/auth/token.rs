// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stateless bearer tokens.
//!
//! Tokens are HS256-signed JWTs carrying the owning user's id as `sub`.
//! Nothing is persisted server-side; validity is purely a function of the
//! signature and the `exp` claim. The one-hour lifetime bounds exposure
//! from a leaked token.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Token lifetime in seconds (1 hour).
const TOKEN_TTL_SECS: i64 = 3600;

/// JWT payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject (user id)
    sub: String,
    /// Issued at timestamp
    iat: i64,
    /// Expiration timestamp
    exp: i64,
}

/// Issues and validates bearer tokens with an injected signing secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service from the process-wide signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for a user. No side effects beyond construction.
    pub fn issue(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate a token and return the subject (user id).
    ///
    /// `TokenExpired` when `exp` has elapsed (no leeway); `InvalidToken`
    /// when the signature fails or the payload is malformed, including a
    /// missing `sub`.
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        Ok(token_data.claims.sub)
    }
}
