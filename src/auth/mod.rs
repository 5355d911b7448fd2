// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential and session handling for the marketplace API.
//!
//! ## Auth Flow
//!
//! 1. `/signup` stores the username with an Argon2 password digest
//! 2. `/login` verifies credentials and issues an HS256 JWT (1 hour TTL)
//! 3. The client presents the token as a `token` cookie or
//!    `Authorization: Bearer <token>` header
//! 4. The [`Auth`] extractor validates the token and resolves the owning
//!    user on every protected call
//!
//! ## Security
//!
//! - Tokens are stateless; no server-side session table
//! - The signing secret is injected at construction, never read ambiently
//! - Expiry is enforced with zero clock-skew leeway
//! - A valid token whose user no longer exists is rejected

pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::{Auth, TOKEN_COOKIE};
pub use token::TokenService;
