// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup and injected into each service at construction; nothing reads
//! ambient globals after boot.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for document storage | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SECRET_KEY` | HS256 signing secret for bearer tokens | Required |
//! | `CHALLENGE_NETWORK` | Network label in wallet challenge strings | `Testnet` |
//! | `PINATA_JWT` | Pinata API token for pinning | Required for uploads |
//! | `PINATA_API_BASE_URL` | Pinata API base URL | `https://api.pinata.cloud` |
//! | `PINATA_GATEWAY_BASE_URL` | Public gateway URL prefix | `https://gateway.pinata.cloud/ipfs/` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the document storage root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token signing secret.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

/// Environment variable name for the challenge network label.
pub const CHALLENGE_NETWORK_ENV: &str = "CHALLENGE_NETWORK";

/// Network label used in challenge strings when none is configured.
pub const DEFAULT_CHALLENGE_NETWORK: &str = "Testnet";
