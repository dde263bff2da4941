// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration.

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Backend address used when neither CLI, environment nor config set one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the configured backend address.
pub const ENV_SERVER_URL: &str = "ONCOCROSS_SERVER_URL";

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Language code used when nothing valid is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// `EnvFilter` directive used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,oncocross=info";
