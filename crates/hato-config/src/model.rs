// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Hato service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Hato configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HatoConfig {
    /// Service-wide settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Event log storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bot WebSocket streamer settings.
    #[serde(default)]
    pub streamer: StreamerConfig,

    /// Event log retention and purge timing.
    #[serde(default)]
    pub log: EventLogConfig,
}

/// Service-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional TOML fixture of bots/channels/users loaded into the
    /// in-memory stores by `hato serve`.
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            seed_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Event log storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Whether to enable WAL journal mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: true,
        }
    }
}

fn default_database_path() -> String {
    "hato.db".to_string()
}

fn default_true() -> bool {
    true
}

/// Bot WebSocket streamer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StreamerConfig {
    /// Whether the serve binary exposes the WebSocket endpoint.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bind address of the HTTP server hosting /metrics and the
    /// WebSocket upgrade endpoint.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for StreamerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:3110".to_string()
}

/// Event log retention and purge timing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EventLogConfig {
    /// Records older than this many days are purged.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Upper bound of the purge period in hours.
    #[serde(default = "default_purge_base_hours")]
    pub purge_base_hours: u32,

    /// Lower bound of the purge period in hours; the actual period is
    /// drawn uniformly from [floor, base].
    #[serde(default = "default_purge_jitter_floor_hours")]
    pub purge_jitter_floor_hours: u32,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            purge_base_hours: default_purge_base_hours(),
            purge_jitter_floor_hours: default_purge_jitter_floor_hours(),
        }
    }
}

fn default_retention_days() -> u32 {
    365
}

fn default_purge_base_hours() -> u32 {
    24
}

fn default_purge_jitter_floor_hours() -> u32 {
    23
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = HatoConfig::default();
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.storage.database_path, "hato.db");
        assert!(config.storage.wal_mode);
        assert_eq!(config.log.retention_days, 365);
        assert_eq!(config.log.purge_base_hours, 24);
        assert_eq!(config.log.purge_jitter_floor_hours, 23);
        assert!(config.streamer.enabled);
    }
}
