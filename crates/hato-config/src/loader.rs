// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hato.toml` > `~/.config/hato/hato.toml` >
//! `/etc/hato/hato.toml` with environment variable overrides via the
//! `HATO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HatoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hato/hato.toml` (system-wide)
/// 3. `~/.config/hato/hato.toml` (user XDG config)
/// 4. `./hato.toml` (local directory)
/// 5. `HATO_*` environment variables
pub fn load_config() -> Result<HatoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HatoConfig::default()))
        .merge(Toml::file("/etc/hato/hato.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hato/hato.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hato.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HatoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HatoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HatoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HatoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HATO_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("HATO_").map(|key| {
        let key_str = key.as_str();
        for section in ["service", "storage", "streamer", "log"] {
            if let Some(rest) = key_str.strip_prefix(&format!("{section}_")) {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_owned().into()
    })
}
