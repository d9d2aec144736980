// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered TOML configuration for the Hato service.
//!
//! Configuration is merged from compiled defaults, system and user TOML
//! files, a local `hato.toml`, and `HATO_*` environment variables, then
//! semantically validated.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::HatoConfig;
pub use validation::{ValidationIssue, validate};
