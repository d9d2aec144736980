// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic validation of a loaded configuration.
//!
//! Figment guarantees shape; this pass checks the values make sense
//! together and accumulates every problem instead of stopping at the first.

use std::fmt;

use crate::model::HatoConfig;

/// One validation problem, with the key path that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Validate a configuration, returning every issue found.
pub fn validate(config: &HatoConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match config.service.log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        other => issues.push(ValidationIssue {
            key: "service.log_level",
            message: format!("unknown level {other:?} (expected trace|debug|info|warn|error)"),
        }),
    }

    if config.storage.database_path.is_empty() {
        issues.push(ValidationIssue {
            key: "storage.database_path",
            message: "must not be empty".into(),
        });
    }

    if config.log.retention_days == 0 {
        issues.push(ValidationIssue {
            key: "log.retention_days",
            message: "retention of zero days would purge every record".into(),
        });
    }

    if config.log.purge_jitter_floor_hours > config.log.purge_base_hours {
        issues.push(ValidationIssue {
            key: "log.purge_jitter_floor_hours",
            message: format!(
                "jitter floor ({}) exceeds base period ({})",
                config.log.purge_jitter_floor_hours, config.log.purge_base_hours
            ),
        });
    }

    if config.log.purge_base_hours == 0 {
        issues.push(ValidationIssue {
            key: "log.purge_base_hours",
            message: "purge period must be at least one hour".into(),
        });
    }

    if config.streamer.enabled && config.streamer.bind_addr.parse::<std::net::SocketAddr>().is_err()
    {
        issues.push(ValidationIssue {
            key: "streamer.bind_addr",
            message: format!("{:?} is not a valid socket address", config.streamer.bind_addr),
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&HatoConfig::default()).is_empty());
    }

    #[test]
    fn inverted_purge_window_is_reported() {
        let mut config = HatoConfig::default();
        config.log.purge_base_hours = 10;
        config.log.purge_jitter_floor_hours = 20;
        let issues = validate(&config);
        assert!(
            issues
                .iter()
                .any(|i| i.key == "log.purge_jitter_floor_hours")
        );
    }

    #[test]
    fn multiple_issues_accumulate() {
        let mut config = HatoConfig::default();
        config.service.log_level = "verbose".into();
        config.storage.database_path.clear();
        config.log.retention_days = 0;
        assert_eq!(validate(&config).len(), 3);
    }

    #[test]
    fn bad_bind_addr_is_reported_only_when_enabled() {
        let mut config = HatoConfig::default();
        config.streamer.bind_addr = "not-an-addr".into();
        assert_eq!(validate(&config).len(), 1);
        config.streamer.enabled = false;
        assert!(validate(&config).is_empty());
    }
}
