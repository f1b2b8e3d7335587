//! Optional `scaffold.toml` configuration.
//!
//! Only the numeric limits live here; CLI flags override config values,
//! which override the built-in defaults.

use anyhow::{Context, Result};
use graphql_scaffold_engine::{GenerateLimits, ReturnTreeLimits, SelectionLimits};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "scaffold.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    pub selection_depth: Option<u32>,
    pub max_fields_per_level: Option<usize>,
    pub return_tree_depth: Option<u32>,
    pub return_tree_max_fields: Option<usize>,
}

/// Limit values given on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LimitOverrides {
    pub selection_depth: Option<u32>,
    pub max_fields_per_level: Option<usize>,
    pub return_tree_depth: Option<u32>,
    pub return_tree_max_fields: Option<usize>,
}

impl Config {
    /// Loads an explicit config path, or `scaffold.toml` from `base_dir` if
    /// present. Absence of a config file is not an error.
    pub fn load(explicit: Option<&Path>, base_dir: &Path) -> Result<Self> {
        let path: Option<PathBuf> = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let candidate = base_dir.join(CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Flags beat config, config beats defaults, per limit.
#[must_use]
pub fn resolve_limits(config: &LimitsConfig, overrides: &LimitOverrides) -> GenerateLimits {
    let defaults = GenerateLimits::default();
    GenerateLimits {
        selection: SelectionLimits {
            depth: overrides
                .selection_depth
                .or(config.selection_depth)
                .unwrap_or(defaults.selection.depth),
            max_fields: overrides
                .max_fields_per_level
                .or(config.max_fields_per_level)
                .unwrap_or(defaults.selection.max_fields),
        },
        return_tree: ReturnTreeLimits {
            depth: overrides
                .return_tree_depth
                .or(config.return_tree_depth)
                .unwrap_or(defaults.return_tree.depth),
            max_fields: overrides
                .return_tree_max_fields
                .or(config.return_tree_max_fields)
                .unwrap_or(defaults.return_tree.max_fields),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert!(config.limits.selection_depth.is_none());
    }

    #[test]
    fn config_values_override_defaults_and_flags_beat_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[limits]\nselection_depth = 3\nmax_fields_per_level = 5\n",
        )
        .unwrap();
        let config = Config::load(None, dir.path()).unwrap();

        let limits = resolve_limits(&config.limits, &LimitOverrides::default());
        assert_eq!(limits.selection.depth, 3);
        assert_eq!(limits.selection.max_fields, 5);
        assert_eq!(limits.return_tree.depth, 2);

        let overrides = LimitOverrides {
            selection_depth: Some(1),
            ..LimitOverrides::default()
        };
        let limits = resolve_limits(&config.limits, &overrides);
        assert_eq!(limits.selection.depth, 1);
        assert_eq!(limits.selection.max_fields, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[limits]\ntypo_depth = 3\n").unwrap();
        assert!(Config::load(None, dir.path()).is_err());
    }
}
