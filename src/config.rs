// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Sources, lowest precedence first: built-in defaults, the TOML config
//! file, then `REPOHOME_*` environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix for environment overrides
const ENV_PREFIX: &str = "REPOHOME";

/// Keys accepted by [`set_value`]
pub const KEYS: [&str; 5] = ["root", "includes", "ignores", "editor", "max_depth"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layering or deserialization failed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The config file could not be read or written
    #[error("Config file {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The config file is not valid TOML
    #[error("Config file {} is not valid TOML: {source}", path.display())]
    Parse {
        /// File involved
        path: PathBuf,
        /// Parser error
        source: toml::de::Error,
    },

    /// The updated config could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Key not recognised
    #[error("Unknown config key: {0} (expected one of: {})", KEYS.join(", "))]
    UnknownKey(String),

    /// Value does not fit the key
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Key being set
        key: String,
        /// Rejected value
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Repository root; clones land in `<root>/<provider>/<user>/<repo>`
    pub root: PathBuf,
    /// Extra directories listed alongside the root
    #[serde(default)]
    pub includes: Vec<PathBuf>,
    /// Glob patterns skipped while scanning
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Editor command used by `open`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Deepest level at which a `.git` directory is recognised
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("~/Developer"),
            includes: Vec::new(),
            ignores: vec!["**/node_modules".to_string()],
            editor: None,
            max_depth: 5,
        }
    }
}

impl Config {
    /// Root followed by the includes, the set of directories to scan
    #[must_use]
    pub fn scan_roots(&self) -> Vec<PathBuf> {
        std::iter::once(self.root.clone())
            .chain(self.includes.iter().cloned())
            .collect()
    }

    /// Editor command: configured value, then `$VISUAL`, then `$EDITOR`
    #[must_use]
    pub fn editor_command(&self) -> Option<String> {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())
    }

    fn normalize(mut self) -> Self {
        self.includes = self
            .includes
            .into_iter()
            .filter_map(|p| {
                let trimmed = p.to_string_lossy().trim().to_string();
                (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
            })
            .collect();
        self.ignores = self
            .ignores
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        self.editor = self.editor.filter(|e| !e.trim().is_empty());
        self
    }
}

/// Default config file location
#[must_use]
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("com", "hyperpolymath", "repohome")
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.config/repohome/config.toml"))
}

/// Load configuration from defaults, `path` (if it exists) and the environment
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let defaults = Config::default();

    let settings = config::Config::builder()
        .set_default("root", defaults.root.to_string_lossy().into_owned())?
        .set_default("includes", Vec::<String>::new())?
        .set_default("ignores", defaults.ignores.clone())?
        .set_default("max_depth", i64::try_from(defaults.max_depth).unwrap_or(5))?
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("includes")
                .with_list_parse_key("ignores"),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    Ok(config.normalize())
}

/// Set `key` to `value` in the config file at `path`, creating it if needed.
///
/// List keys take a comma-separated value.
pub fn set_value(path: &Path, key: &str, value: &str) -> Result<(), ConfigError> {
    let mut table: toml::Table = if path.exists() {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        toml::Table::new()
    };

    let parsed = match key {
        "root" | "editor" => toml::Value::String(value.trim().to_string()),
        "includes" | "ignores" => toml::Value::Array(
            value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| toml::Value::String(v.to_string()))
                .collect(),
        ),
        "max_depth" => {
            let depth: i64 = value.trim().parse().ok().filter(|d| *d > 0).ok_or_else(|| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            })?;
            toml::Value::Integer(depth)
        }
        other => return Err(ConfigError::UnknownKey(other.to_string())),
    };
    table.insert(key.to_string(), parsed);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(&table)?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Render a single key of the effective configuration
pub fn get_value(config: &Config, key: &str) -> Result<String, ConfigError> {
    let joined = |items: Vec<String>| items.join(",");
    match key {
        "root" => Ok(config.root.display().to_string()),
        "includes" => Ok(joined(
            config.includes.iter().map(|p| p.display().to_string()).collect(),
        )),
        "ignores" => Ok(joined(config.ignores.clone())),
        "editor" => Ok(config.editor.clone().unwrap_or_default()),
        "max_depth" => Ok(config.max_depth.to_string()),
        other => Err(ConfigError::UnknownKey(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "root = \"/srv/code\"\nincludes = [\" /opt/work \", \"\"]\nmax_depth = 3\n",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.root, PathBuf::from("/srv/code"));
        assert_eq!(config.includes, vec![PathBuf::from("/opt/work")]);
        assert_eq!(config.ignores, vec!["**/node_modules".to_string()]);
        assert_eq!(config.max_depth, 3);
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        set_value(&path, "root", "/data/src").unwrap();
        set_value(&path, "ignores", "target, vendor ,").unwrap();
        set_value(&path, "max_depth", "4").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(get_value(&config, "root").unwrap(), "/data/src");
        assert_eq!(get_value(&config, "ignores").unwrap(), "target,vendor");
        assert_eq!(get_value(&config, "max_depth").unwrap(), "4");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        assert!(matches!(
            set_value(&path, "colour", "blue"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            set_value(&path, "max_depth", "zero"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_scan_roots_order() {
        let config = Config {
            root: "/a".into(),
            includes: vec!["/b".into(), "/c".into()],
            ..Config::default()
        };
        assert_eq!(
            config.scan_roots(),
            vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")]
        );
    }
}
