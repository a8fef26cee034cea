//! Configuration resolution for `GameBridge`.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Per-user settings (`$XDG_CONFIG_HOME/gamebridge/settings.json`,
//!    `%APPDATA%` on Windows, `Application Support` on macOS)
//! 3. Explicit config file (CLI `--config`)
//! 4. Environment variables

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ipc::DEFAULT_QUEUE_CAPACITY;

/// Complete `GameBridge` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter applied to the gamebridge crates.
    pub level: String,
    /// Emit JSON log lines.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// In-process transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Capacity of the renderer to main queue.
    pub queue_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let global = global_config_path().filter(|path| path.exists());
    resolve(global.as_deref(), explicit, |key| std::env::var(key).ok())
}

/// Layer the given files over the defaults, then the environment.
///
/// Each file only overrides the keys it sets; anything it omits keeps the
/// value from the layer below.
fn resolve<F>(global: Option<&Path>, explicit: Option<&Path>, var: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut merged = serde_json::to_value(Config::default())?;
    for path in global.into_iter().chain(explicit) {
        merge_json(&mut merged, read_layer(path)?);
    }

    let mut config: Config = serde_json::from_value(merged)
        .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;
    apply_env_overrides(&mut config, var);
    validate(&config)?;
    Ok(config)
}

/// Per-user settings file, under the platform's configuration directory.
pub fn global_config_path() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join("gamebridge").join("settings.json"))
}

fn user_config_dir() -> Option<PathBuf> {
    let env_dir = |key: &str| std::env::var_os(key).map(PathBuf::from);
    if cfg!(target_os = "windows") {
        env_dir("APPDATA")
    } else if cfg!(target_os = "macos") {
        env_dir("HOME").map(|home| home.join("Library").join("Application Support"))
    } else {
        env_dir("XDG_CONFIG_HOME").or_else(|| env_dir("HOME").map(|home| home.join(".config")))
    }
}

/// Read and parse one JSON config file. Missing sections keep defaults.
pub fn load_config_file(path: &Path) -> Result<Config> {
    serde_json::from_value(read_layer(path)?).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })
}

fn read_layer(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })
}

/// Recursively overlay `layer` onto `base`. Objects merge key by key; any
/// other value replaces what was there.
fn merge_json(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn apply_env_overrides<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = var("GAMEBRIDGE_LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = var("GAMEBRIDGE_LOG_JSON") {
        config.logging.json = matches!(val.trim(), "1" | "true" | "yes");
    }
    if let Some(val) = var("GAMEBRIDGE_QUEUE_CAPACITY")
        && let Ok(n) = val.trim().parse()
    {
        config.transport.queue_capacity = n;
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.transport.queue_capacity == 0 {
        return Err(Error::Config(
            "transport.queue_capacity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_config_uses_info_level_and_default_queue() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.transport.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"logging":{"json":true}}"#).unwrap();

        let config = load_config_file(&path).unwrap();
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.transport.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_config_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn env_overrides_apply_on_top_of_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GAMEBRIDGE_LOG_LEVEL", "debug"),
            ("GAMEBRIDGE_LOG_JSON", "1"),
            ("GAMEBRIDGE_QUEUE_CAPACITY", "8"),
        ]);
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(ToString::to_string));

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.transport.queue_capacity, 8);
    }

    #[test]
    fn unparsable_capacity_override_is_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| {
            (key == "GAMEBRIDGE_QUEUE_CAPACITY").then(|| "lots".to_string())
        });
        assert_eq!(config.transport.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn explicit_file_layers_over_global_file() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.json",
            r#"{"logging":{"json":true,"level":"debug"}}"#,
        );
        let explicit = write(dir.path(), "explicit.json", r#"{"transport":{"queue_capacity":8}}"#);

        let config = resolve(Some(global.as_path()), Some(explicit.as_path()), |_| None).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.transport.queue_capacity, 8);
    }

    #[test]
    fn explicit_file_overrides_only_the_keys_it_sets() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.json",
            r#"{"logging":{"json":true,"level":"debug"},"transport":{"queue_capacity":4}}"#,
        );
        let explicit = write(dir.path(), "explicit.json", r#"{"logging":{"level":"warn"}}"#);

        let config = resolve(Some(global.as_path()), Some(explicit.as_path()), |_| None).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
        assert_eq!(config.transport.queue_capacity, 4);
    }

    #[test]
    fn env_wins_over_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(dir.path(), "global.json", r#"{"logging":{"level":"debug"}}"#);

        let config = resolve(Some(global.as_path()), None, |key| {
            (key == "GAMEBRIDGE_LOG_LEVEL").then(|| "trace".to_string())
        })
        .unwrap();
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            resolve(None, Some(missing.as_path()), |_| None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zero_capacity_from_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "explicit.json", r#"{"transport":{"queue_capacity":0}}"#);
        assert!(matches!(
            resolve(None, Some(explicit.as_path()), |_| None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn global_path_lives_in_a_gamebridge_directory() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with(Path::new("gamebridge").join("settings.json")));
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut config = Config::default();
        config.transport.queue_capacity = 0;
        assert!(matches!(validate(&config), Err(Error::Config(_))));
    }
}
