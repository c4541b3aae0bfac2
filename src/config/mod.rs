//! Connection settings resolved from the process environment plus a one-key
//! JSON file that persists the account password.
//!
//! The file is the source of truth for the password once written: loading
//! seeds a missing `password` key from the environment and immediately writes
//! the file back, so a fresh deployment materializes its credential store on
//! first use. Every other setting is read from the environment on each load
//! and never persisted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const ENV_HOST: &str = "CUBACEL_HOST";
pub const ENV_USERNAME: &str = "CUBACEL_USERNAME";
pub const ENV_PASSWORD: &str = "CUBACEL_PASSWORD";
pub const ENV_SIM_TUR_ID: &str = "CUBACEL_SIM_TUR_ID";
pub const ENV_MIN_BATCH_SIMTUR: &str = "CUBACEL_MIN_BATCH_SIMTUR";
pub const ENV_MAX_BATCH_SIMTUR: &str = "CUBACEL_MAX_BATCH_SIMTUR";
pub const ENV_ENVIRONMENT: &str = "CUBACEL_ENVIRONMENT";
pub const ENV_VERBOSE_ENABLED: &str = "CUBACEL_VERBOSE_ENABLED";

/// Conventional location of the credential file, relative to the process
/// working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/cubacel.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON in the config file is fatal; no recovery is attempted.
    #[error("malformed config file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{key} is not a number: {value}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("missing required setting: {key}")]
    Missing { key: &'static str },
}

/// On-disk shape: a JSON object owning the `password` key. Unknown keys are
/// preserved across rewrites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    password: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Resolved connection settings for one account session.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Path of the JSON file persisting the password.
    pub path: PathBuf,
    pub host: String,
    pub username: String,
    pub password: String,
    /// Tourist-SIM package id used by `SalePackage`.
    pub sim_product_id: Option<u32>,
    pub min_batch: Option<u32>,
    pub max_batch: Option<u32>,
    pub environment: String,
    /// When set, request and reply payloads are logged for every call.
    pub verbose: bool,
}

impl SdkConfig {
    /// Load settings from the process environment and the JSON file at
    /// `path` (default: [`DEFAULT_CONFIG_PATH`]). The file is rewritten on
    /// every load, creating parent directories as needed.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Like [`SdkConfig::load`], with an injectable environment lookup.
    pub fn load_with_env<F>(path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut file = read_file(&path)?;
        if file.password.is_none() {
            file.password = Some(env(ENV_PASSWORD).unwrap_or_default());
        }
        write_file(&path, &file)?;

        Ok(Self {
            host: env(ENV_HOST).unwrap_or_default(),
            username: env(ENV_USERNAME).unwrap_or_default(),
            password: file.password.unwrap_or_default(),
            sim_product_id: parse_number(ENV_SIM_TUR_ID, env(ENV_SIM_TUR_ID))?,
            min_batch: parse_number(ENV_MIN_BATCH_SIMTUR, env(ENV_MIN_BATCH_SIMTUR))?,
            max_batch: parse_number(ENV_MAX_BATCH_SIMTUR, env(ENV_MAX_BATCH_SIMTUR))?,
            environment: env(ENV_ENVIRONMENT).unwrap_or_default(),
            verbose: env(ENV_VERBOSE_ENABLED)
                .and_then(|value| value.trim().parse::<i64>().ok())
                .map(|value| value != 0)
                .unwrap_or(false),
            path,
        })
    }

    /// Overwrite the `password` key in the config file, leaving every other
    /// key untouched.
    ///
    /// Plain read-modify-write: a concurrent loader can race and lose an
    /// update. The design assumes a single credential owner.
    pub fn change_password(&self, new_password: &str) -> Result<(), ConfigError> {
        let mut file = read_file(&self.path)?;
        file.password = Some(new_password.to_owned());
        write_file(&self.path, &file)
    }
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_owned(),
        source,
    })
}

fn write_file(path: &Path, file: &ConfigFile) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: path.to_owned(),
                source,
            })?;
        }
    }
    let contents = serde_json::to_string_pretty(file).map_err(|source| ConfigError::Json {
        path: path.to_owned(),
        source,
    })?;
    fs::write(path, contents).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })
}

fn parse_number(key: &'static str, value: Option<String>) -> Result<Option<u32>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_password(password: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| match key {
            ENV_PASSWORD => Some(password.to_owned()),
            ENV_HOST => Some("https://example.invalid".to_owned()),
            ENV_USERNAME => Some("acct".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn loading_without_a_file_seeds_the_password_from_the_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubacel.json");

        let config =
            SdkConfig::load_with_env(Some(path.clone()), env_with_password("abc")).unwrap();
        assert_eq!(config.password, "abc");

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["password"], "abc");
    }

    #[test]
    fn loading_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config").join("cubacel.json");

        SdkConfig::load_with_env(Some(path.clone()), env_with_password("abc")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn the_file_wins_over_the_environment_once_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubacel.json");
        fs::write(&path, r#"{"password": "from-file"}"#).unwrap();

        let config =
            SdkConfig::load_with_env(Some(path), env_with_password("from-env")).unwrap();
        assert_eq!(config.password, "from-file");
    }

    #[test]
    fn an_existing_file_without_a_password_gains_one_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubacel.json");
        fs::write(&path, r#"{"note": "keep me"}"#).unwrap();

        SdkConfig::load_with_env(Some(path.clone()), |_| None).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["password"], "");
        assert_eq!(written["note"], "keep me");
    }

    #[test]
    fn change_password_rewrites_only_the_password_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubacel.json");
        fs::write(&path, r#"{"password": "abc", "note": "keep me"}"#).unwrap();

        let config =
            SdkConfig::load_with_env(Some(path.clone()), env_with_password("abc")).unwrap();
        config.change_password("xyz").unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["password"], "xyz");
        assert_eq!(written["note"], "keep me");
    }

    #[test]
    fn malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubacel.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SdkConfig::load_with_env(Some(path), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn numeric_settings_parse_or_fail_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubacel.json");

        let config = SdkConfig::load_with_env(Some(path.clone()), |key| match key {
            ENV_SIM_TUR_ID => Some("123".to_owned()),
            ENV_MIN_BATCH_SIMTUR => Some("10".to_owned()),
            ENV_MAX_BATCH_SIMTUR => Some("500".to_owned()),
            ENV_VERBOSE_ENABLED => Some("1".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.sim_product_id, Some(123));
        assert_eq!(config.min_batch, Some(10));
        assert_eq!(config.max_batch, Some(500));
        assert!(config.verbose);

        let err = SdkConfig::load_with_env(Some(path), |key| match key {
            ENV_SIM_TUR_ID => Some("lots".to_owned()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                key: ENV_SIM_TUR_ID,
                ..
            }
        ));
    }
}
