//! Configuration schema shared by the core components.
//!
//! The core only defines the shape and defaults; reading and writing
//! `config.toml` is the caller's job (see the `trustget` CLI).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Errors from (de)serializing the TOML configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// HTTP transport settings used by the default curl fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Responses larger than this are aborted (checksum files and listings are small).
    pub max_body_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 10,
            user_agent: concat!("trustget/", env!("CARGO_PKG_VERSION")).to_string(),
            max_body_bytes: 8 * 1024 * 1024,
        }
    }
}

/// GitHub release metadata lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_base: String,
    /// Name of the environment variable holding an API token (optional).
    pub token_env: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token_env: Some("TRUSTGET_GITHUB_TOKEN".to_string()),
        }
    }
}

/// Scoring policy: weight overrides, extra trusted domains and an optional gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustPolicy {
    /// Minimum acceptable score; callers decide what to do below it.
    pub min_score: Option<u8>,
    /// Factor name -> signed weight. Replaces the built-in default for that factor.
    pub weights: BTreeMap<String, i32>,
    /// Hostname -> bonus. Merged over the built-in reputation table.
    pub known_domains: BTreeMap<String, u32>,
}

/// Detached signature tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpgConfig {
    pub program: String,
    pub homedir: Option<PathBuf>,
}

impl Default for GpgConfig {
    fn default() -> Self {
        Self {
            program: "gpg".to_string(),
            homedir: None,
        }
    }
}

/// Top-level configuration (`~/.config/trustget/config.toml` for the CLI).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustgetConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub trust: TrustPolicy,
    #[serde(default)]
    pub gpg: GpgConfig,
}

impl TrustgetConfig {
    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
