//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERDICT_*` environment
//! variables. Decision thresholds load separately via
//! [`Thresholds::from_env`](crate::policy::Thresholds::from_env) and are
//! validated here alongside everything else.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::DEFAULT_TOP_K;
use crate::fallback::DEFAULT_FALLBACK_MODEL;
use crate::policy::Thresholds;

/// Default Qdrant URL used when `VERDICT_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERDICT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// CSV corpus indexed at startup. Optional; without it the service
    /// starts with an empty index and waits for a reload call.
    pub corpus_path: Option<PathBuf>,

    /// Directory holding the bi-encoder (config, weights, tokenizer).
    /// Stub embeddings when unset.
    pub embedder_path: Option<PathBuf>,

    /// Directory holding the cross-encoder. Stub scoring when unset.
    pub reranker_path: Option<PathBuf>,

    /// Candidates fetched per query. Default: `15`.
    pub top_k: usize,

    /// Chat model used for escalated queries. Default: `gpt-4o-mini`.
    pub fallback_model: String,

    /// Whether escalated queries go to the fallback model at all.
    /// Default: `false` (escalations are returned to the caller as-is).
    pub fallback_enabled: bool,

    /// Decision thresholds (see [`Thresholds`]).
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            corpus_path: None,
            embedder_path: None,
            reranker_path: None,
            top_k: DEFAULT_TOP_K,
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            fallback_enabled: false,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "VERDICT_PORT";
    const ENV_BIND_ADDR: &'static str = "VERDICT_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "VERDICT_QDRANT_URL";
    const ENV_CORPUS_PATH: &'static str = "VERDICT_CORPUS_PATH";
    const ENV_EMBEDDER_PATH: &'static str = "VERDICT_EMBEDDER_PATH";
    const ENV_RERANKER_PATH: &'static str = "VERDICT_RERANKER_PATH";
    const ENV_TOP_K: &'static str = "VERDICT_TOP_K";
    const ENV_FALLBACK_MODEL: &'static str = "VERDICT_FALLBACK_MODEL";
    const ENV_FALLBACK_ENABLED: &'static str = "VERDICT_FALLBACK_ENABLED";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let corpus_path = Self::parse_optional_path_from_env(Self::ENV_CORPUS_PATH);
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let reranker_path = Self::parse_optional_path_from_env(Self::ENV_RERANKER_PATH);
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k);
        let fallback_model =
            Self::parse_string_from_env(Self::ENV_FALLBACK_MODEL, defaults.fallback_model);
        let fallback_enabled = Self::parse_bool_from_env(
            Self::ENV_FALLBACK_ENABLED,
            defaults.fallback_enabled,
        );

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            corpus_path,
            embedder_path,
            reranker_path,
            top_k,
            fallback_model,
            fallback_enabled,
            thresholds: Thresholds::from_env(),
        })
    }

    /// Validates paths and basic invariants (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.corpus_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        for path in [&self.embedder_path, &self.reranker_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.top_k < 2 {
            return Err(ConfigError::InvalidTopK { value: self.top_k });
        }

        self.thresholds.validate()?;

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }
}
