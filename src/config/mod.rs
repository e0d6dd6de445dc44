//! Configuration management.
//!
//! Settings are layered: serde defaults, then an optional TOML file, then
//! `GET_PAPERS_LIST_*` environment variables (nested keys use `__`, e.g.
//! `GET_PAPERS_LIST_NCBI__EMAIL`). Command-line flags are applied on top by
//! the binary.
//!
//! ```toml
//! [ncbi]
//! email = "you@example.org"
//! tool = "get-papers-list"
//! api_key = "0123456789abcdef"
//!
//! [search]
//! max_results = 10
//!
//! [http]
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::DEFAULT_MAX_RESULTS;

/// Prefix of environment variables read by [`load_config`]
pub const ENV_PREFIX: &str = "GET_PAPERS_LIST";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "get-papers-list.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// NCBI E-utilities settings
    #[serde(default)]
    pub ncbi: NcbiConfig,

    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// NCBI E-utilities endpoint and identification.
///
/// NCBI asks every client to identify itself with a tool name and a
/// contact email; an API key raises the allowed request rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NcbiConfig {
    /// Base URL that `esearch.fcgi` and `efetch.fcgi` are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `tool` parameter
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Value of the `email` parameter
    #[serde(default = "default_email")]
    pub email: Option<String>,

    /// Value of the `api_key` parameter
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,
}

impl Default for NcbiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tool: default_tool(),
            email: default_email(),
            api_key: default_api_key(),
        }
    }
}

fn default_base_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string()
}

fn default_tool() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_email() -> Option<String> {
    std::env::var("NCBI_EMAIL").ok()
}

fn default_api_key() -> Option<String> {
    std::env::var("NCBI_API_KEY").ok()
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of identifiers requested from the search endpoint
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Load configuration from an optional file plus environment variables
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .filter(|path| path.is_file())
}
