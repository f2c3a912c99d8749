//! Client configuration loading.
//!
//! Configuration is resolved once at startup: built-in defaults, then an
//! optional YAML or JSON file, then environment overrides. The result is a
//! plain [`ClientConfig`] handed to constructors.

use std::path::{Path, PathBuf};

use freemate_domain::ClientConfig;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Overrides [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "FREEMATE_BASE_URL";
/// Overrides the access token lifetime, in seconds.
pub const ENV_ACCESS_TOKEN_TTL_SECS: &str = "FREEMATE_ACCESS_TOKEN_TTL_SECS";
/// Overrides the login page used for redirects.
pub const ENV_LOGIN_PAGE: &str = "FREEMATE_LOGIN_PAGE";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid configuration.
    #[error("failed to parse config file {}: {message}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// An environment override has an unusable value.
    #[error("invalid value for {name}: {value:?}")]
    InvalidOverride {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The resolved base URL is not an absolute URL.
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl {
        /// Offending URL.
        url: String,
        /// Parser message.
        message: String,
    },
}

/// Where a configuration value came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults only.
    Defaults,
    /// Loaded from a file.
    File(PathBuf),
}

/// Loads configuration from `path` (if any) and applies overrides read
/// through `env`.
///
/// `env` is normally `|name| std::env::var(name).ok()`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or parsed, an
/// override is malformed, or the final base URL is not absolute.
pub fn load_config(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(ClientConfig, ConfigSource), ConfigError> {
    let (mut config, source) = match path {
        Some(path) => (read_config_file(path)?, ConfigSource::File(path.to_path_buf())),
        None => (ClientConfig::default(), ConfigSource::Defaults),
    };

    apply_env_overrides(&mut config, env)?;
    validate(&mut config)?;

    debug!(base_url = %config.base_url, ?source, "Configuration loaded");
    Ok((config, source))
}

/// Reads a configuration file. `.json` files are parsed as JSON, anything
/// else as YAML. Missing fields take their defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
pub fn read_config_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Applies the `FREEMATE_*` overrides to `config`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOverride`] for a TTL that is not a number.
pub fn apply_env_overrides(
    config: &mut ClientConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(base_url) = env(ENV_BASE_URL) {
        config.base_url = base_url;
    }

    if let Some(raw) = env(ENV_ACCESS_TOKEN_TTL_SECS) {
        config.token.access_token_ttl_secs =
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    name: ENV_ACCESS_TOKEN_TTL_SECS,
                    value: raw.clone(),
                })?;
    }

    if let Some(login) = env(ENV_LOGIN_PAGE) {
        config.page_urls.login = login;
    }

    Ok(())
}

/// Checks the base URL and strips a trailing slash so paths join cleanly.
fn validate(config: &mut ClientConfig) -> Result<(), ConfigError> {
    Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
        url: config.base_url.clone(),
        message: e.to_string(),
    })?;

    while config.base_url.ends_with('/') {
        config.base_url.pop();
    }
    Ok(())
}
