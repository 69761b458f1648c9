//! Server configuration module

use anyhow::{Context, Result};
use bookner::config::{BookNerConfig, ConfigLoader};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// Add a permissive CORS layer
    pub enable_cors: bool,

    /// Explicit bookner configuration file, if any
    pub config_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            max_request_size: 2 * 1024 * 1024, // 2MB
            enable_cors: true,
            config_file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = cli_args.host {
            config.host = host.parse().context("invalid --host")?;
        } else if let Some(host) = env_parsed("BOOKNER_HOST")? {
            config.host = host;
        }

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Some(port) = env_parsed("BOOKNER_PORT")? {
            config.port = port;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Some(max_size) = env_parsed("BOOKNER_MAX_REQUEST_SIZE")? {
            config.max_request_size = max_size;
        }

        if let Some(enable_cors) = cli_args.enable_cors {
            config.enable_cors = enable_cors;
        } else if let Some(enable_cors) = env_parsed("BOOKNER_ENABLE_CORS")? {
            config.enable_cors = enable_cors;
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file = Some(config_path);
        } else if let Ok(config_path) = env::var("BOOKNER_CONFIG_FILE") {
            config.config_file = Some(PathBuf::from(config_path));
        }

        Ok(config)
    }
}

/// Read and parse an environment variable. Unset is `None`; a value that
/// does not parse is an error naming the variable.
fn env_parsed<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("invalid {name}: {value:?}")),
        Err(_) => Ok(None),
    }
}

/// Load the library configuration: defaults, then the given file (or the
/// default file locations), then `BOOKNER_` environment variables.
///
/// An explicitly named file that cannot be loaded is an error.
pub fn load_bookner_config(config_file: Option<&Path>) -> Result<BookNerConfig> {
    let mut loader = ConfigLoader::new();

    match config_file {
        Some(path) => {
            loader
                .load_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
        }
        None => {
            loader.load_default_files();
        }
    }

    loader.load_env();
    Ok(loader.extract()?)
}
