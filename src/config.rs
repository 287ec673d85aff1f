//! Server configuration
//!
//! All configuration is loaded from environment variables:
//!
//! - `SCOREBOOK_BIND` -- listen address (default `0.0.0.0:$PORT`)
//! - `PORT` -- listen port when `SCOREBOOK_BIND` is unset (default `8080`)
//! - `SCOREBOOK_DATA_DIR` -- journal directory; unset keeps state in memory only
//! - `SCOREBOOK_DIRECTORY_FILE` -- roster/games JSON seed; unset uses the built-in roster
//! - `SCOREBOOK_FEED_CAPACITY` -- live feed buffer per subscriber (default `1024`)

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::event_store::JournalConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FEED_CAPACITY: usize = 1024;

/// Errors from reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: Option<PathBuf>,
    pub directory_file: Option<PathBuf>,
    pub feed_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            data_dir: None,
            directory_file: None,
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(|var| env::var(var).ok(), &current_dir)
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Relative paths are resolved against `base_dir`.
    pub fn from_lookup<F>(lookup: F, base_dir: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match var("SCOREBOOK_BIND") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "SCOREBOOK_BIND",
                value,
            })?,
            None => {
                let port = match var("PORT") {
                    Some(value) => value
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| ConfigError::Invalid { var: "PORT", value })?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let feed_capacity = match var("SCOREBOOK_FEED_CAPACITY") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SCOREBOOK_FEED_CAPACITY",
                        value,
                    })
                }
            },
            None => DEFAULT_FEED_CAPACITY,
        };

        let resolve = |path: String| {
            let path = PathBuf::from(path.trim());
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        Ok(Self {
            bind_addr,
            data_dir: var("SCOREBOOK_DATA_DIR").map(resolve),
            directory_file: var("SCOREBOOK_DIRECTORY_FILE").map(resolve),
            feed_capacity,
        })
    }

    /// Journal location, if persistence is enabled
    pub fn journal(&self) -> Option<JournalConfig> {
        self.data_dir.as_ref().map(JournalConfig::new)
    }
}
