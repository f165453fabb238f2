//! Listener configuration
//!
//! The listener reads one JSON file at start-up:
//!
//! ```json
//! { "port": "8080", "appName": "hearth", "staticDir": "static/", "shutDownPath": "exit" }
//! ```
//!
//! Every field is optional. Empty or missing values fall back to port
//! `8080`, static directory `static/`, and an application name taken from
//! the executable. The result is immutable for the life of the process.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Port used when the file leaves it empty
pub const DEFAULT_PORT: &str = "8080";

/// Static directory used when the file leaves it empty
pub const DEFAULT_STATIC_DIR: &str = "static/";

/// Characters the router treats specially in a route path
const ROUTE_METACHARACTERS: &[char] = &['{', '}', '*', ':'];

/// Listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// File this configuration was loaded from
    #[serde(default, skip_deserializing)]
    pub config_file: PathBuf,

    /// Value of the `Server` response header
    #[serde(default)]
    pub app_name: String,

    /// TCP port, kept as text the way the file carries it
    #[serde(default)]
    pub port: String,

    /// Root directory for served resources
    #[serde(default, rename = "staticDir")]
    pub static_dir: PathBuf,

    /// Route that triggers shutdown; empty disables it
    #[serde(default, rename = "shutDownPath", alias = "shutdownPath")]
    pub shutdown_path: String,
}

impl Config {
    /// Read, parse and default a configuration file.
    ///
    /// `executable` is the program path as invoked; its last `/` component
    /// becomes the application name when the file gives none.
    pub fn load(executable: &str, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_file = path.to_path_buf();
        config.apply_defaults(executable);
        config.validate()?;

        Ok(config)
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Fill empty fields with their defaults
    pub fn apply_defaults(&mut self, executable: &str) {
        if self.port.is_empty() {
            self.port = DEFAULT_PORT.to_string();
        }
        if self.static_dir.as_os_str().is_empty() {
            self.static_dir = PathBuf::from(DEFAULT_STATIC_DIR);
        }
        if self.app_name.is_empty() {
            self.app_name = app_name_from(executable);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.port_number()?;

        let route = self.shutdown_path.trim_start_matches('/');
        if route.contains(ROUTE_METACHARACTERS) || route.contains("..") {
            return Err(ConfigError::InvalidValue {
                field: "shutDownPath".to_string(),
                reason: format!("'{}' is not a plain route path", self.shutdown_path),
            });
        }

        Ok(())
    }

    /// Port parsed as a number
    pub fn port_number(&self) -> Result<u16, ConfigError> {
        self.port.parse().map_err(|_| ConfigError::InvalidValue {
            field: "port".to_string(),
            reason: format!("'{}' is not a TCP port", self.port),
        })
    }

    /// Address the listener binds: every interface on the configured port
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port_number()?)))
    }

    /// Route of the shutdown endpoint, if one is configured
    pub fn shutdown_route(&self) -> Option<String> {
        let route = self.shutdown_path.trim_start_matches('/');
        (!route.is_empty()).then(|| format!("/{route}"))
    }

    /// Single-line JSON rendering used for the start-up echo
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|source| ConfigError::Parse {
            path: self.config_file.clone(),
            source,
        })
    }
}

/// Last `/`-separated component of an executable path
pub fn app_name_from(executable: &str) -> String {
    executable.rsplit('/').next().unwrap_or(executable).to_string()
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    app_name: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    shutdown_path: Option<String>,
}

impl ConfigBuilder {
    /// Set the `Server` header value
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the static directory
    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set the shutdown route
    pub fn shutdown_path(mut self, path: impl Into<String>) -> Self {
        self.shutdown_path = Some(path.into());
        self
    }

    /// Build the config
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut config = Config {
            config_file: PathBuf::new(),
            app_name: self.app_name.unwrap_or_default(),
            port: self.port.map(|p| p.to_string()).unwrap_or_default(),
            static_dir: self.static_dir.unwrap_or_default(),
            shutdown_path: self.shutdown_path.unwrap_or_default(),
        };
        config.apply_defaults(env!("CARGO_PKG_NAME"));
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Config file '{}' could not be read: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON
    #[error("Config file '{}' could not be parsed: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A field holds an unusable value
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
