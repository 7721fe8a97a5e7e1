//! Relay configuration.
//!
//! All settings come from the environment, each with a default:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `SERIAL_PORT` | `/dev/ttyUSB0` | serial device path |
//! | `BAUD_RATE` | `9600` | serial baud rate |
//! | `BRIDGE_HOST` | `0.0.0.0` | HTTP listen host |
//! | `BRIDGE_PORT` | `5000` | HTTP listen port |
//! | `SERIAL_TIMEOUT_MS` | `1000` | serial write timeout |

use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const ENV_SERIAL_PORT: &str = "SERIAL_PORT";
pub const ENV_BAUD_RATE: &str = "BAUD_RATE";
pub const ENV_HOST: &str = "BRIDGE_HOST";
pub const ENV_PORT: &str = "BRIDGE_PORT";
pub const ENV_TIMEOUT_MS: &str = "SERIAL_TIMEOUT_MS";

pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// Host and port do not resolve to a socket address.
    #[error("Cannot resolve listen address {0}")]
    UnresolvableAddress(String),
}

/// Settings for the serial device and the HTTP listener.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Serial device path.
    pub serial_port: String,
    /// Serial baud rate.
    pub baud_rate: u32,
    /// HTTP listen host.
    pub host: String,
    /// HTTP listen port.
    pub port: u16,
    /// Upper bound on a single serial write.
    pub io_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            serial_port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            io_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl RelayConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_ms: u64 = parse_or(&lookup, ENV_TIMEOUT_MS, DEFAULT_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_TIMEOUT_MS,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            serial_port: lookup(ENV_SERIAL_PORT).unwrap_or(defaults.serial_port),
            baud_rate: parse_or(&lookup, ENV_BAUD_RATE, defaults.baud_rate)?,
            host: lookup(ENV_HOST).unwrap_or(defaults.host),
            port: parse_or(&lookup, ENV_PORT, defaults.port)?,
            io_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Resolve the HTTP listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let target = (self.host.as_str(), self.port);
        target
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ConfigError::UnresolvableAddress(format!("{}:{}", self.host, self.port)))
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
