//! Server configuration from environment variables
//!
//! | variable             | default        |
//! |----------------------|----------------|
//! | `ORDER_FILE_PATH`    | `orders.jsonl` (`:memory:` disables persistence) |
//! | `MENU_FILE_PATH`     | `menu.json`    |
//! | `HOST`               | `0.0.0.0`      |
//! | `PORT`               | `10000`        |
//! | `STORE_TIMEOUT_MS`   | `5000`         |
//! | `BROADCAST_CAPACITY` | `1024`         |
//! | `STRICT_TRANSITIONS` | `false`        |
//!
//! Relative paths are resolved against the working directory.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::broadcast::DEFAULT_CAPACITY;
use crate::error::{OrderError, OrderResult};
use crate::lifecycle::{LifecycleConfig, TransitionPolicy, DEFAULT_STORE_TIMEOUT};

/// `ORDER_FILE_PATH` value for a store without a backing file
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// `None` keeps orders in memory only
    pub order_file: Option<PathBuf>,
    pub menu_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub store_timeout: Duration,
    pub broadcast_capacity: usize,
    pub strict_transitions: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            order_file: Some(PathBuf::from("orders.jsonl")),
            menu_file: PathBuf::from("menu.json"),
            host: "0.0.0.0".to_string(),
            port: 10000,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            broadcast_capacity: DEFAULT_CAPACITY,
            strict_transitions: false,
        }
    }
}

impl ServerConfig {
    /// Read the process environment
    pub fn from_env() -> OrderResult<Self> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(&current_dir, |key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> OrderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let order_file = match lookup("ORDER_FILE_PATH") {
            Some(path) if path == IN_MEMORY => None,
            Some(path) => Some(resolve(base_dir, &path)),
            None => defaults.order_file.map(|p| resolve(base_dir, &p.to_string_lossy())),
        };
        let menu_file = match lookup("MENU_FILE_PATH") {
            Some(path) => resolve(base_dir, &path),
            None => resolve(base_dir, &defaults.menu_file.to_string_lossy()),
        };

        let store_timeout = match lookup("STORE_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_number("STORE_TIMEOUT_MS", &raw)?),
            None => defaults.store_timeout,
        };

        Ok(Self {
            order_file,
            menu_file,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: match lookup("PORT") {
                Some(raw) => parse_number("PORT", &raw)?,
                None => defaults.port,
            },
            store_timeout,
            broadcast_capacity: match lookup("BROADCAST_CAPACITY") {
                Some(raw) => parse_number("BROADCAST_CAPACITY", &raw)?,
                None => defaults.broadcast_capacity,
            },
            strict_transitions: match lookup("STRICT_TRANSITIONS") {
                Some(raw) => parse_bool("STRICT_TRANSITIONS", &raw)?,
                None => defaults.strict_transitions,
            },
        })
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig {
            store_timeout: self.store_timeout,
            transition_policy: if self.strict_transitions {
                TransitionPolicy::Strict
            } else {
                TransitionPolicy::Permissive
            },
        }
    }
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        base_dir.join(path)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> OrderResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| OrderError::Validation(format!("{} must be a number, got '{}'", key, raw)))
}

fn parse_bool(key: &str, raw: &str) -> OrderResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OrderError::Validation(format!(
            "{} must be true or false, got '{}'",
            key, raw
        ))),
    }
}
