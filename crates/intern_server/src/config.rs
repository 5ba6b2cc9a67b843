//! Process configuration loaded from environment variables.
//!
//! Every variable has a default; present-but-invalid values are errors.

use intern_core::default_log_level;
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "data/interns.json";
const DEFAULT_LOG_SUBDIR: &str = "logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} value `{}`: {}", self.key, self.value, self.reason)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: String,
    pub environment: Environment,
    /// Passed straight through to dashboard metrics.
    pub interviews_scheduled: u32,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(|key| env::var(key).ok(), &cwd)
    }

    /// Builds config from an arbitrary key lookup; relative paths resolve
    /// against `cwd`.
    pub fn from_lookup<F>(lookup: F, cwd: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = match read("INTERN_HOST") {
            Some(value) => value.parse().map_err(|_| ConfigError {
                key: "INTERN_HOST",
                value,
                reason: "expected an IP address",
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let (port_key, port_value) = match read("INTERN_PORT") {
            Some(value) => ("INTERN_PORT", Some(value)),
            None => ("PORT", read("PORT")),
        };
        let port = match port_value {
            Some(value) => value.parse().map_err(|_| ConfigError {
                key: port_key,
                value,
                reason: "expected a port number",
            })?,
            None => DEFAULT_PORT,
        };

        let data_file = resolve(
            cwd,
            read("INTERN_DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
        );
        let log_dir = resolve(
            cwd,
            read("INTERN_LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_SUBDIR.to_string()),
        );
        let log_level = read("INTERN_LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string());

        let environment = match read("INTERN_ENV") {
            Some(value) => Environment::parse(&value).ok_or(ConfigError {
                key: "INTERN_ENV",
                value,
                reason: "expected development or production",
            })?,
            None => Environment::Development,
        };

        let interviews_scheduled = match read("INTERN_INTERVIEWS_SCHEDULED") {
            Some(value) => value.parse().map_err(|_| ConfigError {
                key: "INTERN_INTERVIEWS_SCHEDULED",
                value,
                reason: "expected a non-negative integer",
            })?,
            None => 0,
        };

        Ok(Self {
            host,
            port,
            data_file,
            log_dir,
            log_level,
            environment,
            interviews_scheduled,
        })
    }
}

fn resolve(cwd: &Path, value: String) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{Environment, ServerConfig};
    use std::collections::HashMap;
    use std::path::Path;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, super::ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned(), Path::new("/srv/app"))
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.data_file, Path::new("/srv/app/data/interns.json"));
        assert_eq!(config.log_dir, Path::new("/srv/app/logs"));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.interviews_scheduled, 0);
    }

    #[test]
    fn port_falls_back_to_generic_variable() {
        assert_eq!(config_from(&[("PORT", "8080")]).unwrap().port, 8080);
        let config = config_from(&[("PORT", "8080"), ("INTERN_PORT", "9090")]).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn invalid_values_are_reported_with_their_key() {
        let err = config_from(&[("INTERN_PORT", "http")]).unwrap_err();
        assert_eq!(err.key, "INTERN_PORT");

        let err = config_from(&[("INTERN_ENV", "staging")]).unwrap_err();
        assert_eq!(err.key, "INTERN_ENV");

        let err = config_from(&[("INTERN_INTERVIEWS_SCHEDULED", "-3")]).unwrap_err();
        assert_eq!(err.key, "INTERN_INTERVIEWS_SCHEDULED");
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = config_from(&[
            ("INTERN_DATA_FILE", "/var/lib/interns.json"),
            ("INTERN_ENV", "Production"),
        ])
        .unwrap();
        assert_eq!(config.data_file, Path::new("/var/lib/interns.json"));
        assert_eq!(config.environment, Environment::Production);
    }
}
