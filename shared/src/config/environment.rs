//! Environment configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Get environment from ENV variable
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .or_else(|_| env::var("RUST_ENV"))
            .unwrap_or_else(|_| String::from("development"))
            .parse()
            .unwrap_or(Environment::Development)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default log filter (trace, debug, info, warn, error) when `RUST_LOG` is unset
    pub level: String,

    /// Log actix access lines for every request
    #[serde(default = "default_access_log")]
    pub access_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            access_log: default_access_log(),
        }
    }
}

impl LoggingConfig {
    /// Create logging config for environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                access_log: true,
            },
            Environment::Staging | Environment::Production => Self {
                level: String::from("info"),
                access_log: true,
            },
        }
    }

    /// Environment defaults, overridden by `LOG_LEVEL` and `ACCESS_LOG`
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::for_environment(env);
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or(defaults.level),
            access_log: super::env_or("ACCESS_LOG", defaults.access_log),
        }
    }
}

fn default_access_log() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_logging_for_environment() {
        assert_eq!(LoggingConfig::for_environment(Environment::Development).level, "debug");
        assert_eq!(LoggingConfig::for_environment(Environment::Production).level, "info");
    }
}
