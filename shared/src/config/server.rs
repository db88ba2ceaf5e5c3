//! Server configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Additional allowed origins besides browser-extension schemes
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            allowed_origins,
            max_age: env_or("CORS_MAX_AGE", default_max_age()),
        }
    }
}

fn default_max_age() -> usize {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
