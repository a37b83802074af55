/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `DATABASE_URL`: PostgreSQL connection string (optional; members are
///   kept in memory when unset)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `HOBBY_CATALOG_PATH`: Hobby catalog file (optional; built-in catalog
///   when unset)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use members_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration, if a database is configured
    pub database: Option<DatabaseConfig>,

    /// Hobby catalog file, if overriding the built-in catalog
    pub hobby_catalog_path: Option<PathBuf>,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins ("*" allows any)
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable has an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let database = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse::<u32>()?;

                if max_connections == 0 {
                    anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
                }

                Some(DatabaseConfig {
                    url,
                    max_connections,
                })
            }
            _ => None,
        };

        let hobby_catalog_path = env::var("HOBBY_CATALOG_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database,
            hobby_catalog_path,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

impl Default for Config {
    /// Local development settings: in-memory store, built-in catalog
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: None,
            hobby_catalog_path: None,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: Some(DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            }),
            hobby_catalog_path: None,
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
    }
}
