//! Application settings loaded from environment variables.
//!
//! Every setting has a default so the service starts with an empty environment.
//! Numeric values that fail to parse fall back to their default.

use std::time::Duration;

/// Database connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Full connection URL; used over the individual parts when non-empty, unless `SQLite` is selected
    pub url: String,
    /// Host name, or `sqlite` to use a local `SQLite` file named by `name`
    pub host: String,
    /// Server port
    pub port: u16,
    /// Login user
    pub user: String,
    /// Login password
    pub password: String,
    /// Database name, or the `SQLite` file path
    pub name: String,
    /// `PostgreSQL` `sslmode`
    pub ssl_mode: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// Lifetime after which a pooled connection is recycled
    pub max_lifetime: Duration,
}

/// Top-level application settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment environment, reported at startup
    pub environment: String,
    /// TCP port to listen on
    pub port: u16,
    /// Application name, reported at startup
    pub app_name: String,
    /// Database settings
    pub database: DatabaseSettings,
    /// Allowed CORS origins; `*` allows any
    pub cors_allow_origins: Vec<String>,
    /// Default log level when `RUST_LOG` is not set
    pub log_level: String,
    /// `json` for structured output, anything else for human-readable console output
    pub log_format: String,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let parse_or = |key: &str, default: u32| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(default)
        };
        let port_or = |key: &str, default: u16| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u16>().ok())
                .unwrap_or(default)
        };

        Self {
            environment: get("ENV", "development"),
            port: port_or("PORT", 8080),
            app_name: get("APP_NAME", "turning-back"),
            database: DatabaseSettings {
                url: get("DATABASE_URL", ""),
                host: get("DB_HOST", "localhost"),
                port: port_or("DB_PORT", 5432),
                user: get("DB_USER", "turning_back_user"),
                password: get("DB_PASSWORD", "turning_back_pass"),
                name: get("DB_NAME", "turning_back_db"),
                ssl_mode: get("DB_SSL_MODE", "disable"),
                max_connections: parse_or("DB_MAX_CONNECTIONS", 100),
                min_connections: parse_or("DB_MIN_CONNECTIONS", 10),
                max_lifetime: Duration::from_secs(60 * 60),
            },
            cors_allow_origins: get("CORS_ALLOW_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            log_level: get("LOG_LEVEL", "info"),
            log_format: get("LOG_FORMAT", "json"),
        }
    }
}

impl DatabaseSettings {
    /// Resolves the connection URL handed to `SeaORM`.
    ///
    /// `DB_HOST=sqlite` selects a local file and `DB_NAME=:memory:` an in-memory
    /// database, ignoring `DATABASE_URL`; otherwise `DATABASE_URL` wins over a
    /// `PostgreSQL` URL assembled from the parts.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if self.name == ":memory:" {
            return "sqlite::memory:".to_string();
        }
        if self.host == "sqlite" {
            return format!("sqlite://{}?mode=rwc", self.name);
        }
        if !self.url.is_empty() {
            return self.url.clone();
        }

        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user, self.password, self.host, self.port, self.name, self.ssl_mode
        )
    }
}
