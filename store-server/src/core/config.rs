use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every knob can be overridden via environment variable:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | data/storefront.db | embedded database directory |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_SECRET | (unset) | secret required to register admin accounts |
/// | LOG_DIR | (unset) | enable daily rolling file logs in this directory |
/// | JWT_SECRET | (dev fallback) | HS256 signing key |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/store.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Embedded database directory
    pub database_path: String,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Secret gating admin registration; unset disables admin registration
    pub admin_secret: Option<String>,
    /// Daily rolling log directory; unset logs to stdout only
    pub log_dir: Option<String>,
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/storefront.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_secret: std::env::var("ADMIN_SECRET").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::default(),
        }
    }

    /// Override database path and port, commonly used in tests
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
