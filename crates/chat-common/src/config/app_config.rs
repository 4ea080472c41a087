//! Application configuration structs
//!
//! Everything is read from environment variables (a `.env` file is loaded
//! first when present). Only `DATABASE_URL` and `AUTH_JWT_SECRET` are required.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub socket: SocketConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP listener
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Identity provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret the provider signs session tokens with (HS256)
    pub jwt_secret: String,
    /// Expected `iss` claim, when the provider sets one
    #[serde(default)]
    pub issuer: Option<String>,
    /// Where unauthenticated page requests are redirected
    #[serde(default = "default_sign_in_url")]
    pub sign_in_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Local file storage for uploads
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// URL prefix under which stored files are served
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// Socket-backed message endpoints as the client sees them
#[derive(Debug, Clone, Deserialize)]
pub struct SocketConfig {
    #[serde(default = "default_socket_url")]
    pub messages_url: String,
    /// Capacity of each realtime topic's broadcast buffer
    #[serde(default = "default_topic_capacity")]
    pub topic_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub machine_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "chat-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

fn default_sign_in_url() -> String {
    "/sign-in".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_public_url() -> String {
    "/uploads".to_string()
}

fn default_socket_url() -> String {
    "/api/socket/messages".to_string()
}

fn default_topic_capacity() -> usize {
    256
}

/// Read and parse an optional variable, falling back to `default` when unset
fn parse_or<T: FromStr>(key: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        _ => Ok(default()),
    }
}

fn string_or(key: &'static str, default: impl FnOnce() -> String) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default)
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

fn list(key: &'static str) -> Vec<String> {
    env::var(key)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: string_or("APP_NAME", default_app_name),
                env: parse_or("APP_ENV", Environment::default)?,
            },
            api: ServerConfig {
                host: string_or("API_HOST", default_host),
                port: parse_or("API_PORT", default_port)?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: parse_or("DATABASE_RUN_MIGRATIONS", default_true)?,
            },
            auth: AuthConfig {
                jwt_secret: required("AUTH_JWT_SECRET")?,
                issuer: env::var("AUTH_ISSUER").ok().filter(|s| !s.is_empty()),
                sign_in_url: string_or("AUTH_SIGN_IN_URL", default_sign_in_url),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: list("CORS_ALLOWED_ORIGINS"),
            },
            storage: StorageConfig {
                upload_dir: string_or("UPLOAD_DIR", default_upload_dir),
                public_url: string_or("UPLOAD_PUBLIC_URL", default_public_url),
            },
            socket: SocketConfig {
                messages_url: string_or("SOCKET_URL", default_socket_url),
                topic_capacity: parse_or("SOCKET_TOPIC_CAPACITY", default_topic_capacity)?,
            },
            snowflake: SnowflakeConfig {
                machine_id: parse_or("SNOWFLAKE_MACHINE_ID", || 0)?,
            },
        })
    }

    /// Configuration suitable for tests: local listener, given database and secret
    pub fn for_testing(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            app: AppSettings {
                name: "chat-server-test".to_string(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port: 0,
            },
            database: DatabaseConfig {
                url: database_url.into(),
                max_connections: 5,
                min_connections: 1,
                run_migrations: true,
            },
            auth: AuthConfig {
                jwt_secret: jwt_secret.into(),
                issuer: None,
                sign_in_url: default_sign_in_url(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: 1000,
                burst: 1000,
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            storage: StorageConfig {
                upload_dir: env::temp_dir()
                    .join("chat-server-test-uploads")
                    .to_string_lossy()
                    .into_owned(),
                public_url: default_public_url(),
            },
            socket: SocketConfig {
                messages_url: default_socket_url(),
                topic_capacity: default_topic_capacity(),
            },
            snowflake: SnowflakeConfig { machine_id: 1 },
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
