/// Configuration management for the blog service
///
/// All configuration is loaded from environment variables at startup.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session token configuration
    pub jwt: JwtConfig,
    /// Media upload configuration
    pub media: MediaConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Expected token issuer
    pub issuer: String,
    /// Expected token audience
    pub audience: String,
    /// Token lifetime in minutes; the token service default applies when unset
    pub lifetime_minutes: Option<i64>,
}

/// Media upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory the disk file store writes into
    pub upload_dir: String,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("BLOG_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .map_err(|_| "DATABASE_URL must be set".to_string())?,
                max_connections: std::env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(20),
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "blog-service".to_string()),
                audience: std::env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "blog-clients".to_string()),
                lifetime_minutes: std::env::var("JWT_LIFETIME_MINUTES")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
            media: MediaConfig {
                upload_dir: std::env::var("MEDIA_UPLOAD_DIR")
                    .unwrap_or_else(|_| "uploads".to_string()),
                max_upload_bytes: std::env::var("MEDIA_MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10 * 1024 * 1024),
            },
        })
    }
}
