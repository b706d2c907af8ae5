//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup into an explicit struct and
//! threaded into the components that need it; nothing reads the
//! environment after boot.

use std::env;
use std::path::PathBuf;

use quill_infra::JwtConfig;

/// Database pool settings.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Media pipeline settings: remote store target plus local temp area.
#[derive(Debug, Clone)]
pub struct MediaSettings {
    pub bucket: String,
    pub cdn_base_url: String,
    pub temp_dir: PathBuf,
    pub ffmpeg_path: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DbSettings>,
    pub jwt: JwtConfig,
    pub media: MediaSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DbSettings {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        let secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());
        if secret == "change-me-in-production" {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        let jwt = JwtConfig {
            secret,
            expiration_days: env::var("JWT_EXPIRATION_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "quill-api".to_string()),
        };

        let media = MediaSettings {
            bucket: env::var("S3_BUCKET").unwrap_or_else(|_| "quill-media".to_string()),
            cdn_base_url: env::var("CDN_BASE_URL")
                .unwrap_or_else(|_| "https://cdn.quill.local".to_string()),
            temp_dir: env::var("UPLOAD_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt,
            media,
        }
    }
}
