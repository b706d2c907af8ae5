//! Application state - shared across all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use quill_core::ports::{
    CategoryRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use quill_infra::media::{ImageProcessor, S3ObjectStore, S3StoreConfig, VideoTranscoder};
use quill_infra::{
    Argon2PasswordService, InMemoryCategoryRepository, InMemoryPostRepository,
    InMemoryUserRepository, JwtTokenService, MediaPipeline,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
    pub pipeline: Arc<MediaPipeline>,
    pub temp_dir: PathBuf,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (users, posts, categories) = Self::build_repositories(config).await;

        let token_service: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(config.jwt.clone()));
        let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let store = S3ObjectStore::from_env(S3StoreConfig {
            bucket: config.media.bucket.clone(),
            cdn_base_url: config.media.cdn_base_url.clone(),
        })
        .await;
        let pipeline = Arc::new(MediaPipeline::new(
            Arc::new(store),
            ImageProcessor::default(),
            VideoTranscoder::new(config.media.ffmpeg_path.clone()),
        ));

        if let Err(e) = tokio::fs::create_dir_all(&config.media.temp_dir).await {
            tracing::error!("Failed to create upload temp dir: {}", e);
        }

        tracing::info!("Application state initialized");

        Self {
            users,
            posts,
            categories,
            token_service,
            password_service,
            pipeline,
            temp_dir: config.media.temp_dir.clone(),
        }
    }

    #[cfg(feature = "postgres")]
    async fn build_repositories(
        config: &AppConfig,
    ) -> (
        Arc<dyn UserRepository>,
        Arc<dyn PostRepository>,
        Arc<dyn CategoryRepository>,
    ) {
        use quill_infra::database::{
            DatabaseConfig, DatabaseConnections, PostgresCategoryRepository,
            PostgresPostRepository, PostgresUserRepository,
        };

        if let Some(db) = &config.database {
            let db_config = DatabaseConfig {
                url: db.url.clone(),
                max_connections: db.max_connections,
                min_connections: db.min_connections,
            };
            match DatabaseConnections::init(&db_config).await {
                Ok(connections) => {
                    let conn = connections.main;
                    return (
                        Arc::new(PostgresUserRepository::new(conn.clone())),
                        Arc::new(PostgresPostRepository::new(conn.clone())),
                        Arc::new(PostgresCategoryRepository::new(conn)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        Self::in_memory_repositories()
    }

    #[cfg(not(feature = "postgres"))]
    async fn build_repositories(
        _config: &AppConfig,
    ) -> (
        Arc<dyn UserRepository>,
        Arc<dyn PostRepository>,
        Arc<dyn CategoryRepository>,
    ) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory_repositories()
    }

    fn in_memory_repositories() -> (
        Arc<dyn UserRepository>,
        Arc<dyn PostRepository>,
        Arc<dyn CategoryRepository>,
    ) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryCategoryRepository::new()),
        )
    }
}
