//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains database repositories, authentication services,
//! and the media upload pipeline.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory repositories only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `media` - Image/video transformation and S3-backed object storage

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "media")]
pub mod media;

// Re-exports - In-Memory
pub use database::{InMemoryCategoryRepository, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "media")]
pub use media::{MediaError, MediaPipeline, TempUpload, UploadKind};
