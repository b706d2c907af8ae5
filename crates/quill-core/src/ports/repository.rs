use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find a post by its public slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// All posts, newest first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// Find a category by its natural key.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    /// Return the category named `name`, creating it attributed to
    /// `created_by` if absent. The flag is true when a new record was
    /// created. Implementations must make this an atomic
    /// insert-if-absent so two concurrent first-time creations of the
    /// same name cannot both insert.
    async fn find_or_create(
        &self,
        name: &str,
        created_by: Uuid,
    ) -> Result<(Category, bool), RepoError>;

    /// Resolve a set of category ids, preserving input order for ids
    /// that exist.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError>;

    /// All categories, name ascending.
    async fn list_by_name(&self) -> Result<Vec<Category>, RepoError>;
}
