//! In-memory repository implementations.
//!
//! Used when no `DATABASE_URL` is configured, and by the test suite.
//! Uniqueness constraints (email, slug, category name) are enforced
//! under the write lock, mirroring what the Postgres schema guarantees.
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Category, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CategoryRepository, PostRepository, UserRepository,
};

/// In-memory user store keyed by id, with an email uniqueness check.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|u| u.email == user.email && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint("email already exists".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory post store with a slug uniqueness check.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|p| p.slug == post.slug && p.id != post.id);
        if taken {
            return Err(RepoError::Constraint("slug already exists".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.store.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

/// In-memory category store. `find_or_create` is atomic under the
/// write lock, so concurrent first-time creations of one name resolve
/// to a single record.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    store: RwLock<HashMap<Uuid, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|c| c.name == category.name && c.id != category.id);
        if taken {
            return Err(RepoError::Constraint(
                "category name already exists".to_string(),
            ));
        }
        store.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn find_or_create(
        &self,
        name: &str,
        created_by: Uuid,
    ) -> Result<(Category, bool), RepoError> {
        let mut store = self.store.write().await;
        if let Some(existing) = store.values().find(|c| c.name == name) {
            return Ok((existing.clone(), false));
        }
        let category = Category::new(name.to_string(), created_by);
        store.insert(category.id, category.clone());
        Ok((category, true))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        let store = self.store.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }

    async fn list_by_name(&self) -> Result<Vec<Category>, RepoError> {
        let mut categories: Vec<Category> = self.store.read().await.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let repo = InMemoryUserRepository::new();
        let a = User::new("A".into(), "same@example.com".into(), "h".into());
        let b = User::new("B".into(), "same@example.com".into(), "h".into());

        repo.save(a).await.unwrap();
        let err = repo.save(b).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn updating_a_user_does_not_trip_its_own_email() {
        let repo = InMemoryUserRepository::new();
        let mut user = User::new("A".into(), "a@example.com".into(), "h".into());
        repo.save(user.clone()).await.unwrap();

        user.touch_login();
        let saved = repo.save(user.clone()).await.unwrap();
        assert!(saved.last_login.is_some());
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_constraint_violation() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let a = Post::new(author, "Hello World!".into(), "x".into());
        let b = Post::new(author, "Hello World!".into(), "y".into());

        repo.save(a).await.unwrap();
        let err = repo.save(b).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn list_recent_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let mut older = Post::new(author, "First".into(), "x".into());
        older.created_at = older.created_at - chrono::TimeDelta::minutes(5);
        let newer = Post::new(author, "Second".into(), "y".into());

        repo.save(older).await.unwrap();
        repo.save(newer).await.unwrap();

        let posts = repo.list_recent().await.unwrap();
        assert_eq!(posts[0].slug, "second");
        assert_eq!(posts[1].slug, "first");
    }

    #[tokio::test]
    async fn find_or_create_is_idempotent() {
        let repo = InMemoryCategoryRepository::new();
        let creator = Uuid::new_v4();

        let (first, created) = repo.find_or_create("rust", creator).await.unwrap();
        assert!(created);
        let (second, created) = repo.find_or_create("rust", creator).await.unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(repo.list_by_name().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn categories_list_sorted_by_name() {
        let repo = InMemoryCategoryRepository::new();
        let creator = Uuid::new_v4();
        repo.find_or_create("zig", creator).await.unwrap();
        repo.find_or_create("ada", creator).await.unwrap();
        repo.find_or_create("rust", creator).await.unwrap();

        let names: Vec<String> = repo
            .list_by_name()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["ada", "rust", "zig"]);
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}
