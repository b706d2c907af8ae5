use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::slugify;

/// Post entity - a blog article with a globally unique slug.
///
/// The author reference is immutable; categories are referenced by id,
/// never embedded, so a category outlives any single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Rich text HTML.
    pub content: String,
    pub cover_image: Option<String>,
    pub video_url: Option<String>,
    pub tags: Vec<String>,
    pub category_ids: Vec<Uuid>,
    pub language: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Maximum accepted title length.
pub const MAX_TITLE_LEN: usize = 150;

impl Post {
    /// Create a new post, deriving the slug from the title.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        let slug = slugify(&title);
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            content,
            cover_image: None,
            video_url: None,
            tags: Vec::new(),
            category_ids: Vec::new(),
            language: "en".to_string(),
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` with `role` may mutate this post (owner-or-admin).
    pub fn can_be_modified_by(&self, user_id: Uuid, role: super::Role) -> bool {
        self.author_id == user_id || role == super::Role::Admin
    }

    /// Apply a shallow-merge patch. Returns true if the title changed,
    /// in which case the slug has been re-derived and the caller must
    /// re-check slug uniqueness against the store.
    pub fn apply(&mut self, patch: PostPatch) -> bool {
        let mut retitled = false;
        if let Some(title) = patch.title {
            if title != self.title {
                self.slug = slugify(&title);
                retitled = true;
            }
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = Some(cover_image);
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = Some(video_url);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        self.updated_at = Utc::now();
        retitled
    }
}

/// Partial update for a post. `None` means "field not supplied: keep the
/// prior value"; `Some` overwrites. Category names are handled separately
/// by the caller because they go through find-or-create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub video_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub language: Option<String>,
}
