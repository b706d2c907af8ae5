//! Post CRUD.
//!
//! Slugs are derived from titles and globally unique; a title whose
//! slug collides with an existing post is rejected, on create and on
//! retitle alike. Mutations require the owner or an admin.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{MAX_TITLE_LEN, Post, PostPatch};
use quill_shared::dto::{
    AuthorSummary, CategorySummary, CreatePostRequest, MessageResponse, PostEnvelope, PostResponse,
    UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const SLUG_TAKEN: &str = "A post with a similar title exists. Use a different title.";

async fn to_response(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| AuthorSummary {
            id: u.id,
            name: u.name,
            email: u.email,
        });

    let categories = state
        .categories
        .find_many(&post.category_ids)
        .await?
        .into_iter()
        .map(|c| CategorySummary {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        cover_image: post.cover_image,
        video_url: post.video_url,
        tags: post.tags,
        categories,
        language: post.language,
        author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    })
}

/// Resolve category names to ids, creating missing ones attributed to
/// the requesting user. Blank names are skipped, duplicates collapse.
async fn resolve_categories(
    state: &AppState,
    names: Vec<String>,
    created_by: Uuid,
) -> AppResult<Vec<Uuid>> {
    let mut ids = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let (category, _) = state.categories.find_or_create(name, created_by).await?;
        if !ids.contains(&category.id) {
            ids.push(category.id);
        }
    }
    Ok(ids)
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(AppError::BadRequest(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let mut out = Vec::with_capacity(posts.len());
    for post in posts {
        out.push(to_response(&state, post).await?);
    }
    Ok(HttpResponse::Ok().json(out))
}

/// GET /api/posts/{slug}
pub async fn get_by_slug(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(HttpResponse::Ok().json(to_response(&state, post).await?))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    validate_title(&body.title)?;
    if body.content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }

    let mut post = Post::new(identity.user_id, body.title, body.content);
    if state.posts.find_by_slug(&post.slug).await?.is_some() {
        return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
    }

    post.cover_image = body.cover_image;
    post.video_url = body.video_url;
    if let Some(tags) = body.tags {
        post.tags = tags;
    }
    if let Some(language) = body.language {
        post.language = language;
    }
    if let Some(names) = body.categories {
        post.category_ids = resolve_categories(&state, names, identity.user_id).await?;
    }

    let post = match state.posts.save(post).await {
        Ok(post) => post,
        Err(quill_core::error::RepoError::Constraint(_)) => {
            return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(post_id = %post.id, slug = %post.slug, "post created");

    Ok(HttpResponse::Created().json(PostEnvelope {
        message: "Post created".to_string(),
        post: to_response(&state, post).await?,
    }))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let id = id.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !post.can_be_modified_by(identity.user_id, identity.role) {
        return Err(AppError::Forbidden(
            "You are not authorized to update this post".to_string(),
        ));
    }

    if let Some(title) = &body.title {
        validate_title(title)?;
    }

    let retitled = post.apply(PostPatch {
        title: body.title,
        content: body.content,
        cover_image: body.cover_image,
        video_url: body.video_url,
        tags: body.tags,
        language: body.language,
    });

    // A retitle re-derives the slug, so it must be re-checked against
    // every other post.
    if retitled {
        if let Some(existing) = state.posts.find_by_slug(&post.slug).await? {
            if existing.id != post.id {
                return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
            }
        }
    }

    // An absent or empty category list keeps the prior set.
    if let Some(names) = body.categories {
        if !names.is_empty() {
            post.category_ids = resolve_categories(&state, names, identity.user_id).await?;
        }
    }

    let post = match state.posts.save(post).await {
        Ok(post) => post,
        Err(quill_core::error::RepoError::Constraint(_)) => {
            return Err(AppError::Conflict(SLUG_TAKEN.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(post_id = %post.id, "post updated");

    Ok(HttpResponse::Ok().json(PostEnvelope {
        message: "Post updated".to_string(),
        post: to_response(&state, post).await?,
    }))
}

/// DELETE /api/posts/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !post.can_be_modified_by(identity.user_id, identity.role) {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this post".to_string(),
        ));
    }

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}
