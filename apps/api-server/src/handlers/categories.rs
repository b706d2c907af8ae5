//! Category listing and creation.

use actix_web::{HttpResponse, web};

use quill_core::domain::Category;
use quill_shared::dto::{CategoryEnvelope, CategoryView, CreateCategoryRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn view(category: Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        created_by: category.created_by,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list_by_name().await?;
    let out: Vec<CategoryView> = categories.into_iter().map(view).collect();
    Ok(HttpResponse::Ok().json(out))
}

/// POST /api/categories
///
/// Find-or-create: a name that already exists answers 200 with the
/// existing record rather than an error.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Category name required".to_string()));
    }

    let (category, created) = state
        .categories
        .find_or_create(name, identity.user_id)
        .await?;

    let envelope = CategoryEnvelope {
        message: if created {
            "Category created".to_string()
        } else {
            "Already exists".to_string()
        },
        category: view(category),
    };

    if created {
        tracing::info!(name = %envelope.category.name, "category created");
        Ok(HttpResponse::Created().json(envelope))
    } else {
        Ok(HttpResponse::Ok().json(envelope))
    }
}
