//! Registration and login.

use actix_web::{HttpResponse, web};

use quill_core::domain::User;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn summarize(user: &User) -> UserSummary {
    UserSummary {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if body.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    if body.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    if state.users.find_by_email(&body.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = state.password_service.hash(&body.password)?;
    let mut user = User::new(body.name, body.email, password_hash);
    if let Some(country) = body.country {
        user.country = country;
    }
    if let Some(skills) = body.skills {
        user.skills = skills;
    }
    if let Some(languages) = body.languages {
        user.languages = languages;
    }
    if let Some(avatar_url) = body.avatar_url {
        user.avatar_url = avatar_url;
    }

    // The unique index still backstops a concurrent registration of
    // the same email; the constraint maps to the same 400.
    let user = match state.users.save(user).await {
        Ok(user) => user,
        Err(quill_core::error::RepoError::Constraint(_)) => {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state
        .token_service
        .generate_token(user.id, &user.email, user.role)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".to_string(),
        token,
        user: summarize(&user),
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    let mut user = state
        .users
        .find_by_email(&body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let valid = state
        .password_service
        .verify(&body.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    user.touch_login();
    let user = state.users.save(user).await?;

    let token = state
        .token_service
        .generate_token(user.id, &user.email, user.role)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: summarize(&user),
    }))
}
