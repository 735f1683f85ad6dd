use axum::{Extension, Json};

use crate::database::models::User;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{LoginRequest, RegisterRequest, UserBody, UserService};

/// POST /api/users - register a new account
pub async fn user_register(Json(req): Json<RegisterRequest>) -> ApiResult<UserBody> {
    let service = UserService::new().await?;
    let body = service.register(req).await?;
    Ok(ApiResponse::created(body))
}

/// POST /api/users/login - exchange credentials for a session token
pub async fn user_login(Json(req): Json<LoginRequest>) -> ApiResult<UserBody> {
    let service = UserService::new().await?;
    let body = service.login(req).await?;
    Ok(ApiResponse::success(body))
}

/// GET /api/users/current - echo the authenticated user
pub async fn user_current(Extension(user): Extension<User>) -> ApiResult<UserBody> {
    Ok(ApiResponse::success(UserBody::from(&user)))
}

/// DELETE /api/users/logout - invalidate the current session token
pub async fn user_logout(Extension(user): Extension<User>) -> ApiResult<bool> {
    let service = UserService::new().await?;
    service.logout(&user).await?;
    Ok(ApiResponse::success(true))
}
