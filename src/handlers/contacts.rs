use axum::{
    extract::{Path, Query},
    Extension, Json,
};

use crate::database::models::{ContactData, User};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{ContactPayload, ContactService, SearchParams};

/// POST /api/contacts - create a contact owned by the caller
pub async fn contact_create(
    Extension(user): Extension<User>,
    Json(payload): Json<ContactPayload>,
) -> ApiResult<ContactData> {
    let service = ContactService::new().await?;
    let contact = service.create(&user, payload).await?;
    Ok(ApiResponse::created(contact))
}

/// GET /api/contacts/:id - show one of the caller's contacts
pub async fn contact_get(
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> ApiResult<ContactData> {
    let service = ContactService::new().await?;
    let contact = service.get(&user, id).await?;
    Ok(ApiResponse::success(contact))
}

/// PUT /api/contacts/:id - partial overwrite of a contact's fields
pub async fn contact_update(
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<ContactPayload>,
) -> ApiResult<ContactData> {
    let service = ContactService::new().await?;
    let contact = service.update(&user, id, payload).await?;
    Ok(ApiResponse::success(contact))
}

/// DELETE /api/contacts/:id - hard delete
pub async fn contact_delete(
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> ApiResult<bool> {
    let service = ContactService::new().await?;
    service.delete(&user, id).await?;
    Ok(ApiResponse::success(true))
}

/// GET /api/contacts - filtered, paginated search over the caller's contacts
pub async fn contact_search(
    Extension(user): Extension<User>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<ContactData>> {
    let service = ContactService::new().await?;
    let (contacts, meta) = service.search(&user, params).await?;
    Ok(ApiResponse::paginated(contacts, meta))
}
