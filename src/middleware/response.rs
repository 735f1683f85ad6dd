use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::filter::Page;

/// Wrapper for API responses that adds the `{"data": ...}` envelope, plus a
/// `meta` object for paginated listings
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: Option<PageMeta>,
    pub status_code: Option<StatusCode>,
}

/// Pagination metadata describing the full result set and the returned page
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub last_page: i64,
}

impl PageMeta {
    pub fn new(total: i64, page: &Page) -> Self {
        Self {
            total,
            current_page: page.number,
            per_page: page.size,
            last_page: ((total + page.size - 1) / page.size).max(1),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            meta: None,
            status_code: None, // Default to 200 OK
        }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self {
            data,
            meta: None,
            status_code: Some(StatusCode::CREATED),
        }
    }

    /// Create a paginated listing response with metadata
    pub fn paginated(data: T, meta: PageMeta) -> Self {
        Self {
            data,
            meta: Some(meta),
            status_code: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "errors": { "message": ["internal server error"] } })),
                )
                    .into_response();
            }
        };

        let envelope = match self.meta {
            Some(meta) => json!({ "data": data_value, "meta": meta }),
            None => json!({ "data": data_value }),
        };

        (status, Json(envelope)).into_response()
    }
}

/// Convenience result alias for handlers
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
