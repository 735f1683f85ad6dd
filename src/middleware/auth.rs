use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::database::UserRepository;
use crate::error::ApiError;

/// Authentication middleware: resolves the opaque Authorization token to its
/// owning user and injects the [`User`] as a request extension.
///
/// A missing header and a token matching no live session are reported
/// identically, as a 401 `Unauthorized`.
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        extract_token_from_headers(&headers).ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    let pool = DatabaseManager::pool().await?;
    let user: User = UserRepository::new(pool)
        .find_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extract the opaque token from the Authorization header. Accepts the bare
/// token or the `Bearer <token>` form.
fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_bare_and_bearer_tokens() {
        assert_eq!(
            extract_token_from_headers(&headers_with("abc123")),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_token_from_headers(&headers_with("Bearer abc123")),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn rejects_missing_or_empty_tokens() {
        assert_eq!(extract_token_from_headers(&HeaderMap::new()), None);
        assert_eq!(extract_token_from_headers(&headers_with("Bearer ")), None);
        assert_eq!(extract_token_from_headers(&headers_with("   ")), None);
    }
}
