use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered account. `password` holds the salted digest, never plaintext;
/// `token` is the live opaque session credential, cleared on logout.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
