use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

/// Accessor for the `users` table
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM \"users\" WHERE \"username\" = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Resolve a live session token to its user. Returns None for tokens that
    /// match no row, including tokens invalidated by logout.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM \"users\" WHERE \"token\" = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO \"users\" (\"username\", \"password\", \"name\") \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(username)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Store a fresh session token, or clear it with None on logout
    pub async fn set_token(&self, user_id: i64, token: Option<&str>) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE \"users\" SET \"token\" = $1, \"updated_at\" = now() WHERE \"id\" = $2")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
