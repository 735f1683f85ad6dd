use serde_json::Value;
use sqlx::{postgres::PgArguments, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::database::models::{Contact, ContactFields};
use crate::filter::{ContactQuery, Page, SearchFilters};

/// Accessor for the `contacts` table. Every operation is scoped by the owning
/// user id; a contact belonging to another user is indistinguishable from a
/// missing row.
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_owned(
        &self,
        owner_id: i64,
        id: i64,
    ) -> Result<Option<Contact>, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            "SELECT * FROM \"contacts\" WHERE \"id\" = $1 AND \"user_id\" = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contact)
    }

    pub async fn insert(
        &self,
        owner_id: i64,
        fields: ContactFields,
    ) -> Result<Contact, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO \"contacts\" (\"first_name\", \"last_name\", \"email\", \"phone\", \"user_id\") \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(fields.first_name)
        .bind(fields.last_name)
        .bind(fields.email)
        .bind(fields.phone)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(contact)
    }

    /// Overwrite a contact's fields. The caller merges the update payload with
    /// the stored row first, so unspecified fields keep their prior values.
    pub async fn update(
        &self,
        contact: &Contact,
        fields: ContactFields,
    ) -> Result<Contact, DatabaseError> {
        let updated = sqlx::query_as::<_, Contact>(
            "UPDATE \"contacts\" SET \"first_name\" = $1, \"last_name\" = $2, \"email\" = $3, \
             \"phone\" = $4, \"updated_at\" = now() \
             WHERE \"id\" = $5 AND \"user_id\" = $6 RETURNING *",
        )
        .bind(fields.first_name)
        .bind(fields.last_name)
        .bind(fields.email)
        .bind(fields.phone)
        .bind(contact.id)
        .bind(contact.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, contact: &Contact) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM \"contacts\" WHERE \"id\" = $1 AND \"user_id\" = $2")
            .bind(contact.id)
            .bind(contact.user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Filtered, paginated search plus the total matching count
    pub async fn search(
        &self,
        owner_id: i64,
        filters: SearchFilters,
        page: Page,
    ) -> Result<(Vec<Contact>, i64), DatabaseError> {
        let query = ContactQuery::new(owner_id, filters, page);

        let select = query.to_select_sql();
        let mut q = sqlx::query_as::<_, Contact>(&select.query);
        for p in select.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let items = q.fetch_all(&self.pool).await?;

        let count = query.to_count_sql();
        let mut q = sqlx::query(&count.query);
        for p in count.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(&self.pool).await?;
        let total: i64 = row.try_get("count")?;

        Ok((items, total))
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        other => q.bind(other.to_string()),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        other => q.bind(other.to_string()),
    }
}
