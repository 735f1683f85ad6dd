use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A contact row. Always owned by exactly one user; every query against this
/// table is scoped by `user_id`.
#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field values ready for insert or update
#[derive(Debug, Clone)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The contact shape exposed over the API
#[derive(Debug, Clone, Serialize)]
pub struct ContactData {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactData {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}
