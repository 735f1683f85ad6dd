use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Contact, ContactData, ContactFields, User};
use crate::database::ContactRepository;
use crate::error::ApiError;
use crate::filter::{Page, SearchFilters};
use crate::middleware::response::PageMeta;
use crate::validation::Violations;

/// Create/update payload. Fields left out of an update keep their stored
/// values (partial overwrite).
#[derive(Debug, Default, Deserialize)]
pub struct ContactPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Search query parameters: optional substring filters plus pagination
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Owner-scoped contact CRUD and search
pub struct ContactService {
    contacts: ContactRepository,
}

impl ContactService {
    pub async fn new() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self {
            contacts: ContactRepository::new(pool),
        })
    }

    pub async fn create(&self, owner: &User, data: ContactPayload) -> Result<ContactData, ApiError> {
        contact_rules(&data)?;
        let contact = self.contacts.insert(owner.id, fields_from(&data, None)).await?;
        Ok(contact.into())
    }

    pub async fn get(&self, owner: &User, id: i64) -> Result<ContactData, ApiError> {
        Ok(self.resolve_owned(owner, id).await?.into())
    }

    pub async fn update(
        &self,
        owner: &User,
        id: i64,
        data: ContactPayload,
    ) -> Result<ContactData, ApiError> {
        // Validation runs before the ownership lookup, so an invalid payload
        // reports 400 even when the id would have been a 404
        contact_rules(&data)?;
        let existing = self.resolve_owned(owner, id).await?;
        let contact = self
            .contacts
            .update(&existing, fields_from(&data, Some(&existing)))
            .await?;
        Ok(contact.into())
    }

    pub async fn delete(&self, owner: &User, id: i64) -> Result<(), ApiError> {
        let existing = self.resolve_owned(owner, id).await?;
        self.contacts.delete(&existing).await?;
        Ok(())
    }

    pub async fn search(
        &self,
        owner: &User,
        params: SearchParams,
    ) -> Result<(Vec<ContactData>, PageMeta), ApiError> {
        let page = Page::from_params(params.page, params.size);
        let filters = SearchFilters {
            name: params.name,
            email: params.email,
            phone: params.phone,
        };

        let (items, total) = self.contacts.search(owner.id, filters, page).await?;
        let meta = PageMeta::new(total, &page);
        Ok((items.into_iter().map(Into::into).collect(), meta))
    }

    /// Shared ownership-scoped lookup for get/update/delete. A contact owned
    /// by another user yields the same `not found` as a missing id.
    async fn resolve_owned(&self, owner: &User, id: i64) -> Result<Contact, ApiError> {
        self.contacts
            .find_owned(owner.id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("not found"))
    }
}

fn contact_rules(data: &ContactPayload) -> Result<(), ApiError> {
    let mut v = Violations::new();
    v.require("first_name", data.first_name.as_deref());
    v.max_length("first_name", data.first_name.as_deref(), 100);
    v.max_length("last_name", data.last_name.as_deref(), 100);
    v.email("email", data.email.as_deref());
    v.max_length("email", data.email.as_deref(), 200);
    v.max_length("phone", data.phone.as_deref(), 20);
    v.finish()
}

/// Merge a validated payload with the stored row (if any): provided fields
/// replace stored values, absent fields retain them.
fn fields_from(data: &ContactPayload, existing: Option<&Contact>) -> ContactFields {
    ContactFields {
        first_name: data.first_name.clone().unwrap_or_default(),
        last_name: data
            .last_name
            .clone()
            .or_else(|| existing.and_then(|c| c.last_name.clone())),
        email: data
            .email
            .clone()
            .or_else(|| existing.and_then(|c| c.email.clone())),
        phone: data
            .phone
            .clone()
            .or_else(|| existing.and_then(|c| c.phone.clone())),
    }
}
