pub mod contact_service;
pub mod user_service;

pub use contact_service::{ContactPayload, ContactService, SearchParams};
pub use user_service::{LoginRequest, RegisterRequest, UserBody, UserService};
