pub mod contact;
pub mod user;

pub use contact::{Contact, ContactData, ContactFields};
pub use user::User;
