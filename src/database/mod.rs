pub mod contact_repository;
pub mod manager;
pub mod models;
pub mod user_repository;

pub use contact_repository::ContactRepository;
pub use user_repository::UserRepository;
