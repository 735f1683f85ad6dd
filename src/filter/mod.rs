pub mod contact_query;
pub mod types;

pub use contact_query::ContactQuery;
pub use types::{Page, SearchFilters, SqlResult};
