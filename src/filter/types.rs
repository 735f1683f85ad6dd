use crate::config;

/// A rendered SQL statement plus its positional bind parameters
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}

/// Optional substring filters for contact search. A `None` or blank value
/// imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A normalised page request: 1-based page number and a bounded page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    /// Normalise raw query parameters: page defaults to 1 and is never below
    /// 1, size defaults to the configured page size and is clamped to the
    /// configured maximum.
    pub fn from_params(page: Option<i64>, size: Option<i64>) -> Self {
        let pagination = &config::config().pagination;
        Self {
            number: page.unwrap_or(1).max(1),
            size: size
                .unwrap_or(pagination.default_size)
                .clamp(1, pagination.max_size),
        }
    }

    pub fn offset(&self) -> i64 {
        // Saturate so an absurd page number stays a valid (empty) page
        (self.number - 1).saturating_mul(self.size)
    }
}
