use serde_json::{json, Value};

use super::types::{Page, SearchFilters, SqlResult};

/// Builds the owner-scoped contact search SQL. The query starts from the
/// unconstrained owner scope and conjoins one predicate per present filter:
///
/// - `name` matches `first_name` OR `last_name` (case-insensitive contains)
/// - `email` and `phone` each match their column, ANDed with the rest
///
/// Results are ordered by `id` ascending so pagination is deterministic.
pub struct ContactQuery {
    owner_id: i64,
    filters: SearchFilters,
    page: Page,
}

impl ContactQuery {
    pub fn new(owner_id: i64, filters: SearchFilters, page: Page) -> Self {
        Self {
            owner_id,
            filters,
            page,
        }
    }

    pub fn to_select_sql(&self) -> SqlResult {
        let (where_clause, params) = self.where_sql();
        let query = format!(
            "SELECT * FROM \"contacts\" WHERE {} ORDER BY \"id\" ASC LIMIT {} OFFSET {}",
            where_clause,
            self.page.size,
            self.page.offset()
        );
        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = self.where_sql();
        let query = format!(
            "SELECT COUNT(*) AS count FROM \"contacts\" WHERE {}",
            where_clause
        );
        SqlResult { query, params }
    }

    fn where_sql(&self) -> (String, Vec<Value>) {
        let mut params = ParamList::new();
        let mut conditions = vec![format!("\"user_id\" = {}", params.push(json!(self.owner_id)))];

        if let Some(name) = present(&self.filters.name) {
            let pattern = contains_pattern(name);
            conditions.push(format!(
                "(\"first_name\" ILIKE {} OR \"last_name\" ILIKE {})",
                params.push(json!(pattern.clone())),
                params.push(json!(pattern))
            ));
        }

        if let Some(email) = present(&self.filters.email) {
            conditions.push(format!(
                "\"email\" ILIKE {}",
                params.push(json!(contains_pattern(email)))
            ));
        }

        if let Some(phone) = present(&self.filters.phone) {
            conditions.push(format!(
                "\"phone\" ILIKE {}",
                params.push(json!(contains_pattern(phone)))
            ));
        }

        (conditions.join(" AND "), params.values)
    }
}

/// Numbered `$n` placeholder allocator
struct ParamList {
    values: Vec<Value>,
}

impl ParamList {
    fn new() -> Self {
        Self { values: vec![] }
    }

    fn push(&mut self, value: Value) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }
}

/// A filter only applies when it carries a non-blank value
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Wrap a needle in `%...%`, escaping LIKE metacharacters so user input is
/// matched literally
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
