//! SQL fragments for dataset filtering

use rusqlite::types::Value;

/// Escape character used in every `LIKE ... ESCAPE` clause
pub const LIKE_ESCAPE: char = '\\';

/// Escape `%`, `_` and the escape character itself so user input matches literally
pub fn escape_like_wildcards(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `%input%` with wildcards in `input` escaped
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like_wildcards(input))
}

/// Accumulates `WHERE` conditions and their positional parameters in order
#[derive(Debug, Default)]
pub struct WhereClause {
    conditions: Vec<String>,
    params: Vec<Value>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one condition; `params` must match its `?` placeholders in order
    pub fn push(&mut self, condition: impl Into<String>, params: impl IntoIterator<Item = Value>) {
        self.conditions.push(condition.into());
        self.params.extend(params);
    }

    /// ` WHERE a AND b`, or an empty string when there are no conditions
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like_wildcards("plain"), "plain");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("egg"), "%egg%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
    }

    #[test]
    fn test_where_clause_joins_conditions() {
        let mut clause = WhereClause::new();
        assert_eq!(clause.to_sql(), "");

        clause.push("r.author_email = ?", [Value::Text("a@test".into())]);
        clause.push("r.name LIKE ?", [Value::Text("%x%".into())]);
        assert_eq!(clause.to_sql(), " WHERE r.author_email = ? AND r.name LIKE ?");
        assert_eq!(clause.params().len(), 2);
    }
}
