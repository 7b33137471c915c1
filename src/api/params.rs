//! Query-string parameters of the list endpoint

use crate::dataset::{DatasetParams, SortColumn, SortDirection};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Raw list parameters as they arrive on the query string.
///
/// Empty values (`?page=&keyword=`) count as absent. Values that are present
/// but do not parse (`page=abc`, `sort=id`) fail deserialization, which the
/// handler reports as a validation error. Range problems are not checked
/// here; [`DatasetParams`] clamps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortColumn>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
}

impl ListQuery {
    /// Gather the parameters into normalized dataset parameters
    pub fn to_params(&self) -> DatasetParams {
        let mut builder = DatasetParams::builder()
            .sort(self.sort)
            .direction(self.sort_direction);
        if let Some(page) = self.page {
            builder = builder.page(page);
        }
        if let Some(limit) = self.limit {
            builder = builder.limit(limit);
        }
        if let Some(author_email) = &self.author_email {
            builder = builder.author_email(author_email.as_str());
        }
        if let Some(keyword) = &self.keyword {
            builder = builder.keyword(keyword.as_str());
        }
        if let Some(ingredient) = &self.ingredient {
            builder = builder.ingredient(ingredient.as_str());
        }
        builder.build()
    }

    /// The same query pointed at another page
    pub fn with_page(&self, page: u64) -> Self {
        Self {
            page: Some(page.min(i64::MAX as u64) as i64),
            ..self.clone()
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(query: &str) -> Result<ListQuery, String> {
        let uri: Uri = format!("http://localhost/api/recipes?{query}").parse().unwrap();
        Query::<ListQuery>::try_from_uri(&uri)
            .map(|Query(q)| q)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn test_parses_all_fields() {
        let query = parse(
            "page=2&limit=10&sort=author_email&sort_direction=desc&author_email=a%40b.test&keyword=egg&ingredient=milk",
        )
        .unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.sort, Some(SortColumn::AuthorEmail));
        assert_eq!(query.sort_direction, Some(SortDirection::Desc));
        assert_eq!(query.author_email.as_deref(), Some("a@b.test"));
        assert_eq!(query.keyword.as_deref(), Some("egg"));
        assert_eq!(query.ingredient.as_deref(), Some("milk"));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let query = parse("page=&limit=&sort=&keyword=").unwrap();
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert!(parse("page=abc").is_err());
        assert!(parse("limit=1.5").is_err());
        assert!(parse("sort=id").is_err());
        assert!(parse("sort_direction=sideways").is_err());
    }

    #[test]
    fn test_out_of_range_values_are_accepted_and_clamped() {
        let params = parse("page=-4&limit=500").unwrap().to_params();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn test_serializes_only_present_fields() {
        let query = ListQuery {
            keyword: Some("soup".to_string()),
            sort: Some(SortColumn::Slug),
            ..Default::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"sort": "slug", "keyword": "soup"}));
        assert_eq!(query.with_page(3).page, Some(3));
    }
}
