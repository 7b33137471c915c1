//! The filtered, sorted, paginated view of recipes behind the list endpoint.
//!
//! Request parameters are gathered once into an immutable [`DatasetParams`]
//! through [`DatasetParamsBuilder`], which normalizes out-of-range values,
//! and then handed to [`paginate`], which composes the query.

pub mod sql;

use crate::db::recipes::{load_children, recipe_from_row, RECIPE_COLUMNS};
use crate::db::UNICODE_LOWER;
use crate::error::Result;
use crate::model::Recipe;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use self::sql::{contains_pattern, WhereClause};

/// Largest page size a caller can ask for; also the default
pub const MAX_LIMIT: u32 = 25;

/// Columns the dataset can be sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    Name,
    Description,
    AuthorEmail,
    Slug,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Name,
        SortColumn::Description,
        SortColumn::AuthorEmail,
        SortColumn::Slug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Description => "description",
            SortColumn::AuthorEmail => "author_email",
            SortColumn::Slug => "slug",
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortColumn::Name),
            "description" => Ok(SortColumn::Description),
            "author_email" => Ok(SortColumn::AuthorEmail),
            "slug" => Ok(SortColumn::Slug),
            _ => Err(format!("Invalid sort column: {s}")),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {s}")),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized dataset parameters.
///
/// Always holds `page >= 1`, `1 <= limit <= MAX_LIMIT`, and filters that are
/// either `None` or non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetParams {
    page: u64,
    limit: u32,
    sort: SortColumn,
    direction: SortDirection,
    author_email: Option<String>,
    keyword: Option<String>,
    ingredient: Option<String>,
}

impl Default for DatasetParams {
    fn default() -> Self {
        DatasetParamsBuilder::default().build()
    }
}

impl DatasetParams {
    /// Creates a new builder for dataset parameters
    ///
    /// # Example
    /// ```
    /// use recipe_catalog::dataset::{DatasetParams, SortColumn, SortDirection};
    ///
    /// let params = DatasetParams::builder()
    ///     .page(2)
    ///     .limit(10)
    ///     .sort(SortColumn::Slug)
    ///     .direction(SortDirection::Desc)
    ///     .keyword("garlic")
    ///     .build();
    /// assert_eq!(params.offset(), 10);
    /// ```
    pub fn builder() -> DatasetParamsBuilder {
        DatasetParamsBuilder::default()
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> SortColumn {
        self.sort
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn author_email(&self) -> Option<&str> {
        self.author_email.as_deref()
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn ingredient(&self) -> Option<&str> {
        self.ingredient.as_deref()
    }

    /// Rows skipped before the current page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(u64::from(self.limit))
    }

    /// Everything except the page number, as query-string pairs.
    ///
    /// Used to carry the active filters into pagination links.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("sort", self.sort.to_string()),
            ("sort_direction", self.direction.to_string()),
        ];
        if let Some(author_email) = &self.author_email {
            pairs.push(("author_email", author_email.clone()));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        if let Some(ingredient) = &self.ingredient {
            pairs.push(("ingredient", ingredient.clone()));
        }
        pairs
    }

    fn where_clause(&self) -> WhereClause {
        let mut clause = WhereClause::new();

        if let Some(author_email) = &self.author_email {
            clause.push("r.author_email = ?", [Value::Text(author_email.clone())]);
        }

        if let Some(keyword) = &self.keyword {
            let pattern = Value::Text(contains_pattern(keyword));
            let matches = |column: &str| {
                format!("{UNICODE_LOWER}({column}) LIKE {UNICODE_LOWER}(?) ESCAPE '\\'")
            };
            clause.push(
                format!(
                    "({} OR {}
                      OR EXISTS (SELECT 1 FROM ingredients i WHERE i.recipe_id = r.id AND {})
                      OR EXISTS (SELECT 1 FROM steps s WHERE s.recipe_id = r.id AND {}))",
                    matches("r.name"),
                    matches("r.description"),
                    matches("i.description"),
                    matches("s.description"),
                ),
                std::iter::repeat(pattern).take(4),
            );
        }

        if let Some(ingredient) = &self.ingredient {
            clause.push(
                format!(
                    "EXISTS (SELECT 1 FROM ingredients i
                             WHERE i.recipe_id = r.id
                               AND {UNICODE_LOWER}(i.description) LIKE {UNICODE_LOWER}(?) ESCAPE '\\')"
                ),
                [Value::Text(contains_pattern(ingredient))],
            );
        }

        clause
    }
}

/// Builder for [`DatasetParams`].
///
/// Setters never fail: out-of-range pages and limits are clamped, and blank
/// filters are dropped, when [`build`](DatasetParamsBuilder::build) runs.
#[derive(Debug, Default, Clone)]
pub struct DatasetParamsBuilder {
    page: Option<i64>,
    limit: Option<i64>,
    sort: Option<SortColumn>,
    direction: Option<SortDirection>,
    author_email: Option<String>,
    keyword: Option<String>,
    ingredient: Option<String>,
}

impl DatasetParamsBuilder {
    /// 1-based page number; values below 1 become 1
    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Page size; anything outside `1..=MAX_LIMIT` becomes `MAX_LIMIT`
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort column; `None` keeps the default (`name`)
    pub fn sort(mut self, sort: impl Into<Option<SortColumn>>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Sort direction; `None` keeps the default (`asc`)
    pub fn direction(mut self, direction: impl Into<Option<SortDirection>>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Exact author email match
    pub fn author_email(mut self, author_email: impl Into<String>) -> Self {
        self.author_email = Some(author_email.into());
        self
    }

    /// Case-insensitive substring of name, description, or any ingredient or step
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Case-insensitive substring of any ingredient description
    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = Some(ingredient.into());
        self
    }

    /// Normalize the collected values into [`DatasetParams`]
    pub fn build(self) -> DatasetParams {
        let page = match self.page {
            Some(page) if page >= 1 => page as u64,
            _ => 1,
        };
        let limit = match self.limit {
            Some(limit) if (1..=i64::from(MAX_LIMIT)).contains(&limit) => limit as u32,
            _ => MAX_LIMIT,
        };

        DatasetParams {
            page,
            limit,
            sort: self.sort.unwrap_or_default(),
            direction: self.direction.unwrap_or_default(),
            author_email: non_blank(self.author_email),
            keyword: non_blank(self.keyword),
            ingredient: non_blank(self.ingredient),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One page of results plus what is needed to build page navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matching rows across all pages
    pub total: u64,
    pub current_page: u64,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Last page number; 1 for an empty result
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(u64::from(self.per_page)).max(1)
    }

    /// 1-based position of the first item on this page
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.current_page - 1) * u64::from(self.per_page) + 1)
        }
    }

    /// 1-based position of the last item on this page
    pub fn to(&self) -> Option<u64> {
        self.from().map(|from| from + self.items.len() as u64 - 1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }
}

/// Run the dataset query and return the requested page with children loaded.
///
/// Filters apply in order: author email, keyword, ingredient. Rows are then
/// sorted by the chosen column (row id breaks ties so pages are stable) and
/// cut with `LIMIT`/`OFFSET`.
pub fn paginate(conn: &Connection, params: &DatasetParams) -> Result<Page<Recipe>> {
    let filters = params.where_clause();
    let where_sql = filters.to_sql();

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM recipes r{where_sql}"),
        params_from_iter(filters.params()),
        |row| row.get(0),
    )?;

    let query = format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes r{where_sql}
         ORDER BY r.{} {}, r.id ASC
         LIMIT ? OFFSET ?",
        params.sort.as_str(),
        params.direction.as_sql(),
    );
    let mut values = filters.params().to_vec();
    values.push(Value::Integer(i64::from(params.limit)));
    values.push(Value::Integer(
        i64::try_from(params.offset()).unwrap_or(i64::MAX),
    ));

    let mut stmt = conn.prepare(&query)?;
    let mut recipes = stmt
        .query_map(params_from_iter(values.iter()), recipe_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    load_children(conn, &mut recipes)?;

    debug!(
        "Dataset page {} (limit {}, sort {} {}) returned {} of {} recipes",
        params.page,
        params.limit,
        params.sort,
        params.direction,
        recipes.len(),
        total
    );

    Ok(Page {
        items: recipes,
        total: total as u64,
        current_page: params.page,
        per_page: params.limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = DatasetParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_LIMIT);
        assert_eq!(params.sort(), SortColumn::Name);
        assert_eq!(params.direction(), SortDirection::Asc);
        assert!(params.keyword().is_none());
    }

    #[test]
    fn test_page_below_one_clamps() {
        for page in [0, -1, i64::MIN] {
            assert_eq!(DatasetParams::builder().page(page).build().page(), 1);
        }
        assert_eq!(DatasetParams::builder().page(7).build().page(), 7);
    }

    #[test]
    fn test_limit_out_of_range_resets() {
        for limit in [0, -5, 26, 1000] {
            assert_eq!(DatasetParams::builder().limit(limit).build().limit(), MAX_LIMIT);
        }
        assert_eq!(DatasetParams::builder().limit(1).build().limit(), 1);
        assert_eq!(DatasetParams::builder().limit(25).build().limit(), 25);
    }

    #[test]
    fn test_blank_filters_are_dropped() {
        let params = DatasetParams::builder()
            .author_email("")
            .keyword("   ")
            .ingredient(" basil ")
            .build();
        assert!(params.author_email().is_none());
        assert!(params.keyword().is_none());
        assert_eq!(params.ingredient(), Some("basil"));
    }

    #[test]
    fn test_none_sort_keeps_defaults() {
        let params = DatasetParams::builder().sort(None).direction(None).build();
        assert_eq!(params.sort(), SortColumn::Name);
        assert_eq!(params.direction(), SortDirection::Asc);
    }

    #[test]
    fn test_offset() {
        let params = DatasetParams::builder().page(3).limit(10).build();
        assert_eq!(params.offset(), 20);
        let huge = DatasetParams::builder().page(i64::MAX).build();
        assert!(huge.offset() > 0);
    }

    #[test]
    fn test_sort_enums_parse() {
        for column in SortColumn::ALL {
            assert_eq!(column.as_str().parse::<SortColumn>().unwrap(), column);
        }
        assert!("id".parse::<SortColumn>().is_err());
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("down".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_query_pairs_skip_absent_filters() {
        let params = DatasetParams::builder().limit(5).keyword("egg").build();
        assert_eq!(
            params.query_pairs(),
            vec![
                ("limit", "5".to_string()),
                ("sort", "name".to_string()),
                ("sort_direction", "asc".to_string()),
                ("keyword", "egg".to_string()),
            ]
        );
    }

    #[test]
    fn test_where_clause_param_count_matches_placeholders() {
        let params = DatasetParams::builder()
            .author_email("a@test")
            .keyword("x")
            .ingredient("y")
            .build();
        let clause = params.where_clause();
        let placeholders = clause.to_sql().matches('?').count();
        assert_eq!(placeholders, clause.params().len());
        assert_eq!(placeholders, 6);
    }

    #[test]
    fn test_page_navigation_values() {
        let page = Page {
            items: vec![1, 2],
            total: 7,
            current_page: 2,
            per_page: 2,
        };
        assert_eq!(page.last_page(), 4);
        assert_eq!(page.from(), Some(3));
        assert_eq!(page.to(), Some(4));
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_empty_page_navigation_values() {
        let page: Page<i32> = Page {
            items: vec![],
            total: 0,
            current_page: 1,
            per_page: 25,
        };
        assert_eq!(page.last_page(), 1);
        assert_eq!(page.from(), None);
        assert_eq!(page.to(), None);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }
}
