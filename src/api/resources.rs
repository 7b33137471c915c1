//! JSON shapes returned by the API

use crate::dataset::{DatasetParams, Page};
use crate::model::{Ingredient, Recipe, Step};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientView {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub step_number: i64,
    pub description: String,
}

/// Public representation of a recipe; steps are in `step_number` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub author_email: String,
    pub ingredients: Vec<IngredientView>,
    pub steps: Vec<StepView>,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            description: ingredient.description,
        }
    }
}

impl From<Step> for StepView {
    fn from(step: Step) -> Self {
        Self {
            step_number: step.step_number,
            description: step.description,
        }
    }
}

impl From<Recipe> for RecipeView {
    fn from(recipe: Recipe) -> Self {
        let mut steps: Vec<StepView> = recipe.steps.into_iter().map(StepView::from).collect();
        steps.sort_by_key(|step| step.step_number);

        Self {
            slug: recipe.slug,
            name: recipe.name,
            description: recipe.description,
            author_email: recipe.author_email,
            ingredients: recipe.ingredients.into_iter().map(IngredientView::from).collect(),
            steps,
        }
    }
}

/// `{ "data": RecipeView }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResource {
    pub data: RecipeView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// One entry of the numbered page list in `meta.links`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub from: Option<u64>,
    pub last_page: u64,
    pub links: Vec<PageLink>,
    pub path: String,
    pub per_page: u32,
    pub to: Option<u64>,
    pub total: u64,
}

/// `{ data, links, meta }` for one page of the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCollection {
    pub data: Vec<RecipeView>,
    pub links: PaginationLinks,
    pub meta: PaginationMeta,
}

impl RecipeCollection {
    /// Serialize a dataset page.
    ///
    /// `path` is the absolute URL of the list endpoint; every link carries
    /// the active filters from `params` plus its own page number.
    pub fn from_page(page: Page<Recipe>, path: &Url, params: &DatasetParams) -> Self {
        let last_page = page.last_page();
        let current = page.current_page;
        let url_for = |number: u64| page_url(path, params, number);

        let prev = page.has_previous().then(|| url_for(current - 1));
        let next = page.has_next().then(|| url_for(current + 1));

        let mut links = Vec::new();
        links.push(PageLink {
            url: prev.clone(),
            label: "&laquo; Previous".to_string(),
            active: false,
        });
        links.extend(page_window(current, last_page).into_iter().map(|entry| match entry {
            Some(number) => PageLink {
                url: Some(url_for(number)),
                label: number.to_string(),
                active: number == current,
            },
            None => PageLink {
                url: None,
                label: "...".to_string(),
                active: false,
            },
        }));
        links.push(PageLink {
            url: next.clone(),
            label: "Next &raquo;".to_string(),
            active: false,
        });

        let meta = PaginationMeta {
            current_page: current,
            from: page.from(),
            last_page,
            links,
            path: path.to_string(),
            per_page: page.per_page,
            to: page.to(),
            total: page.total,
        };

        Self {
            data: page.items.into_iter().map(RecipeView::from).collect(),
            links: PaginationLinks {
                first: Some(url_for(1)),
                last: Some(url_for(last_page)),
                prev,
                next,
            },
            meta,
        }
    }
}

/// Pages shown on each side of the current one in `meta.links`
const ON_EACH_SIDE: u64 = 3;

/// Page numbers listed in `meta.links`; `None` is a `...` gap.
///
/// Fewer than 14 pages are listed in full. Beyond that the list keeps the
/// first two and last two pages plus a window around the current page, so
/// its length no longer grows with the catalog.
fn page_window(current: u64, last_page: u64) -> Vec<Option<u64>> {
    let range = |from: u64, to: u64| (from..=to).map(Some);
    if last_page < ON_EACH_SIDE * 2 + 8 {
        return range(1, last_page).collect();
    }

    let window = ON_EACH_SIDE + 4;
    let mut pages = Vec::new();
    if current <= window {
        pages.extend(range(1, window + ON_EACH_SIDE));
        pages.push(None);
        pages.extend(range(last_page - 1, last_page));
    } else if current > last_page - window {
        pages.extend(range(1, 2));
        pages.push(None);
        pages.extend(range(last_page - (window + ON_EACH_SIDE - 1), last_page));
    } else {
        pages.extend(range(1, 2));
        pages.push(None);
        pages.extend(range(current - ON_EACH_SIDE, current + ON_EACH_SIDE));
        pages.push(None);
        pages.extend(range(last_page - 1, last_page));
    }
    pages
}

fn page_url(path: &Url, params: &DatasetParams, page: u64) -> String {
    let mut url = path.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(params.query_pairs())
        .append_pair("page", &page.to_string());
    url.to_string()
}
