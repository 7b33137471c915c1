//! Server-side HTML for the browsing pages.
//!
//! Everything taken from the API is escaped with `html-escape` before it is
//! written out.

use crate::api::params::ListQuery;
use crate::api::resources::{RecipeCollection, RecipeView};
use crate::dataset::{SortColumn, SortDirection};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use url::form_urlencoded;

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse;width:100%}th,td{text-align:left;padding:.4rem;border-bottom:1px solid #ddd}\
nav a,nav span{margin-right:.8rem}form label{margin-right:.6rem}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><a href=\"/\">Recipes</a></header>\n<main>\n{body}</main>\n</body>\n</html>\n",
        title = text(title),
    )
}

/// Query string for a frontend list URL, without the leading `?`
pub fn list_query_string(query: &ListQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(page) = query.page {
        serializer.append_pair("page", &page.to_string());
    }
    if let Some(limit) = query.limit {
        serializer.append_pair("limit", &limit.to_string());
    }
    if let Some(sort) = query.sort {
        serializer.append_pair("sort", sort.as_str());
    }
    if let Some(direction) = query.sort_direction {
        serializer.append_pair("sort_direction", direction.as_str());
    }
    for (key, value) in [
        ("author_email", &query.author_email),
        ("keyword", &query.keyword),
        ("ingredient", &query.ingredient),
    ] {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

fn list_href(query: &ListQuery, page: u64) -> String {
    format!("/?{}", list_query_string(&query.with_page(page)))
}

fn select_options<'a>(options: impl IntoIterator<Item = (&'a str, bool)>) -> String {
    options
        .into_iter()
        .map(|(value, selected)| {
            let selected = if selected { " selected" } else { "" };
            format!("<option value=\"{value}\"{selected}>{value}</option>")
        })
        .collect()
}

fn search_form(query: &ListQuery) -> String {
    let value = |field: &Option<String>| attr(field.as_deref().unwrap_or("")).into_owned();
    let active_sort = query.sort.unwrap_or_default();
    let active_direction = query.sort_direction.unwrap_or_default();
    let limit = query
        .limit
        .map(|limit| format!("<input type=\"hidden\" name=\"limit\" value=\"{limit}\">\n"))
        .unwrap_or_default();

    format!(
        "<form class=\"search\" method=\"get\" action=\"/\">\n\
         <label>Keyword <input type=\"search\" name=\"keyword\" value=\"{keyword}\"></label>\n\
         <label>Ingredient <input type=\"search\" name=\"ingredient\" value=\"{ingredient}\"></label>\n\
         <label>Author <input type=\"email\" name=\"author_email\" value=\"{author}\"></label>\n\
         <label>Sort <select name=\"sort\">{sorts}</select></label>\n\
         <label>Order <select name=\"sort_direction\">{directions}</select></label>\n\
         {limit}<button type=\"submit\">Search</button>\n</form>\n",
        keyword = value(&query.keyword),
        ingredient = value(&query.ingredient),
        author = value(&query.author_email),
        sorts = select_options(
            SortColumn::ALL
                .iter()
                .map(|column| (column.as_str(), *column == active_sort))
        ),
        directions = select_options(
            [SortDirection::Asc, SortDirection::Desc]
                .iter()
                .map(|direction| (direction.as_str(), *direction == active_direction))
        ),
    )
}

fn pagination_nav(query: &ListQuery, collection: &RecipeCollection) -> String {
    let meta = &collection.meta;
    let current = meta.current_page;
    let last = meta.last_page;

    let link = |label: &str, class: &str, page: Option<u64>| match page {
        Some(page) => format!(
            "<a class=\"{class}\" href=\"{}\">{label}</a>\n",
            attr(&list_href(query, page))
        ),
        None => format!("<span class=\"{class} disabled\">{label}</span>\n"),
    };

    format!(
        "<nav class=\"pagination\">\n{}{}{}{}\
         <p class=\"summary\">page {current} of {last} ({} recipes)</p>\n</nav>\n",
        link("First", "first", (current > 1).then_some(1)),
        link("Previous", "prev", (current > 1).then(|| current - 1)),
        link("Next", "next", (current < last).then(|| current + 1)),
        link("Last", "last", (current < last).then_some(last)),
        meta.total,
    )
}

/// Browse page: search form, one table row per recipe and page navigation
pub fn list_page(query: &ListQuery, collection: &RecipeCollection) -> String {
    let results = if collection.data.is_empty() {
        "<p class=\"empty\">No recipes match your search.</p>\n".to_string()
    } else {
        let rows: String = collection
            .data
            .iter()
            .map(|recipe| {
                format!(
                    "<tr><td><a href=\"/{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                    attr(&recipe.slug),
                    text(&recipe.name),
                    text(&recipe.description),
                    text(&recipe.author_email),
                )
            })
            .collect();
        format!(
            "<table class=\"recipes\">\n\
             <thead><tr><th>Name</th><th>Description</th><th>Author</th></tr></thead>\n\
             <tbody>\n{rows}</tbody>\n</table>\n"
        )
    };

    let body = format!(
        "<h1>Recipes</h1>\n{}{results}{}",
        search_form(query),
        pagination_nav(query, collection),
    );
    layout("Recipes", &body)
}

/// Detail page for one recipe; steps are rendered in `step_number` order
pub fn detail_page(recipe: &RecipeView) -> String {
    let description = if recipe.description.is_empty() {
        String::new()
    } else {
        format!("<p class=\"description\">{}</p>\n", text(&recipe.description))
    };

    let ingredients: String = recipe
        .ingredients
        .iter()
        .map(|ingredient| format!("<li>{}</li>\n", text(&ingredient.description)))
        .collect();

    let mut steps: Vec<_> = recipe.steps.iter().collect();
    steps.sort_by_key(|step| step.step_number);
    let steps: String = steps
        .into_iter()
        .map(|step| {
            format!(
                "<li value=\"{0}\" data-step=\"{0}\">{1}</li>\n",
                step.step_number,
                text(&step.description),
            )
        })
        .collect();

    let body = format!(
        "<h1>{name}</h1>\n{description}\
         <p class=\"author\">By <a href=\"mailto:{email_attr}\">{email}</a></p>\n\
         <h2>Ingredients</h2>\n<ul class=\"ingredients\">\n{ingredients}</ul>\n\
         <h2>Steps</h2>\n<ol class=\"steps\">\n{steps}</ol>\n\
         <p><a href=\"/\">Back to all recipes</a></p>\n",
        name = text(&recipe.name),
        email_attr = attr(&recipe.author_email),
        email = text(&recipe.author_email),
    );
    layout(&recipe.name, &body)
}

pub fn not_found_page(slug: &str) -> String {
    layout(
        "Recipe not found",
        &format!(
            "<h1>Recipe not found</h1>\n<p>There is no recipe called <code>{}</code>.</p>\n\
             <p><a href=\"/\">Back to all recipes</a></p>\n",
            text(slug)
        ),
    )
}

/// Shown when the catalog API is unreachable or misbehaves
pub fn error_page(message: &str) -> String {
    layout(
        "Catalog unavailable",
        &format!(
            "<h1>Catalog unavailable</h1>\n<p class=\"error\">{}</p>\n",
            text(message)
        ),
    )
}
