//! Recipe rows and their eager-loaded children

use crate::error::Result;
use crate::model::{Ingredient, NewRecipe, Recipe, Step};
use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashMap;

/// Column list matching [`recipe_from_row`], qualified with the `r` alias
pub(crate) const RECIPE_COLUMNS: &str = "r.id, r.name, r.description, r.author_email, r.slug";

/// Build a recipe from a row selected with [`RECIPE_COLUMNS`]; children are left empty
pub(crate) fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        author_email: row.get(3)?,
        slug: row.get(4)?,
        ingredients: Vec::new(),
        steps: Vec::new(),
    })
}

/// Insert a recipe with its ingredients and steps.
///
/// Runs as several statements; callers that need all-or-nothing behaviour
/// pass a [`rusqlite::Transaction`] (it derefs to a connection).
pub fn insert_recipe(conn: &Connection, recipe: &NewRecipe) -> Result<i64> {
    conn.execute(
        "INSERT INTO recipes (name, description, author_email, slug) VALUES (?1, ?2, ?3, ?4)",
        params![
            &recipe.name,
            &recipe.description,
            &recipe.author_email,
            &recipe.slug
        ],
    )?;
    let recipe_id = conn.last_insert_rowid();

    let mut insert_ingredient =
        conn.prepare_cached("INSERT INTO ingredients (recipe_id, description) VALUES (?1, ?2)")?;
    for description in &recipe.ingredients {
        insert_ingredient.execute(params![recipe_id, description])?;
    }

    let mut insert_step = conn.prepare_cached(
        "INSERT INTO steps (recipe_id, step_number, description) VALUES (?1, ?2, ?3)",
    )?;
    for (step_number, description) in &recipe.steps {
        insert_step.execute(params![recipe_id, step_number, description])?;
    }

    debug!(
        "Inserted recipe '{}' ({} ingredients, {} steps)",
        recipe.slug,
        recipe.ingredients.len(),
        recipe.steps.len()
    );
    Ok(recipe_id)
}

/// Look up one recipe by slug with its ingredients and ordered steps
pub fn find_by_slug(conn: &Connection, slug: &str) -> Result<Option<Recipe>> {
    let recipe = conn
        .query_row(
            &format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.slug = ?1"),
            [slug],
            recipe_from_row,
        )
        .optional()?;

    match recipe {
        Some(recipe) => {
            let mut recipes = [recipe];
            load_children(conn, &mut recipes)?;
            let [recipe] = recipes;
            Ok(Some(recipe))
        }
        None => Ok(None),
    }
}

/// Fill in ingredients (insertion order) and steps (`step_number` order)
/// for a batch of recipes with two queries.
pub fn load_children(conn: &Connection, recipes: &mut [Recipe]) -> Result<()> {
    if recipes.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let placeholders = vec!["?"; ids.len()].join(", ");
    let position: HashMap<i64, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

    let mut stmt = conn.prepare(&format!(
        "SELECT id, recipe_id, description FROM ingredients
         WHERE recipe_id IN ({placeholders}) ORDER BY id"
    ))?;
    let ingredients = stmt.query_map(params_from_iter(ids.iter()), |row| {
        Ok(Ingredient {
            id: row.get(0)?,
            recipe_id: row.get(1)?,
            description: row.get(2)?,
        })
    })?;
    for ingredient in ingredients {
        let ingredient = ingredient?;
        if let Some(&index) = position.get(&ingredient.recipe_id) {
            recipes[index].ingredients.push(ingredient);
        }
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT id, recipe_id, step_number, description FROM steps
         WHERE recipe_id IN ({placeholders}) ORDER BY recipe_id, step_number"
    ))?;
    let steps = stmt.query_map(params_from_iter(ids.iter()), |row| {
        Ok(Step {
            id: row.get(0)?,
            recipe_id: row.get(1)?,
            step_number: row.get(2)?,
            description: row.get(3)?,
        })
    })?;
    for step in steps {
        let step = step?;
        if let Some(&index) = position.get(&step.recipe_id) {
            recipes[index].steps.push(step);
        }
    }

    Ok(())
}

/// Number of stored recipes
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
    Ok(count as u64)
}
