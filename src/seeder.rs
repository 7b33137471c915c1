//! One-shot bulk load of sample recipes.
//!
//! The source is a JSON document of the form
//! `{ "recipes": [ { "name", "ingredients": [..], "instructions": [..] } ] }`.
//! Extra fields are ignored, so sample dumps with cuisine, ratings and so on
//! load as-is. The whole batch is written in one transaction.

use crate::db::recipes::insert_recipe;
use crate::db::Database;
use crate::error::{CatalogError, Result};
use crate::model::NewRecipe;
use crate::slug::{is_valid_slug, slugify};
use log::{debug, info};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Top-level seed document
#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub recipes: Vec<SeedRecipe>,
}

/// One record of the seed document
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecipe {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl SeedRecipe {
    /// Turn the record into an insertable recipe, numbering steps 1..N
    pub fn to_new_recipe(&self, default_author_email: &str) -> Result<NewRecipe> {
        let slug = slugify(&self.name);
        if !is_valid_slug(&slug) {
            return Err(CatalogError::Seed(format!(
                "Recipe name '{}' does not produce a usable slug",
                self.name
            )));
        }

        let mut recipe = NewRecipe::new(self.name.as_str())
            .description(self.description.clone().unwrap_or_default())
            .author_email(
                self.author_email
                    .clone()
                    .filter(|email| !email.trim().is_empty())
                    .unwrap_or_else(|| default_author_email.to_string()),
            )
            .instructions(self.instructions.iter().cloned());
        recipe.ingredients = self.ingredients.clone();
        Ok(recipe)
    }
}

/// Seeds the catalog from a JSON source
#[derive(Debug, Clone)]
pub struct Seeder {
    db: Database,
    default_author_email: String,
}

/// Outcome of a successful seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub recipes: usize,
    pub ingredients: usize,
    pub steps: usize,
}

impl Seeder {
    pub fn new(db: Database, default_author_email: impl Into<String>) -> Self {
        Self {
            db,
            default_author_email: default_author_email.into(),
        }
    }

    /// Seed from a JSON file
    pub fn seed_file(&self, path: impl AsRef<Path>) -> Result<SeedReport> {
        let path = path.as_ref();
        info!("Seeding recipes from {}", path.display());
        let file = std::fs::File::open(path)?;
        self.seed_reader(file)
    }

    /// Seed from any reader yielding the JSON document
    pub fn seed_reader(&self, reader: impl Read) -> Result<SeedReport> {
        let data: SeedData = serde_json::from_reader(reader)?;
        self.seed(&data.recipes)
    }

    /// Insert all records in a single transaction.
    ///
    /// Any failure (a duplicate slug, an unusable name, a constraint
    /// violation) rolls back the whole batch.
    pub fn seed(&self, records: &[SeedRecipe]) -> Result<SeedReport> {
        let recipes = records
            .iter()
            .map(|record| record.to_new_recipe(&self.default_author_email))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;

        let mut report = SeedReport {
            recipes: 0,
            ingredients: 0,
            steps: 0,
        };
        for recipe in &recipes {
            insert_recipe(&tx, recipe).map_err(|e| {
                CatalogError::Seed(format!("Failed to insert '{}': {}", recipe.name, e))
            })?;
            report.recipes += 1;
            report.ingredients += recipe.ingredients.len();
            report.steps += recipe.steps.len();
            debug!("Seeded '{}'", recipe.slug);
        }

        tx.commit()?;
        info!(
            "Seeded {} recipes ({} ingredients, {} steps)",
            report.recipes, report.ingredients, report.steps
        );
        Ok(report)
    }
}
