#![allow(dead_code)]

use recipe_catalog::db::recipes::{find_by_slug, insert_recipe};
use recipe_catalog::{Database, NewRecipe, Recipe};
use rusqlite::params;

/// Four recipes with three ingredients each and four steps stored out of
/// order (2, 1, 3, 4). `recipes` is sorted by name.
pub struct Fixture {
    pub db: Database,
    pub recipes: Vec<Recipe>,
}

const RECIPES: [(&str, &str, &str); 4] = [
    ("Beef Stew", "Slow cooked comfort food", "dana@test.com"),
    ("Apple Pie", "Warm dessert with cinnamon", "carl@test.com"),
    ("Dal Tadka", "Lentils tempered with spices", "alice@test.com"),
    ("Carrot Cake", "Moist cake with frosting", "bob@test.com"),
];

pub fn new_recipe(name: &str, description: &str, author_email: &str) -> NewRecipe {
    let mut recipe = NewRecipe::new(name)
        .description(description)
        .author_email(author_email);
    for n in 1..=3 {
        recipe = recipe.ingredient(format!("{name} ingredient {n}"));
    }
    for n in [2, 1, 3, 4] {
        recipe = recipe.step(n, format!("{name} step {n}"));
    }
    recipe
}

pub fn setup() -> Fixture {
    let db = Database::open_in_memory().unwrap();
    {
        let conn = db.lock().unwrap();
        for (name, description, author_email) in RECIPES {
            insert_recipe(&conn, &new_recipe(name, description, author_email)).unwrap();
        }
    }
    let mut fixture = Fixture {
        db,
        recipes: Vec::new(),
    };
    fixture.reload();
    fixture
}

impl Fixture {
    /// Re-read every recipe from the database, sorted by name
    pub fn reload(&mut self) {
        let conn = self.db.lock().unwrap();
        let mut slugs: Vec<String> = conn
            .prepare("SELECT slug FROM recipes")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        slugs.sort();

        let mut recipes: Vec<Recipe> = slugs
            .iter()
            .map(|slug| find_by_slug(&conn, slug).unwrap().unwrap())
            .collect();
        recipes.sort_by(|a, b| a.name.cmp(&b.name));
        self.recipes = recipes;
    }

    pub fn insert(&mut self, recipe: NewRecipe) -> i64 {
        let id = insert_recipe(&self.db.lock().unwrap(), &recipe).unwrap();
        self.reload();
        id
    }

    pub fn set_recipe_column(&mut self, recipe_id: i64, column: &str, value: &str) {
        self.db
            .lock()
            .unwrap()
            .execute(
                &format!("UPDATE recipes SET {column} = ?1 WHERE id = ?2"),
                params![value, recipe_id],
            )
            .unwrap();
        self.reload();
    }

    pub fn set_ingredient(&mut self, ingredient_id: i64, description: &str) {
        self.db
            .lock()
            .unwrap()
            .execute(
                "UPDATE ingredients SET description = ?1 WHERE id = ?2",
                params![description, ingredient_id],
            )
            .unwrap();
        self.reload();
    }

    pub fn set_step(&mut self, step_id: i64, description: &str) {
        self.db
            .lock()
            .unwrap()
            .execute(
                "UPDATE steps SET description = ?1 WHERE id = ?2",
                params![description, step_id],
            )
            .unwrap();
        self.reload();
    }

    /// Ids of the fixture recipes sorted client-side by `column`
    pub fn ids_sorted_by(&self, column: &str, descending: bool) -> Vec<i64> {
        let mut recipes = self.recipes.clone();
        recipes.sort_by(|a, b| {
            let key = |r: &Recipe| match column {
                "name" => r.name.clone(),
                "description" => r.description.clone(),
                "author_email" => r.author_email.clone(),
                "slug" => r.slug.clone(),
                other => panic!("unknown column {other}"),
            };
            key(a).cmp(&key(b))
        });
        if descending {
            recipes.reverse();
        }
        ids(&recipes)
    }
}

pub fn ids(recipes: &[Recipe]) -> Vec<i64> {
    recipes.iter().map(|r| r.id).collect()
}
