use recipe_catalog::db::recipes::{count, find_by_slug};
use recipe_catalog::seeder::SeedRecipe;
use recipe_catalog::{CatalogError, Database, SeedReport, Seeder};
use std::path::PathBuf;

fn sample_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/recipes.json")
}

fn record(name: &str) -> SeedRecipe {
    SeedRecipe {
        name: name.to_string(),
        description: None,
        author_email: None,
        ingredients: vec!["Water".to_string()],
        instructions: vec!["Boil".to_string(), "Serve".to_string()],
    }
}

fn recipe_count(db: &Database) -> u64 {
    count(&db.lock().unwrap()).unwrap()
}

#[test]
fn test_seed_sample_file() {
    let db = Database::open_in_memory().unwrap();
    let report = Seeder::new(db.clone(), "kitchen@example.com")
        .seed_file(sample_file())
        .unwrap();

    assert_eq!(report.recipes, 6);
    assert_eq!(recipe_count(&db), 6);

    let conn = db.lock().unwrap();
    let pizza = find_by_slug(&conn, "classic-margherita-pizza").unwrap().unwrap();
    assert_eq!(pizza.name, "Classic Margherita Pizza");
    assert_eq!(pizza.author_email, "kitchen@example.com");
    assert_eq!(pizza.ingredients.len(), 6);
    assert_eq!(pizza.ingredients[0].description, "Pizza dough");
    let numbers: Vec<i64> = pizza.steps.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(pizza.steps[5].description, "Slice and serve hot.");

    let cookies = find_by_slug(&conn, "chocolate-chip-cookies").unwrap().unwrap();
    assert_eq!(cookies.author_email, "baker@example.com");

    let stir_fry = find_by_slug(&conn, "vegetarian-stir-fry").unwrap().unwrap();
    assert_eq!(stir_fry.description, "");
}

#[test]
fn test_seed_reports_child_counts() {
    let db = Database::open_in_memory().unwrap();
    let report = Seeder::new(db, "kitchen@example.com")
        .seed(&[record("Tea"), record("Coffee")])
        .unwrap();

    assert_eq!(
        report,
        SeedReport {
            recipes: 2,
            ingredients: 2,
            steps: 4
        }
    );
}

#[test]
fn test_duplicate_slug_rolls_back_whole_batch() {
    let db = Database::open_in_memory().unwrap();
    let seeder = Seeder::new(db.clone(), "kitchen@example.com");

    let result = seeder.seed(&[record("Green Tea"), record("Soup"), record("Green  Tea!")]);

    assert!(matches!(result, Err(CatalogError::Seed(_))));
    assert_eq!(recipe_count(&db), 0);
    let ingredients: i64 = db
        .lock()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM ingredients", [], |row| row.get(0))
        .unwrap();
    assert_eq!(ingredients, 0);
}

#[test]
fn test_unusable_name_aborts_before_writing() {
    let db = Database::open_in_memory().unwrap();
    let seeder = Seeder::new(db.clone(), "kitchen@example.com");

    let result = seeder.seed(&[record("Tea"), record("!!!")]);

    assert!(matches!(result, Err(CatalogError::Seed(_))));
    assert_eq!(recipe_count(&db), 0);
}

#[test]
fn test_reseeding_keeps_existing_rows() {
    let db = Database::open_in_memory().unwrap();
    let seeder = Seeder::new(db.clone(), "kitchen@example.com");
    seeder.seed_file(sample_file()).unwrap();

    assert!(seeder.seed_file(sample_file()).is_err());
    assert_eq!(recipe_count(&db), 6);
}

#[test]
fn test_malformed_source_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    let seeder = Seeder::new(db, "kitchen@example.com");

    let result = seeder.seed_reader(r#"{"recipes": [{"ingredients": []}]}"#.as_bytes());
    assert!(matches!(result, Err(CatalogError::Json(_))));

    let missing = seeder.seed_file("does/not/exist.json");
    assert!(matches!(missing, Err(CatalogError::Io(_))));
}
