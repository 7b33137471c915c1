use serde::{Deserialize, Serialize};

/// A stored recipe together with its children.
///
/// `steps` are always held in `step_number` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub author_email: String,
    pub slug: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub recipe_id: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: i64,
    pub recipe_id: i64,
    pub step_number: i64,
    pub description: String,
}

/// A recipe that has not been written yet, created with its children as a unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub author_email: String,
    pub slug: String,
    /// Ingredient descriptions, stored in this order
    pub ingredients: Vec<String>,
    /// `(step_number, description)` pairs, stored in this order
    pub steps: Vec<(i64, String)>,
}

impl NewRecipe {
    /// Start a recipe whose slug is derived from `name`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = crate::slug::slugify(&name);
        Self {
            name,
            slug,
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn author_email(mut self, author_email: impl Into<String>) -> Self {
        self.author_email = author_email.into();
        self
    }

    pub fn ingredient(mut self, description: impl Into<String>) -> Self {
        self.ingredients.push(description.into());
        self
    }

    pub fn step(mut self, step_number: i64, description: impl Into<String>) -> Self {
        self.steps.push((step_number, description.into()));
        self
    }

    /// Append instructions numbered 1..N in the order given
    pub fn instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = self.steps.len() as i64;
        self.steps.extend(
            instructions
                .into_iter()
                .enumerate()
                .map(|(index, text)| (start + index as i64 + 1, text.into())),
        );
        self
    }
}
