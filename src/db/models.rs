use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Store-assigned recipe identifier.
///
/// The textual form is a lowercase hyphenated UUID. Anything that does not
/// parse as a UUID is a malformed identifier, never a missing recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a fresh identifier. Only stores call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecipeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::MalformedId("identifier is empty".to_string()));
        }

        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|e| Error::MalformedId(format!("'{trimmed}': {e}")))
    }
}

impl TryFrom<String> for RecipeId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    #[sqlx(try_from = "String")]
    pub id: RecipeId,
    pub name: String,
    pub ingredients: String,
    pub steps: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: String,
    pub steps: String,
}

impl NewRecipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        steps: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            steps: steps.into(),
        }
    }
}

/// Sparse update payload. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub ingredients: Option<String>,
    pub steps: Option<String>,
}

impl RecipeUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    pub fn steps(mut self, steps: impl Into<String>) -> Self {
        self.steps = Some(steps.into());
        self
    }

    /// Drop empty and whitespace-only values.
    ///
    /// Returns `None` when no field is left to apply.
    pub fn effective(self) -> Option<Self> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let update = Self {
            name: present(self.name),
            ingredients: present(self.ingredients),
            steps: present(self.steps),
        };

        if update.is_empty() {
            None
        } else {
            Some(update)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ingredients.is_none() && self.steps.is_none()
    }

    /// Apply the present fields to `recipe`, returning whether any value changed.
    pub fn apply_to(&self, recipe: &mut Recipe) -> bool {
        let mut changed = false;
        for (value, field) in [
            (&self.name, &mut recipe.name),
            (&self.ingredients, &mut recipe.ingredients),
            (&self.steps, &mut recipe.steps),
        ] {
            if let Some(value) = value {
                if *field != *value {
                    *field = value.clone();
                    changed = true;
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipe_id() {
        let id = RecipeId::generate();
        let parsed: RecipeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        // Surrounding whitespace from console input is tolerated
        let padded: RecipeId = format!("  {id} ").parse().unwrap();
        assert_eq!(padded, id);
    }

    #[test]
    fn test_malformed_recipe_id() {
        for input in [
            "",
            "   ",
            "abc",
            "64f1c2e9a1b2c3d4e5f60718",
            "not-a-uuid-at-all-xxxxxxxxxxxxxxxxx",
        ] {
            let err = input.parse::<RecipeId>().unwrap_err();
            assert!(
                matches!(err, Error::MalformedId(_)),
                "expected malformed id for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_effective_update() {
        assert_eq!(RecipeUpdate::default().effective(), None);
        assert_eq!(
            RecipeUpdate::default().name("").steps("   ").effective(),
            None
        );

        let update = RecipeUpdate::default()
            .name("Soup")
            .ingredients("")
            .effective()
            .unwrap();
        assert_eq!(update.name.as_deref(), Some("Soup"));
        assert_eq!(update.ingredients, None);
        assert_eq!(update.steps, None);
    }

    #[test]
    fn test_apply_to() {
        let mut recipe = Recipe {
            id: RecipeId::generate(),
            name: "Pasta".to_string(),
            ingredients: "Pasta, Sauce".to_string(),
            steps: "Boil".to_string(),
        };

        assert!(!RecipeUpdate::default().name("Pasta").apply_to(&mut recipe));
        assert!(RecipeUpdate::default().steps("Boil, serve").apply_to(&mut recipe));
        assert_eq!(recipe.name, "Pasta");
        assert_eq!(recipe.ingredients, "Pasta, Sauce");
        assert_eq!(recipe.steps, "Boil, serve");
    }
}
