use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::{models::*, store::RecipeStore};
use crate::error::Result;

/// [`RecipeStore`] held entirely in process memory.
///
/// Insertion order is the vector order. Every method takes the lock once,
/// so each call is atomic with respect to the others.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn insert_one(&self, recipe: &NewRecipe) -> Result<RecipeId> {
        let id = RecipeId::generate();
        self.recipes.write().await.push(Recipe {
            id,
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
        });
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>> {
        Ok(self.recipes.read().await.clone())
    }

    async fn find_one(&self, id: RecipeId) -> Result<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn update_one(&self, id: RecipeId, update: &RecipeUpdate) -> Result<u64> {
        let mut recipes = self.recipes.write().await;
        let modified = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .map(|recipe| update.apply_to(recipe))
            .unwrap_or(false);
        Ok(u64::from(modified))
    }

    async fn delete_one(&self, id: RecipeId) -> Result<u64> {
        let mut recipes = self.recipes.write().await;
        match recipes.iter().position(|r| r.id == id) {
            Some(index) => {
                recipes.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self) -> Result<u64> {
        let mut recipes = self.recipes.write().await;
        let deleted = recipes.len() as u64;
        recipes.clear();
        Ok(deleted)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.recipes.read().await.len() as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
