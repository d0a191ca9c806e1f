//! The recipe repository: the single data-access contract shared by the web
//! handlers, the scripted CLI commands and the interactive console.
//!
//! Outcomes are kept apart. A malformed identifier is an
//! [`Error::MalformedId`](crate::error::Error::MalformedId) and never reaches
//! the store; a well-formed id with no record is `Ok(None)` or a zero count;
//! store failures propagate untouched.

use std::sync::Arc;
use tracing::debug;

use crate::db::models::{NewRecipe, Recipe, RecipeId, RecipeUpdate};
use crate::db::store::RecipeStore;
use crate::error::Result;

#[derive(Clone)]
pub struct RecipeRepository {
    store: Arc<dyn RecipeStore>,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Every recipe, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Recipe>> {
        self.store.find_all().await
    }

    /// Insert a recipe and return its new identifier.
    pub async fn create(
        &self,
        name: impl Into<String>,
        ingredients: impl Into<String>,
        steps: impl Into<String>,
    ) -> Result<RecipeId> {
        let recipe = NewRecipe::new(name, ingredients, steps);
        let id = self.store.insert_one(&recipe).await?;
        debug!("Created recipe {} ({})", id, recipe.name);
        Ok(id)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>> {
        let id = parse_id(id)?;
        self.store.find_one(id).await
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Apply the present, non-empty fields of `fields`.
    ///
    /// Returns `true` only if a stored value actually changed. An unknown id
    /// and an update that changes nothing both return `false`; use
    /// [`exists`](Self::exists) to tell them apart.
    pub async fn update(&self, id: &str, fields: RecipeUpdate) -> Result<bool> {
        let id = parse_id(id)?;

        let Some(update) = fields.effective() else {
            debug!("Update for {} has no effective fields", id);
            return Ok(false);
        };

        let modified = self.store.update_one(id, &update).await?;
        debug!("Updated recipe {} (modified: {})", id, modified);
        Ok(modified > 0)
    }

    /// Returns the number of recipes removed (`0` or `1`).
    pub async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let id = parse_id(id)?;
        let deleted = self.store.delete_one(id).await?;
        debug!("Deleted recipe {} (deleted: {})", id, deleted);
        Ok(deleted)
    }

    /// Remove every recipe. Confirmation is the caller's job.
    pub async fn delete_all(&self) -> Result<u64> {
        let deleted = self.store.delete_many().await?;
        debug!("Deleted all recipes (deleted: {})", deleted);
        Ok(deleted)
    }

    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }

    /// Check that the store is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

fn parse_id(id: &str) -> Result<RecipeId> {
    id.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::Error;

    fn repository() -> RecipeRepository {
        RecipeRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_empty_update_skips_store() {
        let repo = repository();
        let id = repo.create("Pasta", "Pasta", "Boil").await.unwrap();
        let id = id.to_string();

        assert!(!repo.update(&id, RecipeUpdate::default()).await.unwrap());
        assert!(!repo
            .update(&id, RecipeUpdate::default().name("   "))
            .await
            .unwrap());

        let recipe = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(recipe.name, "Pasta");
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_not_found() {
        let repo = repository();

        let missing = RecipeId::generate().to_string();
        assert!(repo.find_by_id(&missing).await.unwrap().is_none());
        assert!(!repo.exists(&missing).await.unwrap());

        assert!(matches!(
            repo.find_by_id("").await,
            Err(Error::MalformedId(_))
        ));
        assert!(matches!(
            repo.delete_by_id("12345").await,
            Err(Error::MalformedId(_))
        ));
        assert!(matches!(
            repo.update("zz", RecipeUpdate::default().name("X")).await,
            Err(Error::MalformedId(_))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_id_reports_no_change() {
        let repo = repository();
        let missing = RecipeId::generate().to_string();

        let changed = repo
            .update(&missing, RecipeUpdate::default().name("Ghost"))
            .await
            .unwrap();
        assert!(!changed);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
