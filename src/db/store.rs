//! Document-collection interface the recipe repository is written against.

use async_trait::async_trait;

use crate::db::models::{NewRecipe, Recipe, RecipeId, RecipeUpdate};
use crate::error::Result;

/// A collection of recipe documents.
///
/// Each method is a single request to the backing store. Counts follow
/// document-store conventions: a missing record is reported as `0` or `None`,
/// never as an error. Errors are reserved for a store that cannot be reached
/// or rejects the request.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert a recipe and return the identifier the store generated for it.
    async fn insert_one(&self, recipe: &NewRecipe) -> Result<RecipeId>;

    /// Every stored recipe, in insertion order.
    async fn find_all(&self) -> Result<Vec<Recipe>>;

    async fn find_one(&self, id: RecipeId) -> Result<Option<Recipe>>;

    /// Set the present fields of `update` on the recipe with `id`.
    ///
    /// Returns the modified count: `0` when the id is unknown or every
    /// supplied value equals the stored one.
    async fn update_one(&self, id: RecipeId, update: &RecipeUpdate) -> Result<u64>;

    /// Returns the deleted count (`0` or `1`).
    async fn delete_one(&self, id: RecipeId) -> Result<u64>;

    /// Delete every recipe, returning the deleted count.
    async fn delete_many(&self) -> Result<u64>;

    async fn count(&self) -> Result<u64>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<()>;
}
