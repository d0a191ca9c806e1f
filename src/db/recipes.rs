use async_trait::async_trait;

use crate::db::{models::*, store::RecipeStore, DbPool};
use crate::error::Result;

/// Create a new recipe
pub async fn create_recipe(pool: &DbPool, new_recipe: &NewRecipe) -> Result<RecipeId> {
    let id = RecipeId::generate();

    sqlx::query(
        r#"
        INSERT INTO recipes (id, name, ingredients, steps)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&new_recipe.name)
    .bind(&new_recipe.ingredients)
    .bind(&new_recipe.steps)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Get recipe by ID
pub async fn get_recipe(pool: &DbPool, recipe_id: RecipeId) -> Result<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>(
        "SELECT id, name, ingredients, steps FROM recipes WHERE id = ?",
    )
    .bind(recipe_id.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(recipe)
}

/// List all recipes in insertion order
pub async fn list_all_recipes(pool: &DbPool) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(
        "SELECT id, name, ingredients, steps FROM recipes ORDER BY seq",
    )
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

/// Apply a partial update, returning the number of rows whose values changed
pub async fn update_recipe(
    pool: &DbPool,
    recipe_id: RecipeId,
    update: &RecipeUpdate,
) -> Result<u64> {
    // Rows where every supplied value already matches are left out of the
    // WHERE clause so rows_affected only counts real modifications
    let result = sqlx::query(
        r#"
        UPDATE recipes
        SET name = COALESCE(?1, name),
            ingredients = COALESCE(?2, ingredients),
            steps = COALESCE(?3, steps)
        WHERE id = ?4
          AND ((?1 IS NOT NULL AND ?1 IS NOT name)
            OR (?2 IS NOT NULL AND ?2 IS NOT ingredients)
            OR (?3 IS NOT NULL AND ?3 IS NOT steps))
        "#,
    )
    .bind(&update.name)
    .bind(&update.ingredients)
    .bind(&update.steps)
    .bind(recipe_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete recipe
pub async fn delete_recipe(pool: &DbPool, recipe_id: RecipeId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(recipe_id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete every recipe
pub async fn delete_all_recipes(pool: &DbPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM recipes").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Count all recipes
pub async fn count_all_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// [`RecipeStore`] backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for SqliteStore {
    async fn insert_one(&self, recipe: &NewRecipe) -> Result<RecipeId> {
        create_recipe(&self.pool, recipe).await
    }

    async fn find_all(&self) -> Result<Vec<Recipe>> {
        list_all_recipes(&self.pool).await
    }

    async fn find_one(&self, id: RecipeId) -> Result<Option<Recipe>> {
        get_recipe(&self.pool, id).await
    }

    async fn update_one(&self, id: RecipeId, update: &RecipeUpdate) -> Result<u64> {
        update_recipe(&self.pool, id, update).await
    }

    async fn delete_one(&self, id: RecipeId) -> Result<u64> {
        delete_recipe(&self.pool, id).await
    }

    async fn delete_many(&self) -> Result<u64> {
        delete_all_recipes(&self.pool).await
    }

    async fn count(&self) -> Result<u64> {
        let count = count_all_recipes(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
