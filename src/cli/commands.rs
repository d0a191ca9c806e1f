use std::io::{BufRead, Write};
use tracing::warn;

use crate::console::{ask, write_recipe, DELETE_ALL_PHRASE};
use crate::db::models::{RecipeId, RecipeUpdate};
use crate::repository::RecipeRepository;
use crate::{Error, Result};

/// Report a malformed id to the user; `false` means the command should stop
fn check_id<W: Write>(id: &str, out: &mut W) -> Result<bool> {
    match id.parse::<RecipeId>() {
        Ok(_) => Ok(true),
        Err(Error::MalformedId(msg)) => {
            writeln!(out, "Invalid ID format: {msg}")?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Print every recipe
pub async fn list<W: Write>(repository: &RecipeRepository, out: &mut W) -> Result<()> {
    writeln!(out, "=== ALL RECIPES ===")?;
    let recipes = repository.list_all().await?;
    if recipes.is_empty() {
        writeln!(out, "No recipes found.")?;
        return Ok(());
    }

    for recipe in &recipes {
        writeln!(out)?;
        write_recipe(out, recipe, "")?;
        writeln!(out, "{}", "-".repeat(40))?;
    }
    Ok(())
}

/// Add a recipe and print its ID
pub async fn add<W: Write>(
    repository: &RecipeRepository,
    name: &str,
    ingredients: &str,
    steps: &str,
    out: &mut W,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation(
            "Recipe name cannot be empty".to_string(),
        ));
    }

    let id = repository
        .create(name, ingredients.trim(), steps.trim())
        .await?;
    writeln!(out, "Recipe added with ID: {id}")?;
    Ok(())
}

/// Print a recipe by ID
pub async fn show<W: Write>(repository: &RecipeRepository, id: &str, out: &mut W) -> Result<()> {
    if !check_id(id, out)? {
        return Ok(());
    }
    match repository.find_by_id(id).await? {
        Some(recipe) => {
            writeln!(out, "Found Recipe:")?;
            write_recipe(out, &recipe, "")?;
        }
        None => writeln!(out, "Recipe not found.")?,
    }
    Ok(())
}

/// Apply a partial update
pub async fn update<W: Write>(
    repository: &RecipeRepository,
    id: &str,
    fields: RecipeUpdate,
    out: &mut W,
) -> Result<()> {
    if !check_id(id, out)? {
        return Ok(());
    }
    if repository.update(id, fields).await? {
        writeln!(out, "Recipe updated successfully.")?;
    } else {
        writeln!(out, "No changes made or recipe not found.")?;
    }
    Ok(())
}

/// Delete a recipe, asking for confirmation unless `assume_yes`
pub async fn delete<R: BufRead, W: Write>(
    repository: &RecipeRepository,
    id: &str,
    assume_yes: bool,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if !check_id(id, out)? {
        return Ok(());
    }

    if !assume_yes {
        let Some(recipe) = repository.find_by_id(id).await? else {
            writeln!(out, "Recipe not found.")?;
            return Ok(());
        };

        let answer = ask(
            input,
            out,
            &format!("Delete recipe '{}'? (yes/no): ", recipe.name),
        )?
        .unwrap_or_default();

        if !answer.eq_ignore_ascii_case("yes") {
            writeln!(out, "Deletion cancelled.")?;
            return Ok(());
        }
    }

    if repository.delete_by_id(id).await? > 0 {
        writeln!(out, "Recipe deleted successfully.")?;
    } else {
        writeln!(out, "Recipe not found.")?;
    }
    Ok(())
}

/// Print the number of stored recipes
pub async fn count<W: Write>(repository: &RecipeRepository, out: &mut W) -> Result<()> {
    let count = repository.count().await?;
    writeln!(out, "Total recipes: {count}")?;
    Ok(())
}

/// Delete every recipe once the confirmation phrase is given
pub async fn delete_all<R: BufRead, W: Write>(
    repository: &RecipeRepository,
    confirm: Option<String>,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let phrase = match confirm {
        Some(phrase) => phrase,
        None => {
            let total = repository.count().await?;
            if total == 0 {
                writeln!(out, "No recipes to delete.")?;
                return Ok(());
            }
            writeln!(out, "You are about to delete ALL {total} recipes!")?;
            ask(
                input,
                out,
                &format!("Type '{DELETE_ALL_PHRASE}' to confirm: "),
            )?
            .unwrap_or_default()
        }
    };

    if phrase != DELETE_ALL_PHRASE {
        warn!("Delete-all confirmation phrase did not match");
        writeln!(out, "Deletion cancelled.")?;
        return Ok(());
    }

    let deleted = repository.delete_all().await?;
    writeln!(out, "Deleted {deleted} recipes.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use std::io::Cursor;
    use std::sync::Arc;

    fn repository() -> RecipeRepository {
        RecipeRepository::new(Arc::new(MemoryStore::new()))
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let repo = repository();
        let mut out = Vec::new();

        let result = add(&repo, "   ", "Eggs", "Whisk", &mut out).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_show_reports_missing_recipe() {
        let repo = repository();
        let mut out = Vec::new();

        let missing = crate::db::models::RecipeId::generate().to_string();
        show(&repo, &missing, &mut out).await.unwrap();
        assert_eq!(text(out), "Recipe not found.\n");
    }

    #[tokio::test]
    async fn test_malformed_id_is_reported_not_raised() {
        let repo = repository();
        let id = repo.create("Pasta", "Pasta", "Boil").await.unwrap().to_string();

        let mut out = Vec::new();
        show(&repo, "abc", &mut out).await.unwrap();
        assert!(text(out).starts_with("Invalid ID format: "));

        let mut out = Vec::new();
        update(&repo, "abc", RecipeUpdate::default().name("X"), &mut out)
            .await
            .unwrap();
        assert!(text(out).starts_with("Invalid ID format: "));

        let mut out = Vec::new();
        delete(&repo, "", true, &mut Cursor::new(""), &mut out)
            .await
            .unwrap();
        assert!(text(out).starts_with("Invalid ID format: "));

        let recipe = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(recipe.name, "Pasta");
    }

    #[tokio::test]
    async fn test_delete_requires_yes() {
        let repo = repository();
        let id = repo.create("Pasta", "Pasta", "Boil").await.unwrap().to_string();

        let mut out = Vec::new();
        delete(&repo, &id, false, &mut Cursor::new("no\n"), &mut out)
            .await
            .unwrap();
        assert!(text(out).ends_with("Deletion cancelled.\n"));
        assert_eq!(repo.count().await.unwrap(), 1);

        let mut out = Vec::new();
        delete(&repo, &id, false, &mut Cursor::new("YES\n"), &mut out)
            .await
            .unwrap();
        assert!(text(out).ends_with("Recipe deleted successfully.\n"));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_all_needs_exact_phrase() {
        let repo = repository();
        repo.create("A", "", "").await.unwrap();
        repo.create("B", "", "").await.unwrap();

        let mut out = Vec::new();
        delete_all(&repo, Some("delete all".to_string()), &mut Cursor::new(""), &mut out)
            .await
            .unwrap();
        assert_eq!(text(out), "Deletion cancelled.\n");
        assert_eq!(repo.count().await.unwrap(), 2);

        let mut out = Vec::new();
        delete_all(&repo, None, &mut Cursor::new("DELETE ALL\n"), &mut out)
            .await
            .unwrap();
        assert!(text(out).ends_with("Deleted 2 recipes.\n"));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
