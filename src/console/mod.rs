//! Interactive, menu-driven console over the recipe repository.
//!
//! The console reads from any [`BufRead`] and writes to any [`Write`], so a
//! session can be scripted in tests. End of input ends the session.

pub mod display;

use std::io::{BufRead, Write};
use tracing::{debug, error};

use crate::db::models::{Recipe, RecipeUpdate};
use crate::error::{Error, Result};
use crate::repository::RecipeRepository;

pub use display::write_recipe;

/// Phrase that must be typed verbatim before every recipe is deleted
pub const DELETE_ALL_PHRASE: &str = "DELETE ALL";

const RULE_WIDTH: usize = 50;

/// Print `prompt` and read one trimmed line. `None` means end of input.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> std::io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub struct Console<R, W> {
    repository: RecipeRepository,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(repository: RecipeRepository, input: R, output: W) -> Self {
        Self {
            repository,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input runs out
    pub async fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Welcome to the Recipe Database Management System!"
        )?;

        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("\nEnter your choice (1-8): ")? else {
                break;
            };
            debug!("Console menu choice: {:?}", choice);

            let outcome = match choice.as_str() {
                "1" => self.show_all().await,
                "2" => self.add_recipe().await,
                "3" => self.find_recipe().await,
                "4" => self.update_recipe().await,
                "5" => self.delete_recipe().await,
                "6" => self.count_recipes().await,
                "7" => self.delete_all().await,
                "8" => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number between 1-8."
                    )?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) if e.is_store_failure() => {
                    error!("Console operation failed: {}", e.log_safe());
                    writeln!(self.output, "\u{2717} Database error: {}", e.log_safe())?;
                }
                Err(e) => {
                    writeln!(self.output, "\u{2717} {e}")?;
                }
            }

            if self.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }

        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(ask(&mut self.input, &mut self.output, prompt)?)
    }

    /// Like `prompt`, but end of input reads as an empty answer
    fn prompt_or_empty(&mut self, prompt: &str) -> Result<String> {
        Ok(self.prompt(prompt)?.unwrap_or_default())
    }

    fn show_menu(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "RECIPE DATABASE MANAGEMENT SYSTEM")?;
        writeln!(self.output, "{rule}")?;
        for line in [
            "1. Show all recipes",
            "2. Add a new recipe",
            "3. Find a recipe by ID",
            "4. Update a recipe",
            "5. Delete a recipe",
            "6. Count total recipes",
            "7. Delete all recipes (CAUTION!)",
            "8. Exit",
        ] {
            writeln!(self.output, "{line}")?;
        }
        writeln!(self.output, "{rule}")?;
        Ok(())
    }

    async fn show_all(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- ALL RECIPES ---")?;
        let recipes = self.repository.list_all().await?;
        if recipes.is_empty() {
            writeln!(self.output, "No recipes found.")?;
            return Ok(());
        }

        for (i, recipe) in recipes.iter().enumerate() {
            writeln!(self.output, "\n{}. ID: {}", i + 1, recipe.id)?;
            writeln!(self.output, "   Name: {}", recipe.name)?;
            writeln!(self.output, "   Ingredients: {}", recipe.ingredients)?;
            writeln!(self.output, "   Steps: {}", recipe.steps)?;
        }
        Ok(())
    }

    async fn add_recipe(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- ADD NEW RECIPE ---")?;
        let name = self.prompt_or_empty("Recipe Name: ")?;
        if name.is_empty() {
            writeln!(self.output, "Recipe name cannot be empty!")?;
            return Ok(());
        }

        let ingredients = self.prompt_or_empty("Ingredients: ")?;
        let steps = self.prompt_or_empty("Preparation Steps: ")?;

        let id = self.repository.create(name, ingredients, steps).await?;
        writeln!(
            self.output,
            "\u{2713} Recipe added successfully with ID: {id}"
        )?;
        Ok(())
    }

    /// Ask for an id and load the recipe, reporting empty, malformed and unknown ids
    async fn prompt_existing(&mut self, prompt: &str) -> Result<Option<Recipe>> {
        let id = self.prompt_or_empty(prompt)?;
        if id.is_empty() {
            writeln!(self.output, "Recipe ID cannot be empty!")?;
            return Ok(None);
        }

        match self.repository.find_by_id(&id).await {
            Ok(Some(recipe)) => Ok(Some(recipe)),
            Ok(None) => {
                writeln!(self.output, "\u{2717} Recipe not found.")?;
                Ok(None)
            }
            Err(Error::MalformedId(msg)) => {
                writeln!(self.output, "\u{2717} Invalid ID format: {msg}")?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn find_recipe(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- FIND RECIPE BY ID ---")?;
        if let Some(recipe) = self.prompt_existing("Enter Recipe ID: ").await? {
            writeln!(self.output, "\nFound Recipe:")?;
            write_recipe(&mut self.output, &recipe, "   ")?;
        }
        Ok(())
    }

    async fn update_recipe(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- UPDATE RECIPE ---")?;
        let Some(recipe) = self.prompt_existing("Enter Recipe ID to update: ").await? else {
            return Ok(());
        };

        writeln!(self.output, "\nCurrent values:")?;
        writeln!(self.output, "Name: {}", recipe.name)?;
        writeln!(self.output, "Ingredients: {}", recipe.ingredients)?;
        writeln!(self.output, "Steps: {}", recipe.steps)?;

        writeln!(
            self.output,
            "\nEnter new values (press Enter to keep current value):"
        )?;
        let update = RecipeUpdate {
            name: Some(self.prompt_or_empty(&format!("New Name [{}]: ", recipe.name))?),
            ingredients: Some(
                self.prompt_or_empty(&format!("New Ingredients [{}]: ", recipe.ingredients))?,
            ),
            steps: Some(self.prompt_or_empty(&format!("New Steps [{}]: ", recipe.steps))?),
        };

        if update.clone().effective().is_none() {
            writeln!(self.output, "No changes made.")?;
            return Ok(());
        }

        if self
            .repository
            .update(&recipe.id.to_string(), update)
            .await?
        {
            writeln!(self.output, "\u{2713} Recipe updated successfully.")?;
        } else {
            writeln!(self.output, "No changes made.")?;
        }
        Ok(())
    }

    async fn delete_recipe(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- DELETE RECIPE ---")?;
        let Some(recipe) = self.prompt_existing("Enter Recipe ID to delete: ").await? else {
            return Ok(());
        };

        writeln!(self.output, "\nRecipe to delete:")?;
        writeln!(self.output, "Name: {}", recipe.name)?;
        let confirm = self
            .prompt_or_empty("\nAre you sure you want to delete this recipe? (yes/no): ")?
            .to_lowercase();

        if confirm != "yes" {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(());
        }

        if self.repository.delete_by_id(&recipe.id.to_string()).await? > 0 {
            writeln!(self.output, "\u{2713} Recipe deleted successfully.")?;
        } else {
            writeln!(self.output, "\u{2717} Failed to delete recipe.")?;
        }
        Ok(())
    }

    async fn count_recipes(&mut self) -> Result<()> {
        let count = self.repository.count().await?;
        writeln!(self.output, "\nTotal recipes in database: {count}")?;
        Ok(())
    }

    async fn delete_all(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- DELETE ALL RECIPES ---")?;
        let count = self.repository.count().await?;
        if count == 0 {
            writeln!(self.output, "No recipes to delete.")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "You are about to delete ALL {count} recipes!"
        )?;
        let confirm = self.prompt_or_empty(&format!("Type '{DELETE_ALL_PHRASE}' to confirm: "))?;

        if confirm == DELETE_ALL_PHRASE {
            let deleted = self.repository.delete_all().await?;
            writeln!(self.output, "\u{2713} Deleted {deleted} recipes.")?;
        } else {
            writeln!(self.output, "Deletion cancelled.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn test_ask_trims_and_detects_eof() {
        let mut input = Cursor::new("  hello  \n");
        let mut output = Vec::new();

        let answer = ask(&mut input, &mut output, "Say: ").unwrap();
        assert_eq!(answer.as_deref(), Some("hello"));
        assert_eq!(String::from_utf8(output.clone()).unwrap(), "Say: ");

        assert_eq!(ask(&mut input, &mut output, "Again: ").unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_choice_and_exit() {
        let repository = RecipeRepository::new(Arc::new(MemoryStore::new()));
        let mut console = Console::new(repository, Cursor::new("9\n\n8\n"), Vec::new());

        console.run().await.unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Invalid choice. Please enter a number between 1-8."));
        assert!(output.ends_with("Goodbye!\n"));
    }
}
