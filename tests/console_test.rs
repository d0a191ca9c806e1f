use recipebox::console::Console;
use recipebox::db::{init_pool, MemoryStore, SqliteStore};
use recipebox::RecipeRepository;
use std::io::Cursor;
use std::sync::Arc;

async fn run_session(repo: &RecipeRepository, script: &str) -> String {
    let mut console = Console::new(repo.clone(), Cursor::new(script.to_string()), Vec::new());
    console.run().await.expect("console session failed");
    String::from_utf8(console.into_output()).unwrap()
}

#[tokio::test]
async fn test_add_then_find() {
    let repo = RecipeRepository::new(Arc::new(MemoryStore::new()));

    let output = run_session(
        &repo,
        "2\nPasta\nPasta, Sauce, Cheese\nBoil pasta, add sauce, add cheese\n\n8\n",
    )
    .await;
    assert!(output.contains("Recipe added successfully with ID:"));

    let recipes = repo.list_all().await.unwrap();
    assert_eq!(recipes.len(), 1);
    let id = recipes[0].id.to_string();

    let output = run_session(&repo, &format!("3\n{id}\n\n8\n")).await;
    assert!(output.contains("Found Recipe:"));
    assert!(output.contains("   Name: Pasta"));
    assert!(output.contains("   Steps: Boil pasta, add sauce, add cheese"));
}

#[tokio::test]
async fn test_add_with_empty_name_does_nothing() {
    let repo = RecipeRepository::new(Arc::new(MemoryStore::new()));

    let output = run_session(&repo, "2\n\n\n8\n").await;
    assert!(output.contains("Recipe name cannot be empty!"));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_distinguishes_malformed_from_missing() {
    let repo = RecipeRepository::new(Arc::new(MemoryStore::new()));

    let output = run_session(&repo, "3\nnot-an-id\n\n8\n").await;
    assert!(output.contains("Invalid ID format"));
    assert!(!output.contains("Recipe not found."));

    let output = run_session(&repo, "3\n0b9d6f7e-3c1a-4f6e-9a0b-2d4c6e8f1a3b\n\n8\n").await;
    assert!(output.contains("Recipe not found."));
    assert!(!output.contains("Invalid ID format"));

    let output = run_session(&repo, "3\n\n\n8\n").await;
    assert!(output.contains("Recipe ID cannot be empty!"));
}

#[tokio::test]
async fn test_update_keeps_blank_answers() {
    let repo = RecipeRepository::new(Arc::new(MemoryStore::new()));
    let id = repo
        .create("Pasta", "Pasta, Sauce", "Boil")
        .await
        .unwrap()
        .to_string();

    let output = run_session(&repo, &format!("4\n{id}\n\nPasta, Pesto\n\n\n8\n")).await;
    assert!(output.contains("Current values:"));
    assert!(output.contains("Recipe updated successfully."));

    let recipe = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(recipe.name, "Pasta");
    assert_eq!(recipe.ingredients, "Pasta, Pesto");
    assert_eq!(recipe.steps, "Boil");

    let output = run_session(&repo, &format!("4\n{id}\n\n\n\n\n8\n")).await;
    assert!(output.contains("No changes made."));
}

#[tokio::test]
async fn test_delete_asks_for_confirmation() {
    let repo = RecipeRepository::new(Arc::new(MemoryStore::new()));
    let id = repo.create("Pasta", "", "").await.unwrap().to_string();

    let output = run_session(&repo, &format!("5\n{id}\nno\n\n8\n")).await;
    assert!(output.contains("Deletion cancelled."));
    assert_eq!(repo.count().await.unwrap(), 1);

    let output = run_session(&repo, &format!("5\n{id}\nYes\n\n8\n")).await;
    assert!(output.contains("Recipe deleted successfully."));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_all_requires_exact_phrase() {
    let repo = RecipeRepository::new(Arc::new(MemoryStore::new()));

    let output = run_session(&repo, "7\n\n8\n").await;
    assert!(output.contains("No recipes to delete."));

    for name in ["A", "B", "C"] {
        repo.create(name, "", "").await.unwrap();
    }

    let output = run_session(&repo, "7\ndelete all\n\n8\n").await;
    assert!(output.contains("You are about to delete ALL 3 recipes!"));
    assert!(output.contains("Deletion cancelled."));
    assert_eq!(repo.count().await.unwrap(), 3);

    let output = run_session(&repo, "7\nDELETE ALL\n\n6\n\n8\n").await;
    assert!(output.contains("Deleted 3 recipes."));
    assert!(output.contains("Total recipes in database: 0"));
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let repo = RecipeRepository::new(Arc::new(MemoryStore::new()));

    let output = run_session(&repo, "1\n").await;
    assert!(output.contains("No recipes found."));
    assert!(!output.contains("Goodbye!"));
}

#[tokio::test]
async fn test_store_failure_keeps_menu_running() {
    // No migrations: every store call fails
    let pool = init_pool("sqlite::memory:").await.unwrap();
    let repo = RecipeRepository::new(Arc::new(SqliteStore::new(pool)));

    let output = run_session(&repo, "6\n\n9\n\n8\n").await;
    assert!(output.contains("Database error"));
    assert!(output.contains("Invalid choice. Please enter a number between 1-8."));
    assert!(output.contains("Goodbye!"));
}
