pub mod config;
pub mod db;
pub mod error;

// Data-access core
pub mod repository;

// Entry points
pub mod cli;
pub mod console;
pub mod web;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use repository::RecipeRepository;
