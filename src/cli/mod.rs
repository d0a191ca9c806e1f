// Command-line interface: server, schema setup and scripted recipe commands

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Recipe Box - manage a small recipe collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Create the recipe table
    Migrate,

    /// Show all recipes
    List,

    /// Add a new recipe
    Add {
        /// Recipe name
        #[arg(short, long)]
        name: String,

        /// Ingredients, as free text
        #[arg(short, long, default_value = "")]
        ingredients: String,

        /// Preparation steps, as free text
        #[arg(short, long, default_value = "")]
        steps: String,
    },

    /// Show a recipe by ID
    Show {
        /// Recipe ID
        id: String,
    },

    /// Update some fields of a recipe; omitted or empty fields keep their value
    Update {
        /// Recipe ID
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        ingredients: Option<String>,

        #[arg(short, long)]
        steps: Option<String>,
    },

    /// Delete a recipe by ID
    Delete {
        /// Recipe ID
        id: String,

        /// Skip the yes/no confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Count stored recipes
    Count,

    /// Delete every recipe
    DeleteAll {
        /// Confirmation phrase; must be exactly "DELETE ALL"
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Start the interactive menu
    Interactive,
}
