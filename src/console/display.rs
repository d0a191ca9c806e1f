use std::io::Write;

use crate::db::models::Recipe;

/// Write the four recipe fields, one per line, each prefixed with `indent`
pub fn write_recipe<W: Write>(out: &mut W, recipe: &Recipe, indent: &str) -> std::io::Result<()> {
    writeln!(out, "{indent}ID: {}", recipe.id)?;
    writeln!(out, "{indent}Name: {}", recipe.name)?;
    writeln!(out, "{indent}Ingredients: {}", recipe.ingredients)?;
    writeln!(out, "{indent}Steps: {}", recipe.steps)?;
    Ok(())
}
