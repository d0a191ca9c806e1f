use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::{
    config::Settings,
    db::models::{Recipe, RecipeUpdate},
    error::Error,
    repository::RecipeRepository,
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub repository: RecipeRepository,
    pub settings: Settings,
}

/// Deserialize optional string, treating empty strings as None
fn deserialize_optional_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Form submitted by the add and update forms
#[derive(Debug, Default, Deserialize)]
pub struct RecipeForm {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub ingredients: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub steps: Option<String>,
}

impl From<RecipeForm> for RecipeUpdate {
    fn from(form: RecipeForm) -> Self {
        RecipeUpdate {
            name: form.name,
            ingredients: form.ingredients,
            steps: form.steps,
        }
    }
}

/// Recipe listing template
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    recipes: Vec<Recipe>,
}

/// GET / - List every recipe
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let recipes = state.repository.list_all().await?;
    debug!("Rendering {} recipes", recipes.len());

    let template = IndexTemplate { recipes };

    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}

/// POST /add - Create a recipe from the form
pub async fn add_recipe(
    State(state): State<AppState>,
    Form(form): Form<RecipeForm>,
) -> Result<Redirect> {
    let Some(name) = form.name else {
        warn!("Rejected recipe without a name");
        return Err(Error::Validation(
            "Recipe name cannot be empty".to_string(),
        ));
    };

    let id = state
        .repository
        .create(
            name,
            form.ingredients.unwrap_or_default(),
            form.steps.unwrap_or_default(),
        )
        .await?;
    debug!("Added recipe {}", id);

    Ok(Redirect::to("/"))
}

/// GET|POST /delete/:id - Delete a recipe
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let deleted = state.repository.delete_by_id(&id).await?;
    if deleted == 0 {
        debug!("Delete requested for unknown recipe {}", id);
    }

    Ok(Redirect::to("/"))
}

/// POST /update/:id - Update the submitted, non-empty fields of a recipe
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RecipeForm>,
) -> Result<Redirect> {
    let changed = state.repository.update(&id, form.into()).await?;
    debug!("Update of recipe {} changed fields: {}", id, changed);

    Ok(Redirect::to("/"))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub store: String,
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let store_healthy = match state.repository.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Readiness probe failed: {}", e.log_safe());
            false
        }
    };

    Json(ReadinessResponse {
        ready: store_healthy,
        store: if store_healthy { "ok" } else { "error" }.to_string(),
    })
}
