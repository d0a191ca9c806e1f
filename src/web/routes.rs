use axum::http::{header, HeaderValue};
use axum::{routing::get, routing::post, Router};
use tower_http::{
    limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::web::handlers::{self, AppState};

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let max_body = state.settings.server.max_request_body_size;

    // Recipe pages and form targets; every mutation redirects back to /
    let web_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/add", post(handlers::add_recipe))
        .route(
            "/delete/:id",
            get(handlers::delete_recipe).post(handlers::delete_recipe),
        )
        .route("/update/:id", post(handlers::update_recipe))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(web_routes)
        .merge(health_routes)
        .layer(
            // Request body size limit - prevent memory exhaustion from large payloads
            RequestBodyLimitLayer::new(max_body),
        )
        .layer(
            // Security headers
            SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; style-src 'self' 'unsafe-inline'; object-src 'none'; base-uri 'self'",
            ),
        ))
        .layer(
            // Tracing
            TraceLayer::new_for_http(),
        )
}
