//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. CORS is permissive: the browser
//! front-end runs on its own origin during development.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/reports", post(endpoints::reports::upload))
        .route("/reports/:id", get(endpoints::reports::detail))
        .route("/reports/:id/context", get(endpoints::reports::context))
        .route("/summaries", post(endpoints::summaries::create))
        .route("/summaries/:id", get(endpoints::summaries::detail))
        .route("/references", get(endpoints::references::list))
        .route("/references/:name", get(endpoints::references::detail))
        .with_state(ctx)
        .layer(CorsLayer::permissive());

    Router::new().nest("/api", routes)
}
