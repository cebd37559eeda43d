//! API routes module

pub mod categories;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    compose(categories::router(state), health::router(state.clone()))
}

fn compose(categories: Router, health: Router) -> Router {
    Router::new().nest("/categories", categories).merge(health)
}
