//! Wires the categories domain to MongoDB.

use axum::Router;
use domain_categories::{CategoryService, MongoCategoryRepository, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoCategoryRepository::new(state.db.clone());
    let service = CategoryService::new(repository);

    handlers::router(service)
}

/// Create the category collection indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoCategoryRepository::new(state.db.clone())
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create category indexes: {}", e))?;

    info!("Category collection indexes created");
    Ok(())
}
