//! Category Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CategoryId, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Category service providing business logic operations
///
/// Holds no state of its own between requests; every call goes to the repository.
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        self.repository.list(filter).await
    }

    /// Create a category. A duplicate is reported under the attempted name.
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        let attempted_name = input.name.clone();

        match self.repository.create(input).await {
            Err(CategoryError::DuplicateName(_)) => {
                Err(CategoryError::DuplicateName(attempted_name))
            }
            result => result,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        self.repository
            .update(id, input)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    /// Delete a category, returning it as it was before removal
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> CategoryResult<Category> {
        self.repository
            .delete(id)
            .await?
            .ok_or(CategoryError::NotFound)
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
