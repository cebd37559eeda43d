use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CategoryId, CreateCategory, UpdateCategory};

/// Repository trait for Category persistence
///
/// Implementations must keep `name` unique: a create that collides yields
/// [`CategoryError::DuplicateName`], a rename that collides a store error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories whose name matches the filter, in store order
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>>;

    /// Insert a new category with a store-assigned id
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    /// Apply `input` atomically and return the updated category, `None` if missing.
    /// An empty update is a plain lookup.
    async fn update(&self, id: CategoryId, input: UpdateCategory)
    -> CategoryResult<Option<Category>>;

    /// Remove a category and return it as it was, `None` if missing
    async fn delete(&self, id: CategoryId) -> CategoryResult<Option<Category>>;
}

/// In-memory repository for tests and local development
///
/// Keeps insertion order and enforces the unique name the way the store's
/// unique index does.
#[derive(Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;

        Ok(categories
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if categories.iter().any(|c| c.name == input.name) {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let category = Category {
            id: CategoryId::new(),
            name: input.name,
            description: input.description,
        };
        categories.push(category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn update(
        &self,
        id: CategoryId,
        input: UpdateCategory,
    ) -> CategoryResult<Option<Category>> {
        let mut categories = self.categories.write().await;

        if let Some(ref new_name) = input.name {
            let collides = categories
                .iter()
                .any(|c| c.id != id && &c.name == new_name);

            if collides {
                return Err(CategoryError::Database(format!(
                    "E11000 duplicate key error index: idx_name_unique dup key: {{ name: \"{}\" }}",
                    new_name
                )));
            }
        }

        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.apply_update(input);

        tracing::info!(category_id = %id, "Updated category");
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: CategoryId) -> CategoryResult<Option<Category>> {
        let mut categories = self.categories.write().await;

        let removed = categories
            .iter()
            .position(|c| c.id == id)
            .map(|index| categories.remove(index));

        if removed.is_some() {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str) -> CreateCategory {
        CreateCategory {
            name: name.to_string(),
            description: format!("{} description", name),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_insertion_order() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(create_input("Senjata Api")).await.unwrap();
        repo.create(create_input("Senjata Tajam")).await.unwrap();

        let all = repo.list(CategoryFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Senjata Api", "Senjata Tajam"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(create_input("Senjata Tajam")).await.unwrap();

        let err = repo.create(create_input("Senjata Tajam")).await.unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateName(name) if name == "Senjata Tajam"));
        assert_eq!(repo.list(CategoryFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(create_input("senjata")).await.unwrap();
        assert!(repo.create(create_input("Senjata")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryCategoryRepository::new();
        let result = repo
            .update(CategoryId::new(), UpdateCategory::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_rename_collision_is_store_error() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(create_input("Senjata Api")).await.unwrap();
        let tajam = repo.create(create_input("Senjata Tajam")).await.unwrap();

        let err = repo
            .update(
                tajam.id,
                UpdateCategory {
                    name: Some("Senjata Api".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::Database(_)));
    }

    #[tokio::test]
    async fn test_update_to_own_name_is_allowed() {
        let repo = InMemoryCategoryRepository::new();
        let api = repo.create(create_input("Senjata Api")).await.unwrap();

        let updated = repo
            .update(
                api.id,
                UpdateCategory {
                    name: Some("Senjata Api".to_string()),
                    description: Some("same name".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "same name");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_category() {
        let repo = InMemoryCategoryRepository::new();
        let api = repo.create(create_input("Senjata Api")).await.unwrap();

        let removed = repo.delete(api.id).await.unwrap().unwrap();
        assert_eq!(removed.name, "Senjata Api");
        assert!(repo.delete(api.id).await.unwrap().is_none());
        assert!(repo.list(CategoryFilter::default()).await.unwrap().is_empty());
    }
}
