//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use database::mongodb::{Collection, Database};
use futures::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{Document, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CategoryId, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

pub const COLLECTION_NAME: &str = "categories";
pub const NAME_INDEX: &str = "idx_name_unique";

const DUPLICATE_KEY: i32 = 11000;

/// Stored shape of a category
#[derive(Debug, Serialize, Deserialize)]
struct CategoryDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    description: String,
}

impl From<CategoryDocument> for Category {
    fn from(doc: CategoryDocument) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            description: doc.description,
        }
    }
}

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<CategoryDocument>,
}

impl MongoCategoryRepository {
    /// ```ignore
    /// let db = client.database("category_service");
    /// let repo = MongoCategoryRepository::new(db);
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<CategoryDocument>(collection_name);
        Self { collection }
    }

    /// Create the unique index on `name`. Idempotent.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> CategoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(NAME_INDEX.to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;

        tracing::info!(index = NAME_INDEX, "Category indexes ready");
        Ok(())
    }

    /// Case-insensitive literal substring match on `name`
    fn build_filter(filter: &CategoryFilter) -> Document {
        match filter.name_pattern() {
            Some(pattern) => doc! {
                "name": { "$regex": regex::escape(pattern), "$options": "i" }
            },
            None => doc! {},
        }
    }

    fn build_update(input: UpdateCategory) -> Document {
        let mut set = doc! {};

        if let Some(name) = input.name {
            set.insert("name", name);
        }
        if let Some(description) = input.description {
            set.insert("description", description);
        }

        doc! { "$set": set }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        let cursor = self.collection.find(Self::build_filter(&filter)).await?;
        let documents: Vec<CategoryDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let document = CategoryDocument {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
        };

        match self.collection.insert_one(&document).await {
            Ok(_) => {
                tracing::info!(category_id = %document.id, "Category created");
                Ok(document.into())
            }
            Err(e) if is_duplicate_key(&e) => Err(CategoryError::DuplicateName(document.name)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: CategoryId,
        input: UpdateCategory,
    ) -> CategoryResult<Option<Category>> {
        let filter = doc! { "_id": id.as_object_id() };

        if input.is_empty() {
            let found = self.collection.find_one(filter).await?;
            return Ok(found.map(Category::from));
        }

        let updated = self
            .collection
            .find_one_and_update(filter, Self::build_update(input))
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(category_id = %id, "Category updated");
        }
        Ok(updated.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CategoryId) -> CategoryResult<Option<Category>> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": id.as_object_id() })
            .await?;

        if removed.is_some() {
            tracing::info!(category_id = %id, "Category deleted");
        }
        Ok(removed.map(Category::from))
    }
}
