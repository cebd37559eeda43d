//! MongoDB repository tests against a real server
//!
//! Each test starts its own MongoDB container, so they are ignored by default:
//! `cargo test -p domain_categories -- --ignored` (requires Docker).

use domain_categories::*;
use test_utils::assertions::assert_some;
use test_utils::{TestDataBuilder, TestMongo};

async fn repository(mongo: &TestMongo, test_name: &str) -> MongoCategoryRepository {
    let builder = TestDataBuilder::from_test_name(test_name);
    let repo = MongoCategoryRepository::new(mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

fn create_input(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        description: format!("Ini adalah {}.", name.to_lowercase()),
    }
}

fn filter(name: &str) -> CategoryFilter {
    CategoryFilter {
        name: Some(name.to_string()),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_rejects_duplicate_create() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_duplicate").await;

    repo.create(create_input("Senjata Tajam")).await.unwrap();
    let err = repo.create(create_input("Senjata Tajam")).await.unwrap_err();

    assert!(matches!(err, CategoryError::DuplicateName(name) if name == "Senjata Tajam"));
    assert_eq!(repo.list(CategoryFilter::default()).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_init_indexes_is_idempotent() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_indexes").await;

    repo.init_indexes().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_filter_is_literal_case_insensitive_substring() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_filter").await;

    repo.create(create_input("Senjata Api")).await.unwrap();
    repo.create(create_input("Senjata Tajam")).await.unwrap();
    repo.create(create_input("Senjata (Berat)")).await.unwrap();

    assert_eq!(repo.list(filter("senjata")).await.unwrap().len(), 3);
    assert_eq!(repo.list(filter("")).await.unwrap().len(), 3);

    let api = repo.list(filter("API")).await.unwrap();
    assert_eq!(api.len(), 1);
    assert_eq!(api[0].name, "Senjata Api");

    let parens = repo.list(filter("(berat)")).await.unwrap();
    assert_eq!(parens.len(), 1);
    assert!(repo.list(filter("senjata.*")).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_is_partial_and_returns_new_document() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_update").await;
    let api = repo.create(create_input("Senjata Api")).await.unwrap();

    let updated = repo
        .update(
            api.id,
            UpdateCategory {
                description: Some("Ini adalah senjata api berat.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let updated = assert_some(updated, "update existing category");

    assert_eq!(updated.id, api.id);
    assert_eq!(updated.name, "Senjata Api");
    assert_eq!(updated.description, "Ini adalah senjata api berat.");

    let unchanged = repo.update(api.id, UpdateCategory::default()).await.unwrap();
    assert_eq!(assert_some(unchanged, "empty update"), updated);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_and_rename_collision() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_update_errors").await;
    repo.create(create_input("Senjata Api")).await.unwrap();
    let tajam = repo.create(create_input("Senjata Tajam")).await.unwrap();

    let missing = repo
        .update(CategoryId::new(), UpdateCategory::default())
        .await
        .unwrap();
    assert!(missing.is_none());

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
#[ignore = "requires Docker"]
async fn test_delete_returns_removed_document() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_delete").await;
    let api = repo.create(create_input("Senjata Api")).await.unwrap();

    let removed = assert_some(repo.delete(api.id).await.unwrap(), "delete existing");
    assert_eq!(removed.name, "Senjata Api");

    assert!(repo.delete(api.id).await.unwrap().is_none());
    assert!(repo.list(CategoryFilter::default()).await.unwrap().is_empty());
}
