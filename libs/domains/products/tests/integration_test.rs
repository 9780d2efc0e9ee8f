//! Integration tests for the Products domain
//!
//! These run against real PostgreSQL via testcontainers to check:
//! - the migration matches the sea-orm entity
//! - NUMERIC(10, 2) round-trips values at two decimal places
//! - sequence-backed ids are never reused
//! - rejected writes leave the table untouched
//!
//! Run with `cargo test -p domain_products -- --ignored` (requires Docker).

use domain_products::*;
use rust_decimal::Decimal;
use serde_json::json;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn new_product(builder: &TestDataBuilder, suffix: &str) -> NewProduct {
    NewProduct {
        name: builder.name("product", suffix),
        description: "Integration test product".to_string(),
        value: Decimal::new(29_999, 2),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = new_product(&builder, "main");
    let created = repo.create(input.clone()).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, input.name);
    assert_eq!(created.value.to_string(), "299.99");

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");
    assert_eq!(retrieved, created);

    assert!(repo.get_by_id(created.id + 1000).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_value_is_stored_with_two_decimal_places() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("two_places");

    let created = repo
        .create(NewProduct {
            value: Decimal::new(5, 0),
            ..new_product(&builder, "five")
        })
        .await
        .unwrap();

    let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(validation::serialize(&stored)["value"], "5.00");
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_list_returns_insertion_order() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_order");

    for suffix in ["c", "a", "b"] {
        repo.create(new_product(&builder, suffix)).await.unwrap();
    }

    let products = repo.list().await.unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();

    assert_ascending(&ids, "list order");
    assert_eq!(products[0].name, builder.name("product", "c"));
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_update_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update");

    let created = repo.create(new_product(&builder, "main")).await.unwrap();

    let updated = repo
        .update(
            created.id,
            ProductPatch {
                value: Some(Decimal::new(19_999, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.value.to_string(), "199.99");

    let result = repo.update(created.id + 1000, ProductPatch::default()).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_delete_product_and_ids_are_not_reused() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    repo.create(new_product(&builder, "a")).await.unwrap();
    let second = repo.create(new_product(&builder, "b")).await.unwrap();

    assert!(repo.delete(second.id).await.unwrap());
    assert!(!repo.delete(second.id).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 1);

    let third = repo.create(new_product(&builder, "c")).await.unwrap();
    assert!(third.id > second.id, "sequence ids must not be reused");
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_service_rejects_invalid_value_without_persisting() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let result = service
        .create_product(&json!({
            "name": "Botina",
            "description": "Botina de couro bonita",
            "value": 299.999
        }))
        .await;

    assert!(matches!(result, Err(ProductError::Validation(_))));
    assert_eq!(service.count_products().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_service_replace_and_patch() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let created = service
        .create_product(&json!({
            "name": "Botina",
            "description": "Botina de couro bonita",
            "value": 299.99
        }))
        .await
        .unwrap();

    let patched = service
        .patch_product(created.id, &json!({ "value": 199.99 }))
        .await
        .unwrap();
    assert_eq!(patched.name, "Botina");
    assert_eq!(patched.description, "Botina de couro bonita");
    assert_eq!(patched.value.to_string(), "199.99");

    let replaced = service
        .replace_product(
            created.id,
            &json!({ "name": "Sapato", "description": "Sapato social", "value": "150" }),
        )
        .await
        .unwrap();
    assert_eq!(
        validation::serialize(&replaced),
        json!({
            "id": created.id,
            "name": "Sapato",
            "description": "Sapato social",
            "value": "150.00"
        })
    );
}

// ============================================================================
// Concurrent Operations Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_concurrent_creates_get_distinct_ids() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("concurrent");

    let mut handles = vec![];
    for i in 0..5 {
        let repo = PgProductRepository::new(db.connection());
        let input = new_product(&builder, &format!("concurrent-{}", i));
        handles.push(tokio::spawn(async move { repo.create(input).await }));
    }

    let mut ids: Vec<i64> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap().expect("concurrent create should succeed").id)
        .collect();
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 5, "every create should get its own id");
}
