use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product, ProductPatch},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository.
///
/// Ids come from the `BIGSERIAL` sequence, which never hands out a value twice.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            value: Set(input.value),
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if patch.is_empty() {
            return Ok(model.into());
        }

        let mut active_model = model.into_active_model();
        if let Some(name) = patch.name {
            active_model.name = Set(name);
        }
        if let Some(description) = patch.description {
            active_model.description = Set(description);
        }
        if let Some(value) = patch.value {
            active_model.value = Set(value);
        }

        // The row can disappear between the lookup and the update.
        let updated = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn model(id: i64, name: &str, value: Decimal) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            description: "Botina de couro bonita".to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Botina", Decimal::new(29_999, 2))]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo
            .create(NewProduct {
                name: "Botina".to_string(),
                description: "Botina de couro bonita".to_string(),
                value: Decimal::new(29_999, 2),
            })
            .await
            .unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.value.to_string(), "299.99");
    }

    #[tokio::test]
    async fn test_list_maps_models_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(1, "a", Decimal::new(5, 0)),
                model(2, "b", Decimal::new(1_050, 2)),
            ]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let products = repo.list().await.unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        // Scale is normalised on the way out.
        assert_eq!(products[0].value.to_string(), "5.00");
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let result = repo.update(7, ProductPatch::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_update_of_concurrently_deleted_row_is_not_found() {
        let before = model(5, "Botina", Decimal::new(29_999, 2));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before], Vec::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let result = repo
            .update(
                5,
                ProductPatch {
                    name: Some("Bota".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let before = model(3, "Botina", Decimal::new(29_999, 2));
        let after = model(3, "Botina", Decimal::new(19_999, 2));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before], vec![after]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let updated = repo
            .update(
                3,
                ProductPatch {
                    value: Some(Decimal::new(19_999, 2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Botina");
        assert_eq!(updated.value.to_string(), "199.99");
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_count() {
        let row: BTreeMap<&str, sea_orm::Value> = BTreeMap::from([("num_items", 4i64.into())]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_database_errors_are_mapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, ProductError::Database(msg) if msg.contains("connection reset")));
    }
}
