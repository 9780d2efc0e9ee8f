//! Product Service - Business logic layer

use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;
use crate::validation;

/// Product service providing business logic operations
///
/// Each write is a single validate-then-persist step. Bodies arrive as raw
/// JSON and are validated in full before the repository is touched.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products in insertion order
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self, data))]
    pub async fn create_product(&self, data: &Value) -> ProductResult<Product> {
        let input = validation::validate_new(data)?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Full replace: every field must be present and valid.
    ///
    /// A missing product wins over an invalid body.
    #[instrument(skip(self, data))]
    pub async fn replace_product(&self, id: i64, data: &Value) -> ProductResult<Product> {
        self.ensure_exists(id).await?;
        let input = validation::validate_new(data)?;
        self.repository.update(id, input.into()).await
    }

    /// Partial update: only the supplied fields are validated and changed.
    #[instrument(skip(self, data))]
    pub async fn patch_product(&self, id: i64, data: &Value) -> ProductResult<Product> {
        self.ensure_exists(id).await?;
        let patch = validation::validate_patch(data)?;
        self.repository.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count_products(&self) -> ProductResult<u64> {
        self.repository.count().await
    }

    async fn ensure_exists(&self, id: i64) -> ProductResult<()> {
        self.get_product(id).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewProduct, ProductPatch};
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn botina() -> Product {
        Product {
            id: 1,
            name: "Botina".to_string(),
            description: "Botina de couro bonita".to_string(),
            value: Decimal::new(29_999, 2),
        }
    }

    #[tokio::test]
    async fn test_create_product_persists_validated_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .with(eq(NewProduct {
                name: "Botina".to_string(),
                description: "Botina de couro bonita".to_string(),
                value: Decimal::new(29_999, 2),
            }))
            .times(1)
            .returning(|_| Ok(botina()));

        let service = ProductService::new(mock_repo);
        let product = service
            .create_product(&json!({
                "name": "Botina",
                "description": "Botina de couro bonita",
                "value": "299.99"
            }))
            .await
            .unwrap();

        assert_eq!(product.id, 1);
    }

    #[tokio::test]
    async fn test_create_product_invalid_body_never_reaches_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(&json!({
                "name": "Botina",
                "description": "Botina de couro bonita",
                "value": 299.999
            }))
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(5))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(5).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_replace_missing_product_wins_over_invalid_body() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service.replace_product(9, &json!({})).await;

        assert!(matches!(result, Err(ProductError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_replace_requires_every_field() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(Some(botina())));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .replace_product(1, &json!({ "name": "Outra" }))
            .await;

        match result {
            Err(ProductError::Validation(errors)) => {
                let fields = errors.field_errors();
                assert_eq!(fields.len(), 2);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_patch_forwards_only_supplied_fields() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(Some(botina())));
        mock_repo
            .expect_update()
            .with(
                eq(1),
                eq(ProductPatch {
                    value: Some(Decimal::new(19_999, 2)),
                    ..Default::default()
                }),
            )
            .times(1)
            .returning(|_, patch| {
                let mut product = botina();
                product.apply_patch(patch);
                Ok(product)
            });

        let service = ProductService::new(mock_repo);
        let product = service
            .patch_product(1, &json!({ "value": 199.99 }))
            .await
            .unwrap();

        assert_eq!(product.name, "Botina");
        assert_eq!(product.value.to_string(), "199.99");
    }

    #[tokio::test]
    async fn test_delete_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().with(eq(3)).returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(3).await;

        assert!(matches!(result, Err(ProductError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_count_products() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_count().returning(|| Ok(2));

        let service = ProductService::new(mock_repo);
        assert_eq!(service.count_products().await.unwrap(), 2);
    }
}
