//! Product catalogue.

use std::sync::Arc;

use common::RecordId;

use crate::error::{Result, ShoppingError};
use crate::product::{Product, ProductDraft};
use crate::store::ProductStore;

/// CRUD over catalogue products.
pub struct ProductCatalog {
    products: Arc<dyn ProductStore>,
}

impl ProductCatalog {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<Product> {
        draft.validate()?;
        let product = Product::from_draft(draft);
        self.products.insert(&product).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Product> {
        self.products
            .get(parse_id(id)?)
            .await?
            .ok_or(ShoppingError::NotFound("product"))
    }

    pub async fn update(&self, id: &str, draft: ProductDraft) -> Result<Product> {
        let id = parse_id(id)?;
        draft.validate()?;

        let mut product = self
            .products
            .get(id)
            .await?
            .ok_or(ShoppingError::NotFound("product"))?;
        product.name = draft.name;
        product.price = draft.price;
        product.stock = draft.stock;

        if !self.products.update(&product).await? {
            return Err(ShoppingError::NotFound("product"));
        }
        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.products.delete(parse_id(id)?).await? {
            return Err(ShoppingError::NotFound("product"));
        }
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<RecordId> {
    RecordId::parse(id).map_err(|_| ShoppingError::InvalidId("product"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryProductStore;

    fn catalog() -> ProductCatalog {
        ProductCatalog::new(Arc::new(InMemoryProductStore::new()))
    }

    fn draft(name: &str, price: i64, stock: i64) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let catalog = catalog();
        assert!(catalog.list().await.unwrap().is_empty());

        let mug = catalog.create(draft("Mug", 1500, 10)).await.unwrap();
        let id = mug.id.to_string();
        assert_eq!(catalog.get(&id).await.unwrap(), mug);

        let updated = catalog.update(&id, draft("Big mug", 2500, 4)).await.unwrap();
        assert_eq!(updated.name, "Big mug");
        assert_eq!(updated.created_at, mug.created_at);
        assert_eq!(catalog.list().await.unwrap(), vec![updated]);

        catalog.delete(&id).await.unwrap();
        assert!(matches!(
            catalog.get(&id).await,
            Err(ShoppingError::NotFound("product"))
        ));
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let catalog = catalog();
        let err = catalog.create(draft("", 1, 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "product name is required");

        assert!(matches!(
            catalog.get("xyz").await,
            Err(ShoppingError::InvalidId("product"))
        ));
        assert!(matches!(
            catalog.update(&RecordId::new().to_string(), draft("Mug", 1, 1)).await,
            Err(ShoppingError::NotFound("product"))
        ));
    }
}
