//! In-memory implementation of the product catalog.

use async_trait::async_trait;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, ProductId};
use crate::ports::ProductCatalog;

/// Fixed product list held in memory.
///
/// The catalog is immutable at runtime, so no locking is needed.
pub struct InMemoryProductCatalog {
    products: Vec<Product>,
}

impl InMemoryProductCatalog {
    /// Creates a catalog from an explicit product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Creates a catalog holding the standard seeded rate card.
    pub fn seeded() -> Self {
        Self::new(Product::seed_catalog())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ProductKind;

    #[tokio::test]
    async fn seeded_catalog_lists_the_rate_card() {
        let catalog = InMemoryProductCatalog::seeded();
        let all = catalog.list_all().await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn find_by_ids_resolves_only_known_ids() {
        let catalog = InMemoryProductCatalog::seeded();
        let all = catalog.list_all().await.unwrap();
        let jet_ski = all.iter().find(|p| p.kind == ProductKind::JetSki).unwrap();

        let found = catalog
            .find_by_ids(&[jet_ski.id, ProductId::new()])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ProductKind::JetSki);
    }
}
