//! Product catalog port (read side).

use async_trait::async_trait;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, ProductId};

/// Read-only access to the equipment catalog.
///
/// The catalog is seeded out-of-band and immutable at runtime; the
/// reservation core only ever resolves and lists products.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Resolves the given ids, in no particular order.
    ///
    /// Ids with no catalog entry are simply absent from the result; the
    /// caller decides whether a missing product is an error.
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;

    /// Lists the whole catalog.
    async fn list_all(&self) -> Result<Vec<Product>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_catalog_is_object_safe() {
        fn _accepts_dyn(_catalog: &dyn ProductCatalog) {}
    }
}
