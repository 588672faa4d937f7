//! PostgreSQL implementation of the product catalog.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Product, ProductKind};
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::ProductCatalog;

/// PostgreSQL implementation of the ProductCatalog port.
pub struct PostgresProductCatalog {
    pool: PgPool,
}

impl PostgresProductCatalog {
    /// Creates a new PostgresProductCatalog with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    kind: String,
    unit_price: f64,
    requires_helmet: bool,
    requires_vest: bool,
    max_people: i32,
    max_consecutive_slots: i32,
    description: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let kind = ProductKind::parse(&row.kind).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid product kind in row: {}", e),
            )
        })?;

        Ok(Product {
            id: ProductId::from_uuid(row.id),
            kind,
            unit_price: row.unit_price,
            requires_helmet: row.requires_helmet,
            requires_vest: row.requires_vest,
            max_people: row.max_people as u32,
            max_consecutive_slots: row.max_consecutive_slots as u32,
            description: row.description,
        })
    }
}

const PRODUCT_COLUMNS: &str =
    "id, kind, unit_price, requires_helmet, requires_vest, max_people, max_consecutive_slots, description";

#[async_trait]
impl ProductCatalog for PostgresProductCatalog {
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {} FROM products WHERE id = ANY($1)",
            PRODUCT_COLUMNS
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find products: {}", e),
            )
        })?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {} FROM products ORDER BY kind ASC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list products: {}", e),
            )
        })?;

        rows.into_iter().map(Product::try_from).collect()
    }
}
