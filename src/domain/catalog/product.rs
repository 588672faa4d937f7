//! Product catalog entry.
//!
//! Products are the rentable equipment on offer. The catalog is a closed
//! set: reservations reference products by id, and a product is immutable
//! once any reservation points at it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ProductId, ValidationError};

/// The fixed set of rentable equipment kinds.
///
/// Matches the seeded catalog one-to-one; there is no dynamic product
/// creation in this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    JetSki,
    Atv,
    DivingGear,
    SurfboardAdult,
    SurfboardKid,
}

impl ProductKind {
    /// Stable string form used in storage and DTOs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::JetSki => "jet_ski",
            ProductKind::Atv => "atv",
            ProductKind::DivingGear => "diving_gear",
            ProductKind::SurfboardAdult => "surfboard_adult",
            ProductKind::SurfboardKid => "surfboard_kid",
        }
    }

    /// Parses the stable string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "jet_ski" => Ok(ProductKind::JetSki),
            "atv" => Ok(ProductKind::Atv),
            "diving_gear" => Ok(ProductKind::DivingGear),
            "surfboard_adult" => Ok(ProductKind::SurfboardAdult),
            "surfboard_kid" => Ok(ProductKind::SurfboardKid),
            other => Err(ValidationError::invalid_format(
                "product_kind",
                format!("unknown product kind '{}'", other),
            )),
        }
    }

    /// All catalog kinds, in seeding order.
    pub fn all() -> [ProductKind; 5] {
        [
            ProductKind::JetSki,
            ProductKind::Atv,
            ProductKind::DivingGear,
            ProductKind::SurfboardAdult,
            ProductKind::SurfboardKid,
        ]
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog entry for one kind of rentable equipment.
///
/// # Invariants
///
/// - `unit_price` is positive
/// - `max_people >= 1`
/// - `max_consecutive_slots >= 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier referenced by reservation line items.
    pub id: ProductId,

    /// Which equipment this entry describes.
    pub kind: ProductKind,

    /// Price per unit per slot, in the operation's pricing currency.
    pub unit_price: f64,

    /// Whether each rented unit requires a helmet per person.
    pub requires_helmet: bool,

    /// Whether each rented unit requires a life vest per person.
    pub requires_vest: bool,

    /// Maximum people a single line item may book for this product.
    pub max_people: u32,

    /// Maximum consecutive 30-minute slots a line item may span.
    pub max_consecutive_slots: u32,

    /// Human-readable description shown in the catalog listing.
    pub description: String,
}

impl Product {
    /// The seeded catalog: the five entries the operation actually rents.
    ///
    /// Prices and safety flags follow the operation's rate card: jet skis
    /// and quads carry safety-equipment requirements, boards and diving
    /// gear do not.
    pub fn seed_catalog() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::new(),
                kind: ProductKind::JetSki,
                unit_price: 100.0,
                requires_helmet: true,
                requires_vest: true,
                max_people: 2,
                max_consecutive_slots: 3,
                description: "Jet ski for 1-2 people with life vest".to_string(),
            },
            Product {
                id: ProductId::new(),
                kind: ProductKind::Atv,
                unit_price: 80.0,
                requires_helmet: true,
                requires_vest: false,
                max_people: 2,
                max_consecutive_slots: 3,
                description: "Quad bike for 1-2 people with helmet".to_string(),
            },
            Product {
                id: ProductId::new(),
                kind: ProductKind::DivingGear,
                unit_price: 50.0,
                requires_helmet: false,
                requires_vest: false,
                max_people: 1,
                max_consecutive_slots: 3,
                description: "Complete diving set for one person".to_string(),
            },
            Product {
                id: ProductId::new(),
                kind: ProductKind::SurfboardAdult,
                unit_price: 40.0,
                requires_helmet: false,
                requires_vest: false,
                max_people: 1,
                max_consecutive_slots: 3,
                description: "Adult surfboard".to_string(),
            },
            Product {
                id: ProductId::new(),
                kind: ProductKind::SurfboardKid,
                unit_price: 30.0,
                requires_helmet: false,
                requires_vest: false,
                max_people: 1,
                max_consecutive_slots: 3,
                description: "Kids surfboard".to_string(),
            },
        ]
    }
}
