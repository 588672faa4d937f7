//! Reservation line items.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProductId, ValidationError};

/// Maximum consecutive slots a single line item may span.
pub const MAX_SLOT_SPAN: u32 = 3;

/// One product position inside a reservation.
///
/// # Invariants
///
/// - `quantity >= 1`
/// - `1 <= slot_count <= MAX_SLOT_SPAN`
///
/// Helmet and vest counts are free-form here; whether they satisfy the
/// product's safety requirements is checked against the resolved product
/// during reservation creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub slot_count: u32,
    pub helmets: u32,
    pub vests: u32,
}

impl LineItem {
    /// Creates a validated line item.
    pub fn new(
        product_id: ProductId,
        quantity: u32,
        slot_count: u32,
        helmets: u32,
        vests: u32,
    ) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::out_of_range("quantity", 1, i32::MAX, 0));
        }
        if slot_count == 0 || slot_count > MAX_SLOT_SPAN {
            return Err(ValidationError::out_of_range(
                "slot_count",
                1,
                MAX_SLOT_SPAN as i32,
                slot_count as i32,
            ));
        }
        Ok(Self {
            product_id,
            quantity,
            slot_count,
            helmets,
            vests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_minimal_item() {
        let item = LineItem::new(ProductId::new(), 1, 1, 0, 0).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.slot_count, 1);
    }

    #[test]
    fn accepts_the_maximum_slot_span() {
        assert!(LineItem::new(ProductId::new(), 2, MAX_SLOT_SPAN, 2, 2).is_ok());
    }

    #[test]
    fn rejects_zero_quantity() {
        assert!(LineItem::new(ProductId::new(), 0, 1, 0, 0).is_err());
    }

    #[test]
    fn rejects_zero_slot_count() {
        assert!(LineItem::new(ProductId::new(), 1, 0, 0, 0).is_err());
    }

    #[test]
    fn rejects_slot_count_above_the_span_cap() {
        let err = LineItem::new(ProductId::new(), 1, 4, 0, 0).unwrap_err();
        assert!(err.to_string().contains("slot_count"));
    }
}
