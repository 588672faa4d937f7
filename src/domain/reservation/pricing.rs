//! Pricing engine.
//!
//! Pure and deterministic: a priced bundle in, a total out. No rounding
//! happens here; amounts stay at full `f64` precision until the payment
//! boundary converts to the smallest currency unit via [`round_to_cents`].

/// Multiplier applied once when a bundle spans more than one line item.
pub const BUNDLE_DISCOUNT: f64 = 0.9;

/// Multiplier applied when storm insurance is requested.
pub const STORM_INSURANCE_SURCHARGE: f64 = 1.2;

/// One line of a bundle, already resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteLine {
    pub unit_price: f64,
    pub quantity: u32,
    pub slot_count: u32,
}

/// Computes the total price of a bundle.
///
/// Fixed order of operations: sum the per-line subtotals
/// (`unit_price x quantity x slot_count`), then apply the 10% bundle
/// discount iff the bundle has more than one line item, then apply the
/// flat 20% storm-insurance surcharge iff requested. The discount is a
/// bundling incentive on the whole total, not a per-item rebate.
pub fn quote(lines: &[QuoteLine], storm_insurance: bool) -> f64 {
    let mut total: f64 = lines
        .iter()
        .map(|line| line.unit_price * f64::from(line.quantity) * f64::from(line.slot_count))
        .sum();

    if lines.len() > 1 {
        total *= BUNDLE_DISCOUNT;
    }

    if storm_insurance {
        total *= STORM_INSURANCE_SURCHARGE;
    }

    total
}

/// Rounds an amount to the smallest currency unit.
///
/// Only the payment-gateway boundary calls this; the engine itself never
/// rounds.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
