use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::Service;

/// Flat tax applied to every booking (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Derived price of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

pub struct PricingEngine;

impl PricingEngine {
    /// Prices the selected service; no selection prices at zero.
    pub fn price(service: Option<&Service>) -> PriceBreakdown {
        let subtotal = service.map(|svc| svc.price).unwrap_or(Decimal::ZERO);
        let tax = round2(subtotal * TAX_RATE);
        let total = round2(subtotal + tax);
        PriceBreakdown {
            subtotal,
            tax,
            total,
        }
    }

    pub fn total(service: Option<&Service>) -> Decimal {
        Self::price(service).total
    }
}

/// Rounds to cents, halves away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
