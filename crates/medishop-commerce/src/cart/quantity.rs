//! Quantity selection before an add-to-cart.

use crate::cart::MAX_QUANTITY_PER_ITEM;
use crate::catalog::Medicine;

/// Quantity chosen on a product page, bounded by 1 and the stock on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityPicker {
    value: i64,
    max: i64,
}

impl QuantityPicker {
    /// Start at 1 with `stock` as the upper bound.
    pub fn new(stock: i64) -> Self {
        Self {
            value: 1,
            max: stock.max(1),
        }
    }

    /// Picker bounded by a medicine's stock, or by the per-item limit when
    /// the stock is unknown.
    pub fn for_medicine(medicine: &Medicine) -> Self {
        Self::new(medicine.quantity.unwrap_or(MAX_QUANTITY_PER_ITEM))
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Largest quantity the picker allows.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Step up unless already at stock.
    pub fn increase(&mut self) -> i64 {
        if self.value < self.max {
            self.value += 1;
        }
        self.value
    }

    /// Step down unless already at 1.
    pub fn decrease(&mut self) -> i64 {
        if self.value > 1 {
            self.value -= 1;
        }
        self.value
    }
}
