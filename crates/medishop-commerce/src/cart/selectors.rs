//! Derived values over the cart state.
//!
//! These are recomputed on every call and never cached on the state.

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Sum of `price * quantity` over all line items.
///
/// An empty cart totals zero in the default currency. Fails with
/// [`CommerceError::Overflow`] rather than returning a clipped figure.
pub fn select_total(state: &CartState) -> Result<Money, CommerceError> {
    let currency = state
        .items
        .first()
        .map(|i| i.price.currency)
        .unwrap_or_else(Currency::default);

    state
        .items
        .iter()
        .try_fold(Money::zero(currency), |acc, item| {
            let subtotal = item.subtotal()?;
            if subtotal.currency != acc.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: acc.currency.code().to_string(),
                    got: subtotal.currency.code().to_string(),
                });
            }
            acc.try_add(&subtotal).ok_or(CommerceError::Overflow)
        })
}

/// Number of distinct line items (the badge count).
pub fn select_item_count(state: &CartState) -> usize {
    state.items.len()
}

/// Sum of quantities across all line items.
pub fn select_unit_count(state: &CartState) -> i64 {
    state.items.iter().map(|i| i.quantity).sum()
}

/// Whether a line item for `product_id` exists.
pub fn select_is_in_cart(state: &CartState, product_id: &ProductId) -> bool {
    state.items.iter().any(|i| &i.product_id == product_id)
}

/// Whether any line item needs a prescription at checkout.
pub fn select_requires_prescription(state: &CartState) -> bool {
    state.items.iter().any(|i| i.prescription_required)
}
