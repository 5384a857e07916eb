//! Shopping cart module.
//!
//! Contains the cart store, its line items, derived selectors and, with the
//! `storage` feature, persistence between sessions.

mod line_item;
#[cfg(feature = "storage")]
mod persist;
mod quantity;
mod selectors;
mod store;

pub use line_item::CartLineItem;
#[cfg(feature = "storage")]
pub use persist::{default_cart_key, PersistentCart};
pub use quantity::QuantityPicker;
pub use selectors::{
    select_is_in_cart, select_item_count, select_requires_prescription, select_total,
    select_unit_count,
};
pub use store::{CartState, CartStore, MAX_QUANTITY_PER_ITEM};

use crate::error::CommerceError;

/// What checkout needs from a cart: read its state, clear it once the
/// order is placed.
pub trait CartAccess {
    fn state(&self) -> &CartState;

    fn clear(&mut self) -> Result<(), CommerceError>;
}

impl CartAccess for CartStore {
    fn state(&self) -> &CartState {
        CartStore::state(self)
    }

    fn clear(&mut self) -> Result<(), CommerceError> {
        CartStore::clear(self);
        Ok(())
    }
}
