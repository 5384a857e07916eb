//! The cart store.

use crate::cart::{selectors, CartLineItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// The cart's items, unique by product id, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
}

impl CartState {
    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Owner of the cart state. All mutation goes through its operations.
///
/// Quantities are clamped, never rejected: to the item's recorded stock when
/// known, and always to [`MAX_QUANTITY_PER_ITEM`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    state: CartState,
}

impl CartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously saved items.
    ///
    /// Items go through [`CartStore::add_item`], so duplicates merge and
    /// invalid entries are dropped.
    pub fn rehydrate(items: Vec<CartLineItem>) -> Self {
        let mut store = Self::new();
        for item in items {
            let product_id = item.product_id.clone();
            if let Err(e) = store.add_item(item) {
                warn!(product_id = %product_id, error = %e, "dropping saved cart item");
            }
        }
        store
    }

    /// Add an item, merging into an existing line for the same product.
    ///
    /// Returns the line's quantity after the add, which may be lower than
    /// requested when clamped to stock. An add that would take the cart
    /// total past what [`Money`] can hold is rejected with
    /// [`CommerceError::Overflow`] and leaves the cart unchanged.
    pub fn add_item(&mut self, item: CartLineItem) -> Result<i64, CommerceError> {
        if item.product_id.is_empty() {
            return Err(CommerceError::MissingProductId);
        }
        if item.price.is_negative() {
            return Err(CommerceError::NegativePrice {
                product_id: item.product_id.to_string(),
                price_cents: item.price.amount_cents,
            });
        }
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if let Some(first) = self.state.items.first() {
            if first.price.currency != item.price.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: first.price.currency.code().to_string(),
                    got: item.price.currency.code().to_string(),
                });
            }
        }

        let mut next = self.state.clone();
        let quantity = match next
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            Some(existing) => {
                // The newer catalog snapshot carries the fresher stock figure.
                let stock = item.stock_quantity.or(existing.stock_quantity);
                let ceiling = quantity_ceiling(stock);
                if ceiling <= 0 {
                    return Err(CommerceError::OutOfStock(item.product_id.to_string()));
                }
                existing.stock_quantity = stock;
                existing.quantity = existing.quantity.saturating_add(item.quantity).min(ceiling);
                existing.quantity
            }
            None => {
                let ceiling = quantity_ceiling(item.stock_quantity);
                if ceiling <= 0 {
                    return Err(CommerceError::OutOfStock(item.product_id.to_string()));
                }
                let mut item = item.clone();
                item.quantity = item.quantity.min(ceiling);
                let quantity = item.quantity;
                next.items.push(item);
                quantity
            }
        };

        selectors::select_total(&next)?;
        self.state = next;
        debug!(product_id = %item.product_id, quantity, "added to cart");
        Ok(quantity)
    }

    /// Set an item's quantity.
    ///
    /// A quantity of zero or less removes the item. Unknown product ids are
    /// ignored. Returns whether a line item was touched. A quantity whose
    /// subtotal would overflow the cart total is rejected with
    /// [`CommerceError::Overflow`].
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        let Some(index) = self
            .state
            .items
            .iter()
            .position(|i| &i.product_id == product_id)
        else {
            return Ok(false);
        };

        let clamped = quantity.min(quantity_ceiling(self.state.items[index].stock_quantity));
        if clamped <= 0 {
            return Ok(self.remove_item(product_id));
        }

        let mut next = self.state.clone();
        next.items[index].quantity = clamped;
        selectors::select_total(&next)?;
        self.state = next;
        debug!(product_id = %product_id, quantity = clamped, "updated cart quantity");
        Ok(true)
    }

    /// Remove an item from the cart. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.state.items.len();
        self.state.items.retain(|i| &i.product_id != product_id);
        let removed = self.state.items.len() < len_before;
        if removed {
            debug!(product_id = %product_id, "removed cart item");
        }
        removed
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.state.items.clear();
        debug!("cleared cart");
    }

    /// Current state, for selectors and rendering.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.state.items
    }

    /// Get the line item for a product.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.state.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// See [`selectors::select_total`].
    pub fn total(&self) -> Result<Money, CommerceError> {
        selectors::select_total(&self.state)
    }

    /// See [`selectors::select_item_count`].
    pub fn item_count(&self) -> usize {
        selectors::select_item_count(&self.state)
    }

    /// See [`selectors::select_unit_count`].
    pub fn unit_count(&self) -> i64 {
        selectors::select_unit_count(&self.state)
    }

    /// See [`selectors::select_is_in_cart`].
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        selectors::select_is_in_cart(&self.state, product_id)
    }

    /// See [`selectors::select_requires_prescription`].
    pub fn requires_prescription(&self) -> bool {
        selectors::select_requires_prescription(&self.state)
    }
}

fn quantity_ceiling(stock: Option<i64>) -> i64 {
    stock.map_or(MAX_QUANTITY_PER_ITEM, |s| s.min(MAX_QUANTITY_PER_ITEM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn item(id: &str, cents: i64, quantity: i64) -> CartLineItem {
        CartLineItem::new(id, format!("Product {id}"), Money::from_cents(cents), quantity)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CartStore::new();
        assert!(store.is_empty());
        assert_eq!(store.total(), Ok(Money::zero(Currency::USD)));
    }

    #[test]
    fn test_same_product_merges() {
        let mut store = CartStore::new();
        store.add_item(item("A", 1000, 2)).unwrap();
        store.add_item(item("A", 1000, 3)).unwrap();

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.items()[0].quantity, 5);
        assert_eq!(store.total(), Ok(Money::from_cents(5000)));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = CartStore::new();
        store.add_item(item("c", 100, 1)).unwrap();
        store.add_item(item("a", 100, 1)).unwrap();
        store.add_item(item("b", 100, 1)).unwrap();
        store.add_item(item("a", 100, 1)).unwrap();

        let ids: Vec<&str> = store.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_merge_clamps_to_stock() {
        let mut store = CartStore::new();
        store.add_item(item("A", 1000, 3).with_stock(4)).unwrap();
        let quantity = store.add_item(item("A", 1000, 3).with_stock(4)).unwrap();

        assert_eq!(quantity, 4);
        assert_eq!(store.items()[0].quantity, 4);
    }

    #[test]
    fn test_new_item_clamps_to_stock() {
        let mut store = CartStore::new();
        let quantity = store.add_item(item("A", 1000, 10).with_stock(6)).unwrap();
        assert_eq!(quantity, 6);
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let mut store = CartStore::new();
        let result = store.add_item(item("A", 1000, 1).with_stock(0));
        assert_eq!(result, Err(CommerceError::OutOfStock("A".to_string())));
        assert!(store.is_empty());
    }

    #[test]
    fn test_global_limit_clamps() {
        let mut store = CartStore::new();
        store.add_item(item("A", 1, MAX_QUANTITY_PER_ITEM)).unwrap();
        store.add_item(item("A", 1, 5)).unwrap();
        assert_eq!(store.items()[0].quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_preconditions() {
        let mut store = CartStore::new();
        assert_eq!(
            store.add_item(item("", 100, 1)),
            Err(CommerceError::MissingProductId)
        );
        assert!(matches!(
            store.add_item(item("A", -1, 1)),
            Err(CommerceError::NegativePrice { .. })
        ));
        assert_eq!(
            store.add_item(item("A", 100, 0)),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut store = CartStore::new();
        store.add_item(item("A", 100, 1)).unwrap();
        let eur = CartLineItem::new("B", "B", Money::new(100, Currency::EUR), 1);
        assert!(matches!(
            store.add_item(eur),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_update_quantity() {
        let mut store = CartStore::new();
        store.add_item(item("A", 250, 1).with_stock(8)).unwrap();

        assert_eq!(store.update_quantity(&ProductId::new("A"), 5), Ok(true));
        assert_eq!(store.items()[0].quantity, 5);

        assert_eq!(store.update_quantity(&ProductId::new("A"), 50), Ok(true));
        assert_eq!(store.items()[0].quantity, 8);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut store = CartStore::new();
        store.add_item(item("A", 250, 1)).unwrap();
        let before = store.clone();

        assert_eq!(store.update_quantity(&ProductId::new("missing"), 3), Ok(false));
        assert_eq!(store, before);
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        // Two items totalling $42.75.
        let mut a = CartStore::new();
        a.add_item(item("X", 1525, 1)).unwrap();
        a.add_item(item("Y", 1375, 2)).unwrap();
        assert_eq!(a.total(), Ok(Money::from_cents(4275)));
        let mut b = a.clone();

        assert_eq!(a.update_quantity(&ProductId::new("X"), 0), Ok(true));
        b.remove_item(&ProductId::new("X"));

        assert_eq!(a, b);
        assert!(!a.is_in_cart(&ProductId::new("X")));
        assert_eq!(a.total(), Ok(Money::from_cents(2750)));
    }

    #[test]
    fn test_overflowing_add_rejected_without_change() {
        let mut store = CartStore::new();
        store.add_item(item("A", i64::MAX / 2, 1)).unwrap();
        let before = store.clone();

        assert_eq!(
            store.add_item(item("B", i64::MAX / 2, 3)),
            Err(CommerceError::Overflow)
        );
        assert_eq!(
            store.add_item(item("A", i64::MAX / 2, 2)),
            Err(CommerceError::Overflow)
        );
        assert_eq!(store, before);
        assert_eq!(store.total(), Ok(Money::from_cents(i64::MAX / 2)));
    }

    #[test]
    fn test_overflowing_update_rejected_without_change() {
        let mut store = CartStore::new();
        store.add_item(item("A", i64::MAX / 4, 1)).unwrap();
        store.add_item(item("B", 100, 1)).unwrap();
        let before = store.clone();

        assert_eq!(
            store.update_quantity(&ProductId::new("A"), 5),
            Err(CommerceError::Overflow)
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = CartStore::new();
        store.add_item(item("A", 250, 1)).unwrap();
        let before = store.state().clone();

        assert!(!store.remove_item(&ProductId::new("B")));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_clear_resets_selectors() {
        let mut store = CartStore::new();
        store.add_item(item("A", 250, 2)).unwrap();
        store.add_item(item("B", 100, 1).with_prescription(true)).unwrap();
        store.clear();

        assert!(store.items().is_empty());
        assert_eq!(store.total(), Ok(Money::zero(Currency::USD)));
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.unit_count(), 0);
        assert!(!store.requires_prescription());
    }

    #[test]
    fn test_rehydrate_merges_and_drops_invalid() {
        let store = CartStore::rehydrate(vec![
            item("A", 100, 1),
            item("", 100, 1),
            item("A", 100, 2),
            item("B", 100, 0),
        ]);
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.items()[0].quantity, 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn arb_item() -> impl Strategy<Value = CartLineItem> {
        ("[a-e]", 0i64..10_000, 1i64..20, proptest::option::of(1i64..30)).prop_map(
            |(id, cents, quantity, stock)| {
                let mut item =
                    CartLineItem::new(id.as_str(), id.clone(), Money::from_cents(cents), quantity);
                item.stock_quantity = stock;
                item
            },
        )
    }

    proptest! {
        #[test]
        fn items_unique_by_product(items in proptest::collection::vec(arb_item(), 0..40)) {
            let mut store = CartStore::new();
            for item in items {
                let _ = store.add_item(item);
            }
            let ids: HashSet<_> = store.items().iter().map(|i| i.product_id.clone()).collect();
            prop_assert_eq!(ids.len(), store.item_count());
            for item in store.items() {
                prop_assert!(item.quantity >= 1);
                if let Some(stock) = item.stock_quantity {
                    prop_assert!(item.quantity <= stock);
                }
            }
        }

        #[test]
        fn total_independent_of_add_order(
            adds in proptest::collection::vec(("[a-e]", 1i64..10), 0..30),
        ) {
            // Fixed price per product so only order differs.
            let price = |id: &str| Money::from_cents(id.as_bytes()[0] as i64 * 37);
            let mut forward = CartStore::new();
            for (id, q) in &adds {
                forward.add_item(CartLineItem::new(id.as_str(), id.clone(), price(id), *q)).unwrap();
            }
            let mut backward = CartStore::new();
            for (id, q) in adds.iter().rev() {
                backward.add_item(CartLineItem::new(id.as_str(), id.clone(), price(id), *q)).unwrap();
            }
            prop_assert_eq!(forward.total(), backward.total());
            prop_assert_eq!(forward.unit_count(), backward.unit_count());
        }

        #[test]
        fn remove_then_not_in_cart(items in proptest::collection::vec(arb_item(), 1..20), pick in 0usize..20) {
            let mut store = CartStore::new();
            for item in items {
                let _ = store.add_item(item);
            }
            if store.is_empty() {
                return Ok(());
            }
            let target = store.items()[pick % store.item_count()].product_id.clone();
            prop_assert!(store.remove_item(&target));
            prop_assert!(!store.is_in_cart(&target));
        }
    }
}
