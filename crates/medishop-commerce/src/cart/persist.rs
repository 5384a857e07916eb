//! Cart persistence across sessions.

use crate::cart::{CartAccess, CartLineItem, CartState, CartStore};
use crate::error::CommerceError;
use crate::ids::ProductId;
use medishop_cache::{cache_key, Cache};
use tracing::{debug, warn};

/// Default key the cart items are saved under.
pub fn default_cart_key() -> String {
    cache_key!("medishop", "cart")
}

/// A [`CartStore`] that writes its items to a [`Cache`] after every change.
///
/// Items are saved as a flat JSON list under a single key. Each change is
/// applied to a copy of the store and only kept once that copy is saved, so
/// a failed save leaves both memory and storage as they were.
#[derive(Debug)]
pub struct PersistentCart {
    store: CartStore,
    cache: Cache,
    key: String,
}

impl PersistentCart {
    /// Rehydrate from `cache`, falling back to an empty cart when nothing is
    /// saved or the saved value can't be read.
    pub fn load(cache: Cache, key: impl Into<String>) -> Self {
        let key = key.into();
        let store = match cache.get::<Vec<CartLineItem>>(&key) {
            Ok(Some(items)) => {
                debug!(key = %key, count = items.len(), "rehydrated cart");
                CartStore::rehydrate(items)
            }
            Ok(None) => CartStore::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "discarding unreadable saved cart");
                CartStore::new()
            }
        };
        Self { store, cache, key }
    }

    /// The wrapped store, read-only.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Add an item and save. See [`CartStore::add_item`].
    pub fn add_item(&mut self, item: CartLineItem) -> Result<i64, CommerceError> {
        let mut next = self.store.clone();
        let quantity = next.add_item(item)?;
        self.commit(next)?;
        Ok(quantity)
    }

    /// Set a quantity and save. See [`CartStore::update_quantity`].
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        let mut next = self.store.clone();
        let changed = next.update_quantity(product_id, quantity)?;
        if changed {
            self.commit(next)?;
        }
        Ok(changed)
    }

    /// Remove an item and save. See [`CartStore::remove_item`].
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let mut next = self.store.clone();
        let removed = next.remove_item(product_id);
        if removed {
            self.commit(next)?;
        }
        Ok(removed)
    }

    /// Save `next` and make it the current store.
    fn commit(&mut self, next: CartStore) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &next.items())?;
        self.store = next;
        Ok(())
    }
}

impl CartAccess for PersistentCart {
    fn state(&self) -> &CartState {
        self.store.state()
    }

    fn clear(&mut self) -> Result<(), CommerceError> {
        self.commit(CartStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(id: &str, quantity: i64) -> CartLineItem {
        CartLineItem::new(id, id, Money::from_cents(300), quantity)
    }

    #[test]
    fn test_saved_items_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut cart = PersistentCart::load(Cache::open_dir(dir.path()).unwrap(), default_cart_key());
            cart.add_item(item("a", 2)).unwrap();
            cart.add_item(item("b", 1)).unwrap();
            cart.remove_item(&ProductId::new("b")).unwrap();
        }

        let cart = PersistentCart::load(Cache::open_dir(dir.path()).unwrap(), default_cart_key());
        assert_eq!(cart.store().item_count(), 1);
        assert_eq!(cart.store().items()[0].quantity, 2);
        assert_eq!(cart.store().total(), Ok(Money::from_cents(600)));
    }

    #[test]
    fn test_corrupt_data_falls_back_to_empty() {
        let cache = Cache::open_default();
        cache.set_bytes("medishop:cart", b"[{\"oops\"".to_vec()).unwrap();

        let cart = PersistentCart::load(cache, "medishop:cart");
        assert!(cart.store().is_empty());
    }

    #[test]
    fn test_missing_data_is_empty() {
        let cart = PersistentCart::load(Cache::open_default(), default_cart_key());
        assert!(cart.store().is_empty());
    }

    #[test]
    fn test_failed_save_leaves_cart_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let cart_dir = dir.path().join("carts");
        let mut cart = PersistentCart::load(Cache::open_dir(&cart_dir).unwrap(), "k");
        cart.add_item(item("a", 1)).unwrap();
        let before = cart.store().clone();

        std::fs::remove_dir_all(&cart_dir).unwrap();

        assert!(matches!(
            cart.add_item(item("b", 1)),
            Err(CommerceError::CacheError(_))
        ));
        assert!(cart.update_quantity(&ProductId::new("a"), 4).is_err());
        assert!(cart.remove_item(&ProductId::new("a")).is_err());
        assert!(cart.clear().is_err());
        assert_eq!(cart.store(), &before);
    }

    #[test]
    fn test_clear_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = PersistentCart::load(Cache::open_dir(dir.path()).unwrap(), "k");
        cart.add_item(item("a", 1)).unwrap();
        cart.clear().unwrap();

        let reloaded = PersistentCart::load(Cache::open_dir(dir.path()).unwrap(), "k");
        assert!(reloaded.store().is_empty());
    }
}
