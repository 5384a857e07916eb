//! Pharmacy storefront domain types and logic.
//!
//! This crate provides the client-side core of the medicine shop:
//!
//! - **Catalog**: Medicine records as served by the catalog service
//! - **Cart**: The cart store, its line items and derived selectors
//! - **Search**: The shop listing pipeline (filter, sort, paginate)
//! - **Checkout**: Validation, order payload and the submission flow
//! - **Services**: Collaborator traits for catalog, orders and uploads
//!
//! # Example
//!
//! ```rust
//! use medishop_commerce::prelude::*;
//!
//! let mut store = CartStore::new();
//! store
//!     .add_item(CartLineItem::new("A", "Napa 500mg", Money::from_cents(1000), 2))
//!     .unwrap();
//! store
//!     .add_item(CartLineItem::new("A", "Napa 500mg", Money::from_cents(1000), 3))
//!     .unwrap();
//!
//! assert_eq!(store.item_count(), 1);
//! assert_eq!(store.total(), Ok(Money::from_cents(5000)));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod services;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{related_medicines, Medicine};

    // Cart
    pub use crate::cart::{
        select_is_in_cart, select_item_count, select_requires_prescription, select_total,
        select_unit_count, CartLineItem, CartState, CartStore, QuantityPicker,
        MAX_QUANTITY_PER_ITEM,
    };
    #[cfg(feature = "storage")]
    pub use crate::cart::PersistentCart;

    // Checkout
    pub use crate::checkout::{
        CheckoutError, CheckoutFlow, CheckoutForm, CheckoutOutcome, Customer, OrderProduct,
        OrderRequest, OrderResponse, OrderSummary, PaymentMethod, PrescriptionFile, ShippingDetails,
        ValidationError,
    };

    // Search
    pub use crate::search::{CartButton, ListingEntry, Pagination, ShopPage, ShopQuery, SortOption};

    // Services
    pub use crate::services::{CatalogService, OrderService, ServiceError, UploadService};
}
