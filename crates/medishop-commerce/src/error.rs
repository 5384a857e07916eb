//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and catalog operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Line item has no product identifier.
    #[error("Line item is missing a product id")]
    MissingProductId,

    /// Unit price below zero.
    #[error("Invalid price for {product_id}: {price_cents} cents")]
    NegativePrice {
        product_id: String,
        price_cents: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Product has no stock left.
    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// A subtotal or total does not fit in the money representation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),
}

#[cfg(feature = "storage")]
impl From<medishop_cache::CacheError> for CommerceError {
    fn from(e: medishop_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}
