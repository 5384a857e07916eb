//! Checkout errors.
//!
//! The `Display` text of each variant is the message shown to the customer.

use crate::checkout::PaymentMethod;
use crate::error::CommerceError;
use crate::services::ServiceError;
use thiserror::Error;

/// Problems found before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please log in to place an order")]
    NotSignedIn,

    /// Blank shipping fields, by name.
    #[error("Please fill all shipping details")]
    MissingShippingDetails(Vec<&'static str>),

    #[error("Prescription is required")]
    PrescriptionRequired,
}

/// Why a checkout did not go through. The cart is unchanged in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order; send the customer back to the shop.
    #[error("Your cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cart total can't be computed exactly.
    #[error("Could not calculate the order total: {0}")]
    Total(CommerceError),

    #[error("Failed to upload prescription image: {0}")]
    Upload(ServiceError),

    /// The order service refused or could not be reached.
    #[error("{}: {message}", failure_prefix(*method))]
    OrderFailed {
        method: PaymentMethod,
        message: String,
    },

    /// Online payment was accepted but no gateway page came back.
    #[error("Payment initiation failed: no payment gateway URL returned")]
    MissingGatewayUrl,
}

impl CheckoutError {
    /// Text for the customer-facing notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the customer can fix this by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, CheckoutError::Validation(_))
    }
}

fn failure_prefix(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::CashOnDelivery => "Order creation failed",
        PaymentMethod::Online => "Payment initiation failed",
    }
}
