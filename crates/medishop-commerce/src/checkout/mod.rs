//! Checkout module.
//!
//! Contains the checkout form, its validation, the order payload, the
//! submission flow and the customer's order history.

mod error;
mod flow;
mod form;
mod order;
mod payment;
mod shipping;

pub use error::{CheckoutError, ValidationError};
pub use flow::{CheckoutFlow, CheckoutOutcome};
pub use form::{validate, CheckoutForm, Customer, PrescriptionFile, ValidatedForm};
pub use order::{
    OrderHistoryResponse, OrderProduct, OrderRequest, OrderResponse, OrderSummary, OrderedProduct,
    OrderedProductRef,
};
pub use payment::PaymentMethod;
pub use shipping::ShippingDetails;
