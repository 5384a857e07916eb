//! Order submission.

use crate::cart::{select_total, CartAccess};
use crate::checkout::{
    validate, CheckoutError, CheckoutForm, Customer, OrderRequest, OrderResponse, PaymentMethod,
};
use crate::money::Money;
use crate::services::{OrderService, ServiceError, UploadService};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of a checkout that went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Cash on delivery order accepted.
    Placed { total: Money },
    /// Online payment started; send the customer to `url`.
    RedirectToGateway { url: String },
}

impl CheckoutOutcome {
    /// Text for the customer-facing notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckoutOutcome::Placed { .. } => "Order placed successfully!",
            CheckoutOutcome::RedirectToGateway { .. } => "Payment initiated successfully!",
        }
    }
}

/// Runs a checkout against the upload and order services.
///
/// Steps run one after another: validate, upload the prescription if one is
/// attached, create the order, then clear the cart. A failure at any step
/// stops the flow with the cart untouched. Nothing is retried.
#[derive(Clone)]
pub struct CheckoutFlow {
    orders: Arc<dyn OrderService>,
    uploads: Arc<dyn UploadService>,
}

impl CheckoutFlow {
    pub fn new(orders: Arc<dyn OrderService>, uploads: Arc<dyn UploadService>) -> Self {
        Self { orders, uploads }
    }

    /// Submit the cart's contents as an order.
    pub async fn submit<C: CartAccess>(
        &self,
        cart: &mut C,
        customer: &Customer,
        form: &CheckoutForm,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let valid = validate(cart.state(), customer, form)?;
        let method = valid.payment_method;
        select_total(cart.state()).map_err(CheckoutError::Total)?;

        let prescription_image_link = match valid.prescription {
            Some(file) => {
                info!(file = %file.file_name, bytes = file.bytes.len(), "uploading prescription");
                let url = self.uploads.upload(file).await.map_err(|e| {
                    error!(error = %e, "prescription upload failed");
                    CheckoutError::Upload(e)
                })?;
                info!(url = %url, "prescription uploaded");
                Some(url)
            }
            None => None,
        };

        let order = OrderRequest::from_cart(
            cart.state(),
            valid.email,
            &valid.shipping,
            method,
            prescription_image_link,
        )
        .map_err(CheckoutError::Total)?;
        info!(
            products = order.products.len(),
            total = %order.total_price,
            method = method.as_str(),
            "creating order"
        );

        let response = self
            .orders
            .create_order(&order)
            .await
            .map_err(|e| order_failed(method, &e))?;

        let outcome = outcome_for(method, &response, order.total_price)?;

        if let Err(e) = cart.clear() {
            warn!(error = %e, "order placed but the cart could not be cleared");
        }
        info!(method = method.as_str(), "checkout complete");
        Ok(outcome)
    }
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow").finish_non_exhaustive()
    }
}

fn order_failed(method: PaymentMethod, e: &ServiceError) -> CheckoutError {
    error!(error = %e, method = method.as_str(), "order creation failed");
    CheckoutError::OrderFailed {
        method,
        message: e.server_message().unwrap_or("Unknown error").to_string(),
    }
}

fn outcome_for(
    method: PaymentMethod,
    response: &OrderResponse,
    total: Money,
) -> Result<CheckoutOutcome, CheckoutError> {
    if !response.success {
        warn!(message = ?response.message, "order service reported failure");
        return Err(CheckoutError::OrderFailed {
            method,
            message: response
                .message
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    match method {
        PaymentMethod::CashOnDelivery => Ok(CheckoutOutcome::Placed { total }),
        PaymentMethod::Online => match response.gateway_url() {
            Some(url) => Ok(CheckoutOutcome::RedirectToGateway {
                url: url.to_string(),
            }),
            None => {
                warn!("online payment accepted without a gateway URL");
                Err(CheckoutError::MissingGatewayUrl)
            }
        },
    }
}
