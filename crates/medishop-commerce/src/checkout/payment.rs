//! Payment methods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    #[default]
    #[serde(rename = "cashOnDelivery")]
    CashOnDelivery,
    /// Pay through the online payment gateway.
    #[serde(rename = "sslcommerz")]
    Online,
}

impl PaymentMethod {
    /// Wire value sent to the order service.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cashOnDelivery",
            PaymentMethod::Online => "sslcommerz",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Online => "Online Payment",
        }
    }

    /// Parse from a wire value or a display label.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        [PaymentMethod::CashOnDelivery, PaymentMethod::Online]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s) || m.label().eq_ignore_ascii_case(s))
            .or(match s.to_ascii_lowercase().as_str() {
                "cod" | "cash" => Some(PaymentMethod::CashOnDelivery),
                "online" => Some(PaymentMethod::Online),
                _ => None,
            })
    }

    /// Whether the order completes on the payment gateway.
    pub fn redirects_to_gateway(&self) -> bool {
        matches!(self, PaymentMethod::Online)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
