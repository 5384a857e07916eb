//! Order payload sent to the order service, and past orders read back from it.

use crate::cart::{select_total, CartState};
use crate::checkout::{PaymentMethod, ShippingDetails};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A cart line projected down to what the order service needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Order creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_name: String,
    pub user_email: String,
    pub products: Vec<OrderProduct>,
    #[serde(with = "crate::money::as_decimal")]
    pub total_price: Money,
    pub address: String,
    pub contact_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription_image_link: Option<String>,
    pub payment_method: PaymentMethod,
}

impl OrderRequest {
    /// Build the payload for the current cart contents.
    ///
    /// Fails when the cart total cannot be computed exactly.
    pub fn from_cart(
        cart: &CartState,
        user_email: impl Into<String>,
        shipping: &ShippingDetails,
        payment_method: PaymentMethod,
        prescription_image_link: Option<String>,
    ) -> Result<Self, CommerceError> {
        let products = cart
            .items
            .iter()
            .filter(|item| !item.product_id.is_empty())
            .map(|item| OrderProduct {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            })
            .collect();

        Ok(Self {
            user_name: shipping.name.clone(),
            user_email: user_email.into(),
            products,
            total_price: select_total(cart)?,
            address: shipping.address.clone(),
            contact_number: shipping.contact_number.clone(),
            prescription_image_link,
            payment_method,
        })
    }
}

/// Order service reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderResponse {
    pub success: bool,
    /// Gateway page to send the customer to, for online payment.
    #[serde(
        rename = "PaymentGatewayPageURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_gateway_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OrderResponse {
    /// The gateway URL, ignoring a blank one.
    pub fn gateway_url(&self) -> Option<&str> {
        self.payment_gateway_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// A past order in the customer's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: String,
    /// ISO-8601 creation timestamp as sent by the API.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Order status; `Pending` means not yet paid.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub products: Vec<OrderedProduct>,
}

impl OrderSummary {
    /// Creation date (`YYYY-MM-DD`), without the time of day.
    pub fn created_date(&self) -> Option<&str> {
        let created = self.created_at.as_deref()?;
        Some(created.get(..10).unwrap_or(created))
    }

    /// Whether payment is still outstanding.
    pub fn is_unpaid(&self) -> bool {
        self.status.eq_ignore_ascii_case("pending")
    }
}

/// One product line of a past order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProduct {
    /// The product, expanded to its record or left as a bare id. Null when
    /// the product has since been deleted.
    #[serde(default)]
    pub product_id: Option<OrderedProductRef>,
    pub quantity: i64,
}

impl OrderedProduct {
    /// Product name, if the API expanded the reference.
    pub fn name(&self) -> Option<&str> {
        match self.product_id.as_ref()? {
            OrderedProductRef::Expanded { name, .. } => name.as_deref(),
            OrderedProductRef::Id(_) => None,
        }
    }
}

/// How the API refers to an ordered product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OrderedProductRef {
    Id(ProductId),
    Expanded {
        #[serde(rename = "_id", default)]
        id: Option<ProductId>,
        #[serde(default)]
        name: Option<String>,
    },
}

/// `{data: [...]}` envelope around the customer's orders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderHistoryResponse {
    #[serde(default)]
    pub data: Vec<OrderSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLineItem, CartStore};

    fn cart() -> CartStore {
        let mut store = CartStore::new();
        store
            .add_item(CartLineItem::new("A", "Napa", Money::from_cents(1000), 2))
            .unwrap();
        store
            .add_item(CartLineItem::new("B", "Seclo", Money::from_cents(550), 3).with_prescription(true))
            .unwrap();
        store
    }

    #[test]
    fn test_payload_shape() {
        let shipping = ShippingDetails::new("Rahim", "12 Lake Road", "017");
        let order = OrderRequest::from_cart(
            cart().state(),
            "rahim@example.com",
            &shipping,
            PaymentMethod::CashOnDelivery,
            Some("https://img.example/rx.png".to_string()),
        )
        .unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userName": "Rahim",
                "userEmail": "rahim@example.com",
                "products": [
                    {"productId": "A", "quantity": 2},
                    {"productId": "B", "quantity": 3}
                ],
                "totalPrice": 36.5,
                "address": "12 Lake Road",
                "contactNumber": "017",
                "prescriptionImageLink": "https://img.example/rx.png",
                "paymentMethod": "cashOnDelivery"
            })
        );
    }

    #[test]
    fn test_prescription_link_omitted_when_absent() {
        let shipping = ShippingDetails::new("Rahim", "12 Lake Road", "017");
        let order = OrderRequest::from_cart(
            cart().state(),
            "rahim@example.com",
            &shipping,
            PaymentMethod::Online,
            None,
        )
        .unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("prescriptionImageLink").is_none());
        assert_eq!(json["paymentMethod"], "sslcommerz");
    }

    #[test]
    fn test_overflowing_total_is_refused() {
        let cart = CartState {
            items: vec![
                CartLineItem::new("A", "Napa", Money::from_cents(i64::MAX / 2), 3),
                CartLineItem::new("B", "Seclo", Money::from_cents(100), 1),
            ],
        };
        let shipping = ShippingDetails::new("Rahim", "12 Lake Road", "017");
        let result = OrderRequest::from_cart(
            &cart,
            "rahim@example.com",
            &shipping,
            PaymentMethod::CashOnDelivery,
            None,
        );
        assert_eq!(result, Err(CommerceError::Overflow));
    }

    #[test]
    fn test_order_history_shape() {
        let json = r#"{
            "success": true,
            "data": [
                {
                    "_id": "65f0a1",
                    "createdAt": "2025-03-12T08:15:00.000Z",
                    "status": "Pending",
                    "products": [
                        {"productId": {"_id": "m1", "name": "Napa Extra"}, "quantity": 2},
                        {"productId": "m2", "quantity": 1},
                        {"productId": null, "quantity": 4}
                    ]
                },
                {"_id": "65f0a2", "status": "Delivered"}
            ]
        }"#;

        let orders = serde_json::from_str::<OrderHistoryResponse>(json).unwrap().data;
        assert_eq!(orders.len(), 2);

        let first = &orders[0];
        assert_eq!(first.id, "65f0a1");
        assert_eq!(first.created_date(), Some("2025-03-12"));
        assert!(first.is_unpaid());
        assert_eq!(first.products[0].name(), Some("Napa Extra"));
        assert_eq!(first.products[0].quantity, 2);
        assert_eq!(
            first.products[1].product_id,
            Some(OrderedProductRef::Id(ProductId::new("m2")))
        );
        assert_eq!(first.products[1].name(), None);
        assert_eq!(first.products[2].product_id, None);

        let second = &orders[1];
        assert_eq!(second.created_date(), None);
        assert!(!second.is_unpaid());
        assert!(second.products.is_empty());
    }

    #[test]
    fn test_empty_history() {
        let resp: OrderHistoryResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(resp.data.is_empty());
    }

    #[test]
    fn test_response_gateway_url() {
        let response: OrderResponse = serde_json::from_str(
            r#"{"success":true,"PaymentGatewayPageURL":"https://pay.example/s/1"}"#,
        )
        .unwrap();
        assert_eq!(response.gateway_url(), Some("https://pay.example/s/1"));

        let response: OrderResponse =
            serde_json::from_str(r#"{"success":true,"PaymentGatewayPageURL":" "}"#).unwrap();
        assert_eq!(response.gateway_url(), None);

        let response: OrderResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, None);
    }
}
