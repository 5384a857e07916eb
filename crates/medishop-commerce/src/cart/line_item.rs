//! Cart line items.

use crate::catalog::Medicine;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product and its quantity in the cart.
///
/// Descriptive fields are a snapshot of the catalog record taken when the
/// product was first added. They are not re-fetched, so a cart shown later
/// may differ from the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Catalog product this line refers to.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price at the time of add.
    pub price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Quantity, always at least 1 while in the cart.
    pub quantity: i64,
    /// Stock ceiling copied from the catalog, if known.
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    /// Whether a prescription must accompany the order.
    #[serde(default)]
    pub prescription_required: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub generic: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CartLineItem {
    /// Create a line item with no catalog metadata.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            image: String::new(),
            quantity,
            stock_quantity: None,
            prescription_required: false,
            category: None,
            generic: None,
            brand: None,
            form: None,
            manufacturer: None,
            expiry_date: None,
            symptoms: Vec::new(),
            description: None,
        }
    }

    /// Snapshot a catalog record into a line item.
    pub fn from_medicine(medicine: &Medicine, quantity: i64) -> Self {
        Self {
            product_id: medicine.id.clone(),
            name: medicine.name.clone(),
            price: medicine.price,
            image: medicine.image.clone(),
            quantity,
            stock_quantity: medicine.quantity,
            prescription_required: medicine.prescription_required,
            category: medicine.category.clone(),
            generic: medicine.generic.clone(),
            brand: medicine.brand.clone(),
            form: medicine.form.clone(),
            manufacturer: medicine.manufacturer.clone(),
            expiry_date: medicine.expiry_date.clone(),
            symptoms: medicine.symptoms.clone(),
            description: medicine.description.clone(),
        }
    }

    /// Set the stock ceiling.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock_quantity = Some(stock);
        self
    }

    /// Mark the product as prescription-only.
    pub fn with_prescription(mut self, required: bool) -> Self {
        self.prescription_required = required;
        self
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}
