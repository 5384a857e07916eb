//! Shipping details.

use serde::{Deserialize, Serialize};

/// Where and to whom an order ships.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    /// Recipient name.
    pub name: String,
    /// Delivery address, one line.
    pub address: String,
    /// Contact phone number.
    pub contact_number: String,
}

impl ShippingDetails {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        contact_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            contact_number: contact_number.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
        }
    }

    /// Names of the fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.contact_number.trim().is_empty() {
            missing.push("contact number");
        }
        missing
    }

    /// Check if every field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
