//! Medicine records.

use crate::ids::ProductId;
use crate::money::{as_decimal, Money};
use serde::{Deserialize, Serialize};

/// A medicine in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Unique product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Generic (active ingredient) name.
    #[serde(default)]
    pub generic: Option<String>,
    /// Brand name.
    #[serde(default)]
    pub brand: Option<String>,
    /// Dosage form (e.g., "Tablet", "Capsule").
    #[serde(default)]
    pub form: Option<String>,
    /// Category (e.g., "Painkiller").
    #[serde(default)]
    pub category: Option<String>,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Symptoms the medicine treats. The API spells this key `simptoms`.
    #[serde(default, rename = "simptoms", alias = "symptoms")]
    pub symptoms: Vec<String>,
    /// Manufacturer name.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Expiry date as sent by the API.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Unit price.
    #[serde(with = "as_decimal")]
    pub price: Money,
    /// Units in stock. `None` when the record carries no stock figure, which
    /// places no ceiling on the cart.
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Whether a prescription must accompany the order.
    #[serde(default)]
    pub prescription_required: bool,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}

impl Medicine {
    /// Create a medicine with the required fields set.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            generic: None,
            brand: None,
            form: None,
            category: None,
            description: None,
            symptoms: Vec::new(),
            manufacturer: None,
            expiry_date: None,
            price,
            quantity: Some(stock),
            prescription_required: false,
            image: String::new(),
        }
    }

    /// Check if out of stock. An unknown stock figure is not out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self.quantity, Some(stock) if stock <= 0)
    }

    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .map(|c| c.eq_ignore_ascii_case(category))
            .unwrap_or(false)
    }

    /// Case-insensitive dosage form comparison.
    pub fn has_form(&self, form: &str) -> bool {
        self.form
            .as_deref()
            .map(|f| f.eq_ignore_ascii_case(form))
            .unwrap_or(false)
    }
}

/// Medicines sharing `medicine`'s category, excluding `medicine` itself.
pub fn related_medicines<'a>(all: &'a [Medicine], medicine: &Medicine) -> Vec<&'a Medicine> {
    all.iter()
        .filter(|m| m.id != medicine.id && m.category.is_some() && m.category == medicine.category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painkiller(id: &str) -> Medicine {
        let mut m = Medicine::new(id, format!("Med {id}"), Money::from_cents(500), 10);
        m.category = Some("Painkiller".to_string());
        m
    }

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "_id": "67b0c1f2",
            "name": "Napa Extra",
            "generic": "Paracetamol",
            "category": "Painkiller",
            "form": "Tablet",
            "simptoms": ["fever", "headache"],
            "expiryDate": "2026-01-01",
            "price": 2.75,
            "quantity": 120,
            "prescriptionRequired": false,
            "image": "https://img.example/napa.png"
        }"#;

        let medicine: Medicine = serde_json::from_str(json).unwrap();
        assert_eq!(medicine.id.as_str(), "67b0c1f2");
        assert_eq!(medicine.price, Money::from_cents(275));
        assert_eq!(medicine.symptoms, vec!["fever", "headache"]);
        assert_eq!(medicine.expiry_date.as_deref(), Some("2026-01-01"));
        assert!(medicine.in_category("painkiller"));
        assert!(medicine.has_form("TABLET"));
    }

    #[test]
    fn test_missing_quantity_is_unknown_stock() {
        let json = r#"{"_id": "x1", "name": "Ace", "price": 1.5}"#;
        let medicine: Medicine = serde_json::from_str(json).unwrap();
        assert_eq!(medicine.quantity, None);
        assert!(!medicine.is_out_of_stock());
    }

    #[test]
    fn test_out_of_stock() {
        let mut m = painkiller("a");
        assert!(!m.is_out_of_stock());
        m.quantity = Some(0);
        assert!(m.is_out_of_stock());
        m.quantity = None;
        assert!(!m.is_out_of_stock());
    }

    #[test]
    fn test_related_excludes_self_and_other_categories() {
        let mut antacid = painkiller("c");
        antacid.category = Some("Antacid".to_string());
        let all = vec![painkiller("a"), painkiller("b"), antacid];

        let related = related_medicines(&all, &all[0]);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id.as_str(), "b");
    }
}
