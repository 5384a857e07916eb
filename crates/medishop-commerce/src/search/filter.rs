//! Shop listing filters.

use crate::catalog::Medicine;
use serde::{Deserialize, Serialize};

/// A listing filter applied locally to catalog results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Filter {
    /// Category, compared case-insensitively.
    Category(String),
    /// Dosage form, compared case-insensitively.
    Form(String),
    /// Prescription requirement.
    Prescription(bool),
}

impl Filter {
    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        Filter::Category(category.into())
    }

    /// Create a dosage form filter.
    pub fn form(form: impl Into<String>) -> Self {
        Filter::Form(form.into())
    }

    /// Whether `medicine` passes this filter.
    pub fn matches(&self, medicine: &Medicine) -> bool {
        match self {
            Filter::Category(category) => medicine.in_category(category),
            Filter::Form(form) => medicine.has_form(form),
            Filter::Prescription(required) => medicine.prescription_required == *required,
        }
    }

    /// Whether two filters constrain the same attribute.
    pub(crate) fn same_kind(&self, other: &Filter) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_filters_match() {
        let mut m = Medicine::new("a", "A", Money::from_cents(100), 1);
        m.category = Some("Antibiotic".to_string());
        m.form = Some("Capsule".to_string());
        m.prescription_required = true;

        assert!(Filter::category("antibiotic").matches(&m));
        assert!(!Filter::category("Antacid").matches(&m));
        assert!(Filter::form("CAPSULE").matches(&m));
        assert!(Filter::Prescription(true).matches(&m));
        assert!(!Filter::Prescription(false).matches(&m));
    }

    #[test]
    fn test_missing_attribute_never_matches() {
        let m = Medicine::new("a", "A", Money::from_cents(100), 1);
        assert!(!Filter::category("Antibiotic").matches(&m));
        assert!(!Filter::form("Gel").matches(&m));
    }
}
