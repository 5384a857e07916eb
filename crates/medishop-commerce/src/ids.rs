//! Catalog product identifier.
//!
//! Identifiers are assigned by the remote API, so this wraps whatever string
//! it hands out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog product id (the API's `_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the ID is blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "67b0c1f2".into();
        assert_eq!(id.as_str(), "67b0c1f2");
        assert_eq!(format!("{}", id), "67b0c1f2");
    }

    #[test]
    fn test_blank_id() {
        assert!(ProductId::new("").is_empty());
        assert!(ProductId::new("  ").is_empty());
        assert!(!ProductId::new("a").is_empty());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }
}
