//! Remote services the storefront depends on.

use std::time::Duration;

/// The remote services, each with its own timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Medicine listing and lookup.
    Catalog,
    /// Order creation.
    Orders,
    /// Prescription image storage.
    Upload,
}

impl DependencyTag {
    /// Get the default timeout for this dependency.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog => Duration::from_secs(10),
            Self::Orders => Duration::from_secs(15),
            Self::Upload => Duration::from_secs(30),
        }
    }

    /// Whether a failure here blocks checkout.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Orders | Self::Upload)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Orders => "orders",
            Self::Upload => "upload",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_gets_the_longest_timeout() {
        assert!(DependencyTag::Upload.default_timeout() > DependencyTag::Orders.default_timeout());
        assert!(DependencyTag::Orders.default_timeout() > DependencyTag::Catalog.default_timeout());
        assert!(!DependencyTag::Catalog.is_critical());
        assert_eq!(DependencyTag::Orders.to_string(), "orders");
    }
}
