//! Collaborator seams.
//!
//! The storefront talks to three remote services. Their HTTP implementations
//! live in `medishop-data`; tests substitute in-memory fakes.

use crate::catalog::Medicine;
use crate::checkout::{OrderRequest, OrderResponse, OrderSummary, PrescriptionFile};
use crate::ids::ProductId;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with an error. `message` is the server's own
    /// message when it sent one.
    #[error("{}", message.as_deref().unwrap_or("request rejected"))]
    Rejected {
        status: Option<u16>,
        message: Option<String>,
    },

    /// The service could not be reached or timed out.
    #[error("{0}")]
    Unavailable(String),

    /// The response could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Catalog query service.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List medicines, optionally narrowed by a server-side text search.
    async fn list_medicines(&self, search: Option<&str>) -> Result<Vec<Medicine>, ServiceError>;

    /// Look up a single medicine.
    async fn get_medicine(&self, id: &ProductId) -> Result<Option<Medicine>, ServiceError>;
}

/// Order service: places orders and lists the signed-in customer's past ones.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, ServiceError>;

    /// Orders placed by the customer the request is authenticated as.
    async fn my_orders(&self) -> Result<Vec<OrderSummary>, ServiceError>;
}

/// File upload service; returns the URL of the stored file.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload(&self, file: &PrescriptionFile) -> Result<String, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_prefers_server_message() {
        let err = ServiceError::Rejected {
            status: Some(400),
            message: Some("Stock not available".to_string()),
        };
        assert_eq!(err.to_string(), "Stock not available");
        assert_eq!(err.server_message(), Some("Stock not available"));

        let err = ServiceError::Rejected {
            status: Some(500),
            message: None,
        };
        assert_eq!(err.to_string(), "request rejected");
        assert_eq!(err.server_message(), None);
    }
}
