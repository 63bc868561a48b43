//! Error types for catalog access.

use thiserror::Error;

use crate::model::ProductId;

/// Errors that can occur while talking to the catalog service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The request never got a response (connection, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("Catalog service returned {status}: {reason}")]
    Service { status: u16, reason: String },

    /// No product has the requested id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The name is not one of the known categories.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// The response body could not be decoded.
    #[error("Malformed catalog response: {0}")]
    Decode(String),

    /// The HTTP client could not be built from configuration.
    #[error("Catalog client error: {0}")]
    Client(String),
}
