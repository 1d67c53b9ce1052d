//! Error handling for catalog API operations.
//!
//! Only the bounded list operations are allowed to fail loudly. Detail
//! fetches absorb their failures and surface as `None` instead, so a single
//! bad entry never aborts a batch.

use reqwest::StatusCode;
use thiserror::Error;

/// Common error type for catalog API operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid header '{name}' in client configuration")]
    InvalidHeader {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to build http client")]
    BuildClient(#[source] reqwest::Error),
    #[error("catalog request failed")]
    Request(#[source] reqwest::Error),
    #[error("catalog responded with {status}")]
    ErrorResponse { status: StatusCode },
    #[error("failed to decode catalog response")]
    Decode(#[source] reqwest::Error),
}
