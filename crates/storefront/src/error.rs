use agrismart_core::DomainError;
use thiserror::Error;

/// Failures while starting the storefront.
///
/// Shopper mistakes (blank buyer fields, bad quantities) are not errors at this
/// level; they surface as notifications.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] DomainError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StorefrontError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
