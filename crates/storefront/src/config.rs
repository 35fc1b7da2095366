//! Storefront configuration from environment variables.

use std::path::PathBuf;

use agrismart_catalog::Catalog;
use agrismart_observability::LogFormat;

use crate::currency::{CurrencyFormatter, DEFAULT_CURRENCY};
use crate::error::StorefrontError;

pub const CATALOG_VAR: &str = "AGRISMART_CATALOG";
pub const CURRENCY_VAR: &str = "AGRISMART_CURRENCY";
pub const LOG_FORMAT_VAR: &str = "AGRISMART_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// JSON catalog to sell from; the built-in produce list when unset.
    pub catalog_path: Option<PathBuf>,
    pub currency: String,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            currency: DEFAULT_CURRENCY.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, StorefrontError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorefrontError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| StorefrontError::config(format!("{LOG_FORMAT_VAR}: {e}")))?,
            None => LogFormat::default(),
        };

        let config = Self {
            catalog_path: get(CATALOG_VAR).map(PathBuf::from),
            currency: get(CURRENCY_VAR)
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject an empty or non-alphabetic currency code.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.currency.is_empty() || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(StorefrontError::config(format!(
                "{CURRENCY_VAR} must be an alphabetic currency code, got '{}'",
                self.currency
            )));
        }
        Ok(())
    }

    pub fn currency_formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::new(self.currency.clone())
    }

    /// The configured catalog file, or the built-in catalog.
    pub fn load_catalog(&self) -> Result<Catalog, StorefrontError> {
        match &self.catalog_path {
            Some(path) => Ok(Catalog::from_json_file(path)?),
            None => {
                tracing::info!("using built-in catalog");
                Ok(Catalog::agrismart())
            }
        }
    }
}
