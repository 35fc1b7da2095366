use serde::{Deserialize, Serialize};

use agrismart_core::{DomainError, DomainResult, Money};

/// A purchasable product. Immutable once built.
///
/// Deserialization goes through [`Product::new`], so a catalog file cannot
/// smuggle in a blank name or a zero price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawProduct")]
pub struct Product {
    name: String,
    /// Price per unit, in whole currency units.
    unit_price: Money,
}

impl Product {
    /// Build a product, rejecting a blank name or a zero price.
    ///
    /// The name is stored trimmed so lookups by the displayed name match.
    pub fn new(name: impl Into<String>, unit_price: Money) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if unit_price.is_zero() {
            return Err(DomainError::validation(format!(
                "unit price of '{name}' must be positive"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            unit_price,
        })
    }

    /// A product from a fixed table in this crate; the entries are
    /// known-good, so only debug builds re-check them.
    pub(crate) fn built_in(name: &'static str, unit_price: u64) -> Self {
        debug_assert!(
            Product::new(name, Money::new(unit_price)).is_ok(),
            "built-in product '{name}' is invalid"
        );
        Self {
            name: name.to_string(),
            unit_price: Money::new(unit_price),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

#[derive(Deserialize)]
struct RawProduct {
    name: String,
    unit_price: u64,
}

impl TryFrom<RawProduct> for Product {
    type Error = DomainError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        Product::new(raw.name, Money::new(raw.unit_price))
    }
}
