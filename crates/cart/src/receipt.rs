use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrismart_core::{DomainError, DomainResult, Money, OrderId, Quantity, ValueObject};

/// Reason reported when any buyer field is blank.
pub const MISSING_BUYER_FIELDS: &str = "missing buyer fields";

/// Who placed an order. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerDetails {
    name: String,
    location: String,
    contact: String,
}

impl BuyerDetails {
    /// Trim each field; fail with [`MISSING_BUYER_FIELDS`] if any ends up empty.
    pub fn new(name: &str, location: &str, contact: &str) -> DomainResult<Self> {
        let (name, location, contact) = (name.trim(), location.trim(), contact.trim());
        if name.is_empty() || location.is_empty() || contact.is_empty() {
            return Err(DomainError::validation(MISSING_BUYER_FIELDS));
        }
        Ok(Self {
            name: name.to_string(),
            location: location.to_string(),
            contact: contact.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }
}

impl ValueObject for BuyerDetails {}

/// Read-only view of one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub name: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub line_total: Money,
}

impl LineSnapshot {
    /// `None` when `unit_price × quantity` does not fit in a `u64`.
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: Quantity) -> Option<Self> {
        Some(Self {
            name: name.into(),
            unit_price,
            quantity,
            line_total: unit_price.checked_times(quantity)?,
        })
    }
}

impl ValueObject for LineSnapshot {}

/// Immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub buyer: BuyerDetails,
    pub lines: Vec<LineSnapshot>,
    pub total: Money,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }
}
