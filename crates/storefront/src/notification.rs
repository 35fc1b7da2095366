//! Messages from the core to whatever renders the storefront.

use serde::{Deserialize, Serialize};

use agrismart_cart::{LineSnapshot, OrderReceipt};
use agrismart_core::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// Sent after every successful add and after the reset that follows a checkout.
    CartChanged { lines: Vec<LineSnapshot>, total: Money },
    CheckoutSucceeded { receipt: OrderReceipt },
    CheckoutFailed { reason: String },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::CartChanged { .. } => "cart_changed",
            Notification::CheckoutSucceeded { .. } => "checkout_succeeded",
            Notification::CheckoutFailed { .. } => "checkout_failed",
        }
    }
}
