//! Plain-text rendering of catalog, cart and order confirmation.

use std::fmt::Write as _;

use agrismart_cart::{LineSnapshot, MISSING_BUYER_FIELDS, OrderReceipt};
use agrismart_catalog::Catalog;
use agrismart_core::Money;

use crate::currency::CurrencyFormatter;
use crate::notification::Notification;

pub const MISSING_DETAILS_PROMPT: &str = "Please fill in all buyer details.";
pub const THANK_YOU: &str = "Thank you for your order! Our logistics team will contact you soon to arrange pickup and delivery.";

#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    currency: CurrencyFormatter,
}

impl TextRenderer {
    pub fn new(currency: CurrencyFormatter) -> Self {
        Self { currency }
    }

    /// Numbered product list; the numbers are what `add` takes.
    pub fn render_catalog(&self, catalog: &Catalog) -> String {
        let mut out = String::from("Produce\n");
        for (i, product) in catalog.list_products().iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} - {}",
                i + 1,
                product.name(),
                self.currency.format(product.unit_price())
            );
        }
        out
    }

    /// Cart summary, or `None` when the cart is empty (the summary is hidden).
    pub fn render_cart(&self, lines: &[LineSnapshot], total: Money) -> Option<String> {
        if lines.is_empty() {
            return None;
        }
        let mut out = String::from("Your cart\n");
        for line in lines {
            let _ = writeln!(
                out,
                "  {} x {}  {}",
                line.name,
                line.quantity,
                self.currency.format(line.line_total)
            );
        }
        let _ = writeln!(out, "Total: {}", self.currency.format(total));
        Some(out)
    }

    pub fn render_confirmation(&self, receipt: &OrderReceipt) -> String {
        let mut out = String::from("Order Confirmation\n");
        let _ = writeln!(out, "Order: {}", receipt.order_id);
        let _ = writeln!(out, "Buyer: {}", receipt.buyer.name());
        let _ = writeln!(out, "Location: {}", receipt.buyer.location());
        let _ = writeln!(out, "Contact: {}", receipt.buyer.contact());
        for line in &receipt.lines {
            let _ = writeln!(
                out,
                "  - {} x {} - {}",
                line.name,
                line.quantity,
                self.currency.format(line.line_total)
            );
        }
        let _ = writeln!(out, "Total: {}", self.currency.format(receipt.total));
        let _ = writeln!(out, "{THANK_YOU}");
        out
    }

    /// What the shopper sees for a notification; `None` renders nothing.
    pub fn render_notification(&self, notification: &Notification) -> Option<String> {
        match notification {
            Notification::CartChanged { lines, total } => self.render_cart(lines, *total),
            Notification::CheckoutSucceeded { receipt } => Some(self.render_confirmation(receipt)),
            Notification::CheckoutFailed { reason } if reason == MISSING_BUYER_FIELDS => {
                Some(format!("{MISSING_DETAILS_PROMPT}\n"))
            }
            Notification::CheckoutFailed { reason } => Some(format!("Checkout failed: {reason}\n")),
        }
    }
}
