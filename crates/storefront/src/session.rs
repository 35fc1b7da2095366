use std::sync::Arc;

use agrismart_cart::{CartLedger, OrderReceipt};
use agrismart_catalog::Catalog;
use agrismart_core::{DomainError, DomainResult, Money, Quantity, SessionId};
use agrismart_events::{EventBus, InMemoryEventBus, Subscription};

use crate::notification::Notification;

/// Why an add request was dropped without touching the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The quantity was not a positive whole number.
    InvalidQuantity,
    UnknownProduct,
    /// The ledger refused the add (quantity overflow).
    Rejected(DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Ignored(IgnoreReason),
}

/// One shopper: a catalog to browse, a cart ledger, and a notification bus.
///
/// Each session owns its ledger outright; sessions share nothing but the
/// read-only catalog.
#[derive(Debug)]
pub struct ShopperSession {
    catalog: Arc<Catalog>,
    ledger: CartLedger,
    bus: InMemoryEventBus<Notification>,
}

impl ShopperSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id, products = catalog.len(), "shopper session started");
        Self {
            catalog,
            ledger: CartLedger::new(id),
            bus: InMemoryEventBus::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.ledger.session_id()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// Receive every notification published from now on.
    pub fn subscribe(&self) -> Subscription<Notification> {
        self.bus.subscribe()
    }

    /// Add a product by catalog name with raw quantity input.
    ///
    /// Non-numeric or non-positive quantities and unknown products are ignored,
    /// like a form that refuses to submit.
    pub fn request_add_item(&mut self, product_name: &str, quantity_input: &str) -> AddOutcome {
        let Some(quantity) = Quantity::parse(quantity_input) else {
            tracing::debug!(product = %product_name, input = %quantity_input, "ignoring invalid quantity");
            return AddOutcome::Ignored(IgnoreReason::InvalidQuantity);
        };
        let Some(product) = self.catalog.find(product_name) else {
            tracing::debug!(product = %product_name, "ignoring unknown product");
            return AddOutcome::Ignored(IgnoreReason::UnknownProduct);
        };
        let (name, unit_price) = (product.name().to_string(), product.unit_price());

        match self.request_add(&name, unit_price, quantity) {
            Ok(()) => AddOutcome::Added,
            Err(err) => AddOutcome::Ignored(IgnoreReason::Rejected(err)),
        }
    }

    /// Add an already-validated line and notify subscribers.
    pub fn request_add(&mut self, name: &str, unit_price: Money, quantity: Quantity) -> DomainResult<()> {
        if let Err(err) = self.ledger.add_item(name, unit_price, quantity) {
            tracing::warn!(product = %name, error = %err, "add to cart rejected");
            return Err(err);
        }
        tracing::info!(
            product = %name,
            quantity = quantity.get(),
            total = %self.ledger.compute_total(),
            "item added to cart"
        );
        self.publish_cart_changed();
        Ok(())
    }

    /// Check out with raw buyer input.
    ///
    /// Success publishes `CheckoutSucceeded` followed by `CartChanged` for the
    /// now empty cart. Failure publishes `CheckoutFailed` and changes nothing.
    pub fn request_checkout(
        &mut self,
        buyer_name: &str,
        buyer_location: &str,
        buyer_contact: &str,
    ) -> DomainResult<OrderReceipt> {
        match self.ledger.checkout(buyer_name, buyer_location, buyer_contact) {
            Ok(receipt) => {
                tracing::info!(
                    order = %receipt.order_id,
                    lines = receipt.lines.len(),
                    total = %receipt.total,
                    "order placed"
                );
                self.publish(Notification::CheckoutSucceeded {
                    receipt: receipt.clone(),
                });
                self.publish_cart_changed();
                Ok(receipt)
            }
            Err(err) => {
                tracing::info!(reason = %err.reason(), "checkout rejected");
                self.publish(Notification::CheckoutFailed {
                    reason: err.reason().to_string(),
                });
                Err(err)
            }
        }
    }

    fn publish_cart_changed(&self) {
        self.publish(Notification::CartChanged {
            lines: self.ledger.snapshot_lines(),
            total: self.ledger.compute_total(),
        });
    }

    fn publish(&self, notification: Notification) {
        let kind = notification.kind();
        if let Err(err) = self.bus.publish(notification) {
            tracing::error!(kind, error = %err, "failed to publish notification");
        }
    }
}
