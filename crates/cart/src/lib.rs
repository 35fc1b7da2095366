//! Cart ledger domain module (event-sourced).
//!
//! One ledger per shopper session: add items, compute totals, check out.
//! Pure domain logic; rendering reacts to the returned data.

pub mod ledger;
pub mod receipt;

pub use ledger::{
    AddItem, CartCommand, CartEvent, CartLedger, CartLine, Checkout, ItemAdded, LedgerState,
    OrderPlaced,
};
pub use receipt::{BuyerDetails, LineSnapshot, OrderReceipt, MISSING_BUYER_FIELDS};
