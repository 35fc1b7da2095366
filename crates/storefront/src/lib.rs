//! Storefront: the shopper-facing layer around the catalog and cart ledger.
//!
//! A [`ShopperSession`] turns user requests into ledger operations and
//! publishes [`Notification`]s. Anything that renders (the terminal front end
//! here, or any other surface) subscribes to those notifications.

pub mod config;
pub mod currency;
pub mod error;
pub mod notification;
pub mod render;
pub mod session;
pub mod terminal;

pub use config::StorefrontConfig;
pub use currency::{CurrencyFormatter, format_currency};
pub use error::StorefrontError;
pub use notification::Notification;
pub use render::TextRenderer;
pub use session::{AddOutcome, IgnoreReason, ShopperSession};
pub use terminal::Terminal;
