//! Product catalog: the fixed, ordered list of produce a shopper can buy.
//!
//! The catalog is built once at startup and only read afterwards.

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::Product;
