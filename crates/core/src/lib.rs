//! `agrismart-core` — domain building blocks shared by the marketplace crates.
//!
//! Everything here is **pure domain** (no IO, no terminal, no logging setup).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, SessionId};
pub use money::{Money, Quantity};
pub use value_object::ValueObject;
