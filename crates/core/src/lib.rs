//! `workshop-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every episode
//! (no infrastructure concerns, no IO).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use error::{DomainError, DomainResult};
pub use id::AggregateId;
pub use value_object::ValueObject;
