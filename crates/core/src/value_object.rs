//! Value object trait: equality by value, not identity.
//!
//! Value objects are the "nouns" of the ubiquitous language (messages and
//! commands are the "verbs"). They carry no identity and are defined entirely
//! by their attribute values.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CarPartPack {
///     part: String,
///     quantity: u32,
/// }
///
/// impl ValueObject for CarPartPack {}
///
/// let a = CarPartPack { part: "wheels".into(), quantity: 4 };
/// let b = CarPartPack { part: "wheels".into(), quantity: 4 };
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
