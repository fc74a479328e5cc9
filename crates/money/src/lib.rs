//! Currency value objects.
//!
//! A `CurrencyAmount` is a decimal that knows which currency it is in, so
//! adding euros to dollars is an error instead of a silent bug.

pub mod amount;
pub mod currency;
pub mod error;

pub use amount::CurrencyAmount;
pub use currency::CurrencyType;
pub use error::CurrencyError;
pub use rust_decimal::Decimal;
