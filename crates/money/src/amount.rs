use core::cmp::Ordering;
use core::ops::Neg;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use workshop_core::ValueObject;

use crate::currency::CurrencyType;
use crate::error::CurrencyError;

/// A decimal amount tagged with its currency.
///
/// Operations combining two amounts (`try_add`, `try_sub`, `ratio`,
/// `try_cmp`) refuse to mix currencies. Operations with a plain scalar keep
/// the currency of the amount. Arithmetic never panics: overflow comes back
/// as [`CurrencyError::Overflow`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyAmount {
    currency: CurrencyType,
    value: Decimal,
}

impl ValueObject for CurrencyAmount {}

impl CurrencyAmount {
    pub fn new(currency: CurrencyType, value: Decimal) -> Self {
        Self { currency, value }
    }

    /// Zero with no currency.
    pub fn zero() -> Self {
        Self::new(CurrencyType::None, Decimal::ZERO)
    }

    pub fn currency(&self) -> CurrencyType {
        self.currency
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn try_add(&self, other: &CurrencyAmount) -> Result<CurrencyAmount, CurrencyError> {
        self.ensure_same_currency(other, "+")?;
        let value = self
            .value
            .checked_add(other.value)
            .ok_or(CurrencyError::Overflow("+"))?;
        Ok(Self::new(self.currency, value))
    }

    pub fn try_sub(&self, other: &CurrencyAmount) -> Result<CurrencyAmount, CurrencyError> {
        self.ensure_same_currency(other, "-")?;
        let value = self
            .value
            .checked_sub(other.value)
            .ok_or(CurrencyError::Overflow("-"))?;
        Ok(Self::new(self.currency, value))
    }

    /// How many times `other` fits into `self` (currency-less).
    pub fn ratio(&self, other: &CurrencyAmount) -> Result<Decimal, CurrencyError> {
        self.ensure_same_currency(other, "/")?;
        if other.value.is_zero() {
            return Err(CurrencyError::DivisionByZero(self.to_string()));
        }
        self.value
            .checked_div(other.value)
            .ok_or(CurrencyError::Overflow("/"))
    }

    /// Scale the amount by a scalar; the currency is kept.
    pub fn try_mul(&self, multiplier: Decimal) -> Result<CurrencyAmount, CurrencyError> {
        let value = self
            .value
            .checked_mul(multiplier)
            .ok_or(CurrencyError::Overflow("*"))?;
        Ok(Self::new(self.currency, value))
    }

    /// Split the amount by a scalar; the currency is kept.
    pub fn div(&self, divisor: Decimal) -> Result<CurrencyAmount, CurrencyError> {
        if divisor.is_zero() {
            return Err(CurrencyError::DivisionByZero(self.to_string()));
        }
        let value = self
            .value
            .checked_div(divisor)
            .ok_or(CurrencyError::Overflow("/"))?;
        Ok(Self::new(self.currency, value))
    }

    pub fn try_cmp(&self, other: &CurrencyAmount) -> Result<Ordering, CurrencyError> {
        self.ensure_same_currency(other, "< > <= >=")?;
        Ok(self.value.cmp(&other.value))
    }

    /// Round to `decimals` places (banker's rounding).
    pub fn round(&self, decimals: u32) -> CurrencyAmount {
        Self::new(self.currency, self.value.round_dp(decimals))
    }

    /// Apply `conversion` to the value, keeping the currency.
    pub fn convert(&self, conversion: impl FnOnce(Decimal) -> Decimal) -> CurrencyAmount {
        Self::new(self.currency, conversion(self.value))
    }

    fn ensure_same_currency(
        &self,
        other: &CurrencyAmount,
        operation: &'static str,
    ) -> Result<(), CurrencyError> {
        if self.currency != other.currency {
            return Err(CurrencyError::Mismatch {
                operation,
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CurrencyAmount {
    fn default() -> Self {
        Self::zero()
    }
}

impl Neg for CurrencyAmount {
    type Output = CurrencyAmount;

    fn neg(self) -> Self::Output {
        Self::new(self.currency, -self.value)
    }
}

impl core::fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.currency {
            CurrencyType::None => write!(f, "{}", self.value),
            currency => write!(f, "{} {}", self.value, currency),
        }
    }
}

impl FromStr for CurrencyAmount {
    type Err = CurrencyError;

    /// `"12.50 EUR"`, `"12.50 eur"` or just `"12.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| CurrencyError::Parse {
            input: s.to_string(),
            reason,
        };

        let mut items = s.split_whitespace();
        let value = items
            .next()
            .ok_or_else(|| parse_error("empty input".to_string()))?;
        let value = Decimal::from_str(value).map_err(|e| parse_error(e.to_string()))?;

        let currency = match items.next() {
            Some(code) => CurrencyType::from_str(code)
                .map_err(|_| parse_error(format!("unknown currency '{code}'")))?,
            None => CurrencyType::None,
        };

        if items.next().is_some() {
            return Err(parse_error("trailing input".to_string()));
        }

        Ok(Self::new(currency, value))
    }
}
