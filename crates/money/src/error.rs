use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Both operands must carry the same currency.
    #[error("Can't apply the '{operation}' operation to mismatching currencies '{left}' and '{right}'")]
    Mismatch {
        operation: &'static str,
        left: String,
        right: String,
    },

    #[error("the '{0}' operation overflowed")]
    Overflow(&'static str),

    #[error("cannot divide {0} by zero")]
    DivisionByZero(String),

    #[error("invalid amount '{input}': {reason}")]
    Parse { input: String, reason: String },
}
