use std::collections::BTreeMap;

use workshop_core::{DomainError, DomainResult};

use crate::message::BasketMessage;

/// What the basket did with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum BasketOutcome {
    Added { name: String, quantity: f64 },
    Removed { name: String, quantity: f64 },
    RemovedAll { name: String },
    NotHeld { name: String },
    Insufficient { name: String, held: f64, requested: f64 },
}

impl core::fmt::Display for BasketOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BasketOutcome::Added { name, quantity } => {
                write!(f, "I added {quantity} unit(s) of '{name}'")
            }
            BasketOutcome::Removed { name, quantity } => {
                write!(f, "I removed '{quantity}' units of '{name}'")
            }
            BasketOutcome::RemovedAll { name } => write!(f, "I removed all units of '{name}'"),
            BasketOutcome::NotHeld { name } => {
                write!(f, "I do not hold the {name} product you are trying to remove")
            }
            BasketOutcome::Insufficient {
                name,
                held,
                requested,
            } => write!(
                f,
                "I cannot remove '{requested}' units of '{name}' when I only hold '{held}'"
            ),
        }
    }
}

/// Shopping basket: product name → quantity held.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductBasket {
    products: BTreeMap<String, f64>,
}

impl ProductBasket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct (blocking) call.
    pub fn add_product(&mut self, name: &str, quantity: f64) -> DomainResult<BasketOutcome> {
        validate(name, quantity)?;

        let total = self.quantity_of(name) + quantity;
        if !total.is_finite() {
            return Err(DomainError::validation(format!(
                "adding {quantity} of '{name}' would leave no countable total"
            )));
        }
        self.products.insert(name.to_string(), total);

        let outcome = BasketOutcome::Added {
            name: name.to_string(),
            quantity,
        };
        tracing::info!(product = name, quantity, "Shopping Basket said: {outcome}");
        Ok(outcome)
    }

    /// Direct (blocking) call. Refusals are outcomes, not errors: the basket
    /// simply says why it did nothing.
    pub fn remove_product(&mut self, name: &str, quantity: f64) -> DomainResult<BasketOutcome> {
        validate(name, quantity)?;

        let held = self.products.get(name).copied().unwrap_or(0.0);
        let outcome = if held == 0.0 {
            BasketOutcome::NotHeld {
                name: name.to_string(),
            }
        } else if held < quantity {
            BasketOutcome::Insufficient {
                name: name.to_string(),
                held,
                requested: quantity,
            }
        } else if held == quantity {
            self.products.remove(name);
            BasketOutcome::RemovedAll {
                name: name.to_string(),
            }
        } else {
            self.products.insert(name.to_string(), held - quantity);
            BasketOutcome::Removed {
                name: name.to_string(),
                quantity,
            }
        };

        tracing::info!(product = name, quantity, "Shopping Basket said: {outcome}");
        Ok(outcome)
    }

    /// React to a message by calling the matching method.
    pub fn apply(&mut self, message: &BasketMessage) -> DomainResult<BasketOutcome> {
        tracing::info!(message = %message, "message applied");
        match message {
            BasketMessage::AddProduct(m) => self.add_product(&m.name, m.quantity),
            BasketMessage::RemoveProduct(m) => self.remove_product(&m.name, m.quantity),
        }
    }

    /// Everything currently in the basket, by product name.
    pub fn product_totals(&self) -> &BTreeMap<String, f64> {
        &self.products
    }

    pub fn quantity_of(&self, name: &str) -> f64 {
        self.products.get(name).copied().unwrap_or(0.0)
    }
}

fn validate(name: &str, quantity: f64) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("product name cannot be empty"));
    }
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(DomainError::validation(format!(
            "quantity must be a positive number, got {quantity}"
        )));
    }
    Ok(())
}
