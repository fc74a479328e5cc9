use serde::{Deserialize, Serialize};

use workshop_events::Command;

/// Message: put `quantity` units of `name` into the basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddProductToBasket {
    pub name: String,
    pub quantity: f64,
}

/// Message: take `quantity` units of `name` out of the basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveProductFromBasket {
    pub name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BasketMessage {
    AddProduct(AddProductToBasket),
    RemoveProduct(RemoveProductFromBasket),
}

impl BasketMessage {
    pub fn add(name: impl Into<String>, quantity: f64) -> Self {
        BasketMessage::AddProduct(AddProductToBasket {
            name: name.into(),
            quantity,
        })
    }

    pub fn remove(name: impl Into<String>, quantity: f64) -> Self {
        BasketMessage::RemoveProduct(RemoveProductFromBasket {
            name: name.into(),
            quantity,
        })
    }
}

impl Command for BasketMessage {
    fn command_type(&self) -> &'static str {
        match self {
            BasketMessage::AddProduct(_) => "basket.add_product",
            BasketMessage::RemoveProduct(_) => "basket.remove_product",
        }
    }
}

impl core::fmt::Display for BasketMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BasketMessage::AddProduct(m) => write!(f, "Add {} {} to basket", m.quantity, m.name),
            BasketMessage::RemoveProduct(m) => {
                write!(f, "Remove {} {} from basket", m.quantity, m.name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_like_sentences() {
        assert_eq!(BasketMessage::add("candles", 5.0).to_string(), "Add 5 candles to basket");
        assert_eq!(
            BasketMessage::remove("butter", 1.5).to_string(),
            "Remove 1.5 butter from basket"
        );
    }

    #[test]
    fn command_types_are_stable() {
        assert_eq!(BasketMessage::add("x", 1.0).command_type(), "basket.add_product");
        assert_eq!(BasketMessage::remove("x", 1.0).command_type(), "basket.remove_product");
    }
}
