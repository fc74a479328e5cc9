//! Messaging basics: a shopping basket you can call directly or send messages.
//!
//! A message is just the arguments of a method call turned into data. Once
//! it is data it can wait in a queue, be serialized to bytes, sit on disk and
//! be applied later, somewhere else.

pub mod basket;
pub mod codec;
pub mod message;
pub mod queue;

pub use basket::{BasketOutcome, ProductBasket};
pub use codec::{CodecError, decode, encode, load, save};
pub use message::{AddProductToBasket, BasketMessage, RemoveProductFromBasket};
pub use queue::MessageQueue;
