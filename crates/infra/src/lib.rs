//! Infrastructure layer: journal storage, command dispatch, read models, config.

pub mod command_dispatcher;
pub mod config;
pub mod factory_floor;
pub mod journal_store;
pub mod projections;


pub use command_dispatcher::{CommandDispatcher, DispatchError};
pub use config::{ConfigError, WorkshopConfig};
pub use factory_floor::FactoryFloor;
pub use journal_store::{InMemoryJournalStore, JournalStore, JournalStoreError, StoredEvent, UncommittedEvent};
pub use projections::inventory::{FactoryInventoryProjection, FactoryStock, InventoryProjectionError};
