//! Car factory domain module (event-sourced).
//!
//! Everything the factory knows lives in its journal. `FactoryState` is just a
//! set of folds over that journal, and commands are decided against it. Pure
//! domain logic only: no IO, no sleeping, no printing.

pub mod command;
pub mod error;
pub mod event;
pub mod factory;
pub mod model;
pub mod state;

pub use command::{
    AssignEmployeeToFactory, FactoryCommand, ProduceCar, TransferShipmentToCargoBay,
    UnpackAndInventoryShipmentInCargoBay, Work, WorkKind, decide, fold,
};
pub use error::{FactoryError, Task};
pub use event::{
    CarProduced, CurseWordUttered, EmployeeAssignedToFactory, FactoryEvent,
    ShipmentTransferredToCargoBay, ShipmentUnpackedInCargoBay,
};
pub use factory::{Factory, FactoryId};
pub use model::{CarModel, CarPart, CarPartPack, Curse, Employee, Shipment};
pub use state::FactoryState;
