//! Orders given to the factory, and the rules that accept or refuse them.

use serde::{Deserialize, Serialize};

use workshop_events::Command;

use crate::error::{FactoryError, Task};
use crate::event::FactoryEvent;
use crate::model::{
    CARGO_BAY_CAPACITY, CarModel, Curse, Employee, NUMBER_OF_PARTS_TOO_MUCH_TO_HANDLE, Shipment,
};
use crate::state::FactoryState;

/// Command: AssignEmployeeToFactory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignEmployeeToFactory {
    pub employee: Employee,
}

/// Command: TransferShipmentToCargoBay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferShipmentToCargoBay {
    pub shipment: Shipment,
}

/// Command: UnpackAndInventoryShipmentInCargoBay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpackAndInventoryShipmentInCargoBay {
    pub employee: Employee,
}

/// Command: ProduceCar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceCar {
    pub employee: Employee,
    pub model: CarModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryCommand {
    AssignEmployee(AssignEmployeeToFactory),
    TransferShipment(TransferShipmentToCargoBay),
    UnpackShipments(UnpackAndInventoryShipmentInCargoBay),
    ProduceCar(ProduceCar),
}

impl FactoryCommand {
    pub fn assign_employee(name: impl Into<String>) -> Self {
        FactoryCommand::AssignEmployee(AssignEmployeeToFactory {
            employee: Employee::new(name),
        })
    }

    pub fn transfer_shipment(shipment: Shipment) -> Self {
        FactoryCommand::TransferShipment(TransferShipmentToCargoBay { shipment })
    }

    pub fn unpack_shipments(name: impl Into<String>) -> Self {
        FactoryCommand::UnpackShipments(UnpackAndInventoryShipmentInCargoBay {
            employee: Employee::new(name),
        })
    }

    pub fn produce_car(name: impl Into<String>, model: CarModel) -> Self {
        FactoryCommand::ProduceCar(ProduceCar {
            employee: Employee::new(name),
            model,
        })
    }

    /// The work carrying out this command takes once the rules let it through.
    pub fn work(&self) -> Vec<Work> {
        match self {
            FactoryCommand::AssignEmployee(_) => {
                vec![Work::paper("Assign employee to the factory")]
            }
            FactoryCommand::TransferShipment(_) => vec![Work::heavy("opening cargo bay doors")],
            FactoryCommand::UnpackShipments(_) => vec![Work::heavy("passing supplies")],
            FactoryCommand::ProduceCar(_) => vec![
                Work::heavy("Building the car..."),
                Work::paper("Writing car specification documents"),
            ],
        }
    }
}

impl Command for FactoryCommand {
    fn command_type(&self) -> &'static str {
        match self {
            FactoryCommand::AssignEmployee(_) => "factory.assign_employee",
            FactoryCommand::TransferShipment(_) => "factory.transfer_shipment",
            FactoryCommand::UnpackShipments(_) => "factory.unpack_shipments",
            FactoryCommand::ProduceCar(_) => "factory.produce_car",
        }
    }
}

impl core::fmt::Display for FactoryCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FactoryCommand::AssignEmployee(c) => {
                write!(f, "assign employee {} to the factory", c.employee)
            }
            FactoryCommand::TransferShipment(c) => {
                write!(f, "transfer shipment '{}' to cargo", c.shipment.name)
            }
            FactoryCommand::UnpackShipments(c) => {
                write!(f, "Order {} to unpack shipments from cargo bay", c.employee)
            }
            FactoryCommand::ProduceCar(c) => {
                write!(f, "Order {} to build a {} car", c.employee, c.model)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WorkKind {
    /// Forms and signatures.
    Paper,
    /// Lifting, carrying, assembling.
    Heavy,
}

/// One piece of work a command implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub kind: WorkKind,
    pub description: &'static str,
}

impl Work {
    fn paper(description: &'static str) -> Self {
        Self {
            kind: WorkKind::Paper,
            description,
        }
    }

    fn heavy(description: &'static str) -> Self {
        Self {
            kind: WorkKind::Heavy,
            description,
        }
    }
}

impl core::fmt::Display for Work {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            WorkKind::Paper => write!(f, "Papers... {} ...", self.description),
            WorkKind::Heavy => write!(f, "heavy stuff... {} ...", self.description),
        }
    }
}

/// Decide which events `command` produces against `state`.
///
/// Rules are checked in a fixed order and the first failure wins. Nothing is
/// recorded here; callers append the returned events to the journal.
pub fn decide(command: &FactoryCommand, state: &FactoryState) -> Result<Vec<FactoryEvent>, FactoryError> {
    match command {
        FactoryCommand::AssignEmployee(c) => assign_employee(c, state),
        FactoryCommand::TransferShipment(c) => transfer_shipment(c, state),
        FactoryCommand::UnpackShipments(c) => unpack_shipments(c, state),
        FactoryCommand::ProduceCar(c) => produce_car(c, state),
    }
}

/// Rebuild state from `journal` and decide `command` against it.
pub fn fold(journal: &[FactoryEvent], command: &FactoryCommand) -> Result<Vec<FactoryEvent>, FactoryError> {
    decide(command, &FactoryState::new(journal.to_vec()))
}

fn assign_employee(
    cmd: &AssignEmployeeToFactory,
    state: &FactoryState,
) -> Result<Vec<FactoryEvent>, FactoryError> {
    if state.is_assigned(&cmd.employee) {
        return Err(FactoryError::DuplicateEmployee(cmd.employee.clone()));
    }
    if cmd.employee.is_troublemaker() {
        return Err(FactoryError::Troublemaker(cmd.employee.clone()));
    }

    Ok(vec![FactoryEvent::employee_assigned(cmd.employee.clone())])
}

fn transfer_shipment(
    cmd: &TransferShipmentToCargoBay,
    state: &FactoryState,
) -> Result<Vec<FactoryEvent>, FactoryError> {
    if state.employees().is_empty() {
        return Err(FactoryError::NobodyAtFactory);
    }
    if cmd.shipment.packs.is_empty() {
        return Err(FactoryError::EmptyShipment);
    }
    if state.shipments_waiting_to_be_unpacked().len() >= CARGO_BAY_CAPACITY {
        return Err(FactoryError::CargoBayFull);
    }

    let mut events = vec![FactoryEvent::shipment_transferred(cmd.shipment.clone())];
    if cmd.shipment.total_parts() > NUMBER_OF_PARTS_TOO_MUCH_TO_HANDLE {
        events.push(FactoryEvent::curse_word_uttered(Curse::awe_at_delivery()));
    }
    Ok(events)
}

fn unpack_shipments(
    cmd: &UnpackAndInventoryShipmentInCargoBay,
    state: &FactoryState,
) -> Result<Vec<FactoryEvent>, FactoryError> {
    if !state.is_assigned(&cmd.employee) {
        return Err(FactoryError::UnknownEmployee {
            employee: cmd.employee.clone(),
            task: Task::UnpackCargoBay,
        });
    }
    if state.employees_who_have_unpacked_today().contains(&cmd.employee) {
        return Err(FactoryError::UnpackQuotaReached(cmd.employee.clone()));
    }

    let waiting = state.shipments_waiting_to_be_unpacked();
    if waiting.is_empty() {
        return Err(FactoryError::NothingToUnpack);
    }

    let packs = waiting.into_iter().flat_map(|s| s.packs).collect();
    Ok(vec![FactoryEvent::shipment_unpacked(cmd.employee.clone(), packs)])
}

fn produce_car(cmd: &ProduceCar, state: &FactoryState) -> Result<Vec<FactoryEvent>, FactoryError> {
    if !state.is_assigned(&cmd.employee) {
        return Err(FactoryError::UnknownEmployee {
            employee: cmd.employee.clone(),
            task: Task::BuildCar,
        });
    }
    if state.employees_who_have_produced_cars().contains(&cmd.employee) {
        return Err(FactoryError::ProductionQuotaReached(cmd.employee.clone()));
    }

    let needed = cmd.model.needed_parts();
    let inventory = state.inventory();
    let enough = needed
        .iter()
        .all(|p| inventory.get(&p.part).copied().unwrap_or(0) >= i64::from(p.quantity));
    if !enough {
        return Err(FactoryError::NotEnoughParts(cmd.model));
    }

    Ok(vec![FactoryEvent::car_produced(cmd.employee.clone(), cmd.model, needed)])
}
