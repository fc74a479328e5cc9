use serde::{Deserialize, Serialize};

use workshop_core::{Aggregate, AggregateId, AggregateRoot};

use crate::command::{FactoryCommand, decide};
use crate::error::FactoryError;
use crate::event::FactoryEvent;
use crate::state::FactoryState;

/// Factory identifier (one journal stream per factory).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactoryId(pub AggregateId);

impl FactoryId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for FactoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Factory.
///
/// Keeps its own journal and records accepted events into it. The derived
/// state is never stored separately; it is read back from the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    id: FactoryId,
    state: FactoryState,
}

impl Factory {
    /// A factory on its first morning: nothing has happened yet.
    pub fn empty(id: FactoryId) -> Self {
        Self {
            id,
            state: FactoryState::default(),
        }
    }

    /// Rehydrate from an existing journal.
    pub fn from_journal(id: FactoryId, journal: Vec<FactoryEvent>) -> Self {
        Self {
            id,
            state: FactoryState::new(journal),
        }
    }

    pub fn id_typed(&self) -> FactoryId {
        self.id
    }

    pub fn state(&self) -> &FactoryState {
        &self.state
    }

    pub fn journal(&self) -> &[FactoryEvent] {
        self.state.journal()
    }
}

impl AggregateRoot for Factory {
    type Id = FactoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.state.journal().len() as u64
    }
}

impl Aggregate for Factory {
    type Command = FactoryCommand;
    type Event = FactoryEvent;
    type Error = FactoryError;

    fn apply(&mut self, event: &Self::Event) {
        self.state.record(event.clone());
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        decide(command, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CarModel, CarPartPack, Employee, Shipment};
    use workshop_events::execute;

    fn test_factory() -> Factory {
        Factory::empty(FactoryId::new(AggregateId::new()))
    }

    fn spare_parts() -> Shipment {
        Shipment::new(
            "model T spare parts",
            vec![
                CarPartPack::new("wheels", 20),
                CarPartPack::new("engine", 7),
                CarPartPack::new("bits and pieces", 2),
            ],
        )
    }

    #[test]
    fn execute_records_accepted_events() {
        let mut factory = test_factory();

        let events = execute(&mut factory, &FactoryCommand::assign_employee("Yoda")).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(factory.journal(), events.as_slice());
        assert_eq!(factory.version(), 1);
        assert_eq!(factory.state().employees(), vec![Employee::new("Yoda")]);
    }

    #[test]
    fn rejected_commands_leave_no_trace() {
        let mut factory = test_factory();

        let err = execute(&mut factory, &FactoryCommand::transfer_shipment(spare_parts())).unwrap_err();

        assert_eq!(err, FactoryError::NobodyAtFactory);
        assert!(factory.journal().is_empty());
        assert_eq!(factory.version(), 0);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let factory = test_factory();
        let before = factory.clone();

        let _ = factory.handle(&FactoryCommand::assign_employee("Luke")).unwrap();

        assert_eq!(factory, before);
    }

    #[test]
    fn a_day_at_the_factory() {
        let mut factory = test_factory();
        let orders = [
            FactoryCommand::transfer_shipment(Shipment::new("chassis", vec![CarPartPack::new("chassis", 4)])),
            FactoryCommand::assign_employee("Yoda"),
            FactoryCommand::assign_employee("Luke"),
            FactoryCommand::assign_employee("Yoda"),
            FactoryCommand::assign_employee("Bender"),
            FactoryCommand::unpack_shipments("Lea"),
            FactoryCommand::unpack_shipments("Yoda"),
            FactoryCommand::transfer_shipment(spare_parts()),
            FactoryCommand::unpack_shipments("Yoda"),
            FactoryCommand::unpack_shipments("Luke"),
            FactoryCommand::produce_car("Yoda", CarModel::ModelT),
            FactoryCommand::produce_car("Luke", CarModel::ModelV),
        ];

        let outcomes: Vec<bool> = orders
            .iter()
            .map(|cmd| execute(&mut factory, cmd).is_ok())
            .collect();

        assert_eq!(
            outcomes,
            vec![false, true, true, false, false, false, false, true, true, false, true, false]
        );
        // Two assignments, one transfer plus its curse, one unpack, one car.
        assert_eq!(factory.version(), 6);
        let state = factory.state();
        assert_eq!(state.stock_of(&crate::model::CarPart::new("wheels")), 18);
        assert_eq!(state.stock_of(&crate::model::CarPart::new("engine")), 6);
        assert!(state.shipments_waiting_to_be_unpacked().is_empty());
    }

    #[test]
    fn rehydrated_factory_decides_like_the_live_one() {
        let mut live = test_factory();
        execute(&mut live, &FactoryCommand::assign_employee("Yoda")).unwrap();
        execute(&mut live, &FactoryCommand::transfer_shipment(spare_parts())).unwrap();

        let rebuilt = Factory::from_journal(live.id_typed(), live.journal().to_vec());
        let cmd = FactoryCommand::unpack_shipments("Yoda");

        assert_eq!(rebuilt.handle(&cmd), live.handle(&cmd));
        assert_eq!(rebuilt.version(), live.version());
    }
}
