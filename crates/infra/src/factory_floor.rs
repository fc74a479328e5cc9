//! One factory, driven through the dispatcher and narrated as it goes.

use std::time::Duration;

use serde_json::Value as JsonValue;

use workshop_events::{EventBus, EventEnvelope};
use workshop_factory::{Factory, FactoryCommand, FactoryEvent, FactoryId, FactoryState};

use crate::command_dispatcher::{CommandDispatcher, DispatchError};
use crate::journal_store::JournalStore;

pub const AGGREGATE_TYPE: &str = "factory";

/// Runs commands against a single factory stream.
///
/// Accepted commands take time: each piece of work is logged and then
/// sleeps for `work_delay`. Rejections are logged as warnings and returned.
#[derive(Debug)]
pub struct FactoryFloor<S, B> {
    factory_id: FactoryId,
    dispatcher: CommandDispatcher<S, B>,
    work_delay: Duration,
}

impl<S, B> FactoryFloor<S, B>
where
    S: JournalStore,
    B: EventBus<EventEnvelope<JsonValue>>,
{
    pub fn new(factory_id: FactoryId, dispatcher: CommandDispatcher<S, B>, work_delay: Duration) -> Self {
        Self {
            factory_id,
            dispatcher,
            work_delay,
        }
    }

    pub fn factory_id(&self) -> FactoryId {
        self.factory_id
    }

    pub fn order(&self, command: FactoryCommand) -> Result<Vec<FactoryEvent>, DispatchError> {
        tracing::info!(factory = %self.factory_id, command = command_type(&command), "?> Command: {command}");

        let committed = match self.dispatcher.dispatch(
            self.factory_id.0,
            AGGREGATE_TYPE,
            command.clone(),
            |id| Factory::empty(FactoryId::new(id)),
        ) {
            Ok(committed) => committed,
            Err(err) => {
                if err.is_rejection() {
                    tracing::warn!(factory = %self.factory_id, ":> {err}");
                } else {
                    tracing::error!(factory = %self.factory_id, error = %err, "command failed");
                }
                return Err(err);
            }
        };

        for work in command.work() {
            tracing::info!(factory = %self.factory_id, "{work}");
            if !self.work_delay.is_zero() {
                std::thread::sleep(self.work_delay);
            }
        }

        let events = committed
            .into_iter()
            .map(|stored| {
                serde_json::from_value::<FactoryEvent>(stored.payload)
                    .map_err(|e| DispatchError::Deserialize(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for event in &events {
            tracing::info!(factory = %self.factory_id, event = workshop_events::Event::event_type(event), "!> {event}");
        }

        Ok(events)
    }

    /// Everything recorded for this factory so far.
    pub fn journal(&self) -> Result<Vec<FactoryEvent>, DispatchError> {
        self.dispatcher.load_events(self.factory_id.0)
    }

    pub fn state(&self) -> Result<FactoryState, DispatchError> {
        Ok(FactoryState::new(self.journal()?))
    }
}

fn command_type(command: &FactoryCommand) -> &'static str {
    workshop_events::Command::command_type(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use workshop_core::AggregateId;
    use workshop_events::InMemoryEventBus;
    use workshop_factory::{CarModel, CarPartPack, Shipment};

    use crate::journal_store::InMemoryJournalStore;

    fn floor() -> FactoryFloor<InMemoryJournalStore, Arc<InMemoryEventBus<EventEnvelope<JsonValue>>>> {
        let dispatcher = CommandDispatcher::new(InMemoryJournalStore::new(), Arc::new(InMemoryEventBus::new()));
        FactoryFloor::new(FactoryId::new(AggregateId::new()), dispatcher, Duration::ZERO)
    }

    #[test]
    fn accepted_orders_return_recorded_events() {
        let floor = floor();
        floor.order(FactoryCommand::assign_employee("Yoda")).unwrap();

        let events = floor
            .order(FactoryCommand::transfer_shipment(Shipment::new(
                "model T spare parts",
                vec![CarPartPack::new("wheels", 20), CarPartPack::new("engine", 7)],
            )))
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], FactoryEvent::CurseWordUttered(_)));
        assert_eq!(floor.journal().unwrap().len(), 3);
    }

    #[test]
    fn rejected_orders_leave_the_journal_alone() {
        let floor = floor();

        let err = floor
            .order(FactoryCommand::produce_car("Yoda", CarModel::ModelT))
            .unwrap_err();

        assert_eq!(err.to_string(), "Yoda must be assigned to the factory to build a car");
        assert!(floor.journal().unwrap().is_empty());
    }

    #[test]
    fn state_reflects_the_stored_journal() {
        let floor = floor();
        floor.order(FactoryCommand::assign_employee("Yoda")).unwrap();
        floor.order(FactoryCommand::assign_employee("Luke")).unwrap();

        let state = floor.state().unwrap();

        assert_eq!(state.employees().len(), 2);
        assert!(state.shipments_waiting_to_be_unpacked().is_empty());
    }
}
