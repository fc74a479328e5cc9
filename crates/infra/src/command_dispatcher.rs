//! Command execution pipeline (application-level orchestration).
//!
//! ```text
//! Command
//!   ↓
//! 1. Load the stream from the journal
//!   ↓
//! 2. Rehydrate the aggregate (apply historical events)
//!   ↓
//! 3. Handle the command (pure decision, produces events)
//!   ↓
//! 4. Append events (optimistic concurrency check)
//!   ↓
//! 5. Publish envelopes on the bus (projections, narrators, ...)
//! ```
//!
//! This module contains no IO itself; it composes `JournalStore` and `EventBus`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use workshop_core::{Aggregate, AggregateId, DomainError, ExpectedVersion};
use workshop_events::{EventBus, EventEnvelope};

use crate::journal_store::{JournalStore, JournalStoreError, StoredEvent, UncommittedEvent};

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Stale aggregate version.
    #[error("concurrency conflict: {0}")]
    Concurrency(String),

    /// The command carried invalid data.
    #[error("{0}")]
    Validation(String),

    /// A business rule refused the command.
    #[error("{0}")]
    InvariantViolation(String),

    /// Historical payloads did not deserialize into the aggregate event type.
    #[error("cannot read journal: {0}")]
    Deserialize(String),

    #[error("journal failure: {0}")]
    Store(JournalStoreError),

    /// Publication failed after a successful append (retry may duplicate).
    #[error("publication failed: {0}")]
    Publish(String),
}

impl DispatchError {
    /// True when the domain refused the command, as opposed to a plumbing failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DispatchError::Validation(_) | DispatchError::InvariantViolation(_))
    }
}

impl From<JournalStoreError> for DispatchError {
    fn from(value: JournalStoreError) -> Self {
        match value {
            JournalStoreError::Concurrency(msg) => DispatchError::Concurrency(msg),
            other => DispatchError::Store(other),
        }
    }
}

impl From<DomainError> for DispatchError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => DispatchError::Validation(msg),
            DomainError::InvariantViolation(msg) => DispatchError::InvariantViolation(msg),
        }
    }
}

/// Reusable command execution engine for event-sourced aggregates.
///
/// Events are appended before they are published; if the append fails,
/// nothing is published. A publish failure after a successful append is
/// reported, and the events stay recorded (at-least-once delivery).
#[derive(Debug)]
pub struct CommandDispatcher<S, B> {
    store: S,
    bus: B,
}

impl<S, B> CommandDispatcher<S, B> {
    pub fn new(store: S, bus: B) -> Self {
        Self { store, bus }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S, B> CommandDispatcher<S, B>
where
    S: JournalStore,
    B: EventBus<EventEnvelope<JsonValue>>,
{
    /// Dispatch a command through the full pipeline.
    ///
    /// `make_aggregate` builds a fresh, empty aggregate for `aggregate_id`;
    /// the dispatcher then replays the stream into it. Returns the committed
    /// events (empty when the command decided nothing).
    pub fn dispatch<A>(
        &self,
        aggregate_id: AggregateId,
        aggregate_type: impl Into<String>,
        command: A::Command,
        make_aggregate: impl FnOnce(AggregateId) -> A,
    ) -> Result<Vec<StoredEvent>, DispatchError>
    where
        A: Aggregate,
        A::Error: Into<DomainError>,
        A::Event: workshop_events::Event + Serialize + DeserializeOwned,
    {
        // 1) Load history
        let history = self.store.load_stream(aggregate_id)?;
        validate_loaded_stream(aggregate_id, &history)?;
        let expected = ExpectedVersion::Exact(stream_version(&history));

        // 2) Rehydrate
        let mut aggregate = make_aggregate(aggregate_id);
        apply_history(&mut aggregate, &history)?;

        // 3) Decide (no mutation)
        let decided = aggregate
            .handle(&command)
            .map_err(|e| DispatchError::from(Into::<DomainError>::into(e)))?;
        if decided.is_empty() {
            return Ok(vec![]);
        }

        // 4) Persist
        let aggregate_type = aggregate_type.into();
        let uncommitted = decided
            .iter()
            .map(|ev| UncommittedEvent::from_typed(aggregate_id, aggregate_type.clone(), Uuid::now_v7(), ev))
            .collect::<Result<Vec<_>, _>>()?;

        let committed = self.store.append(uncommitted, expected)?;

        // 5) Publish (after append)
        for stored in &committed {
            self.bus
                .publish(stored.to_envelope())
                .map_err(|e| DispatchError::Publish(format!("{e:?}")))?;
        }

        Ok(committed)
    }

    /// Load and deserialize a whole stream into typed events.
    pub fn load_events<E>(&self, aggregate_id: AggregateId) -> Result<Vec<E>, DispatchError>
    where
        E: DeserializeOwned,
    {
        let history = self.store.load_stream(aggregate_id)?;
        validate_loaded_stream(aggregate_id, &history)?;
        history
            .into_iter()
            .map(|stored| {
                serde_json::from_value(stored.payload).map_err(|e| DispatchError::Deserialize(e.to_string()))
            })
            .collect()
    }
}

fn stream_version(stream: &[StoredEvent]) -> u64 {
    stream.last().map(|e| e.sequence_number).unwrap_or(0)
}

fn validate_loaded_stream(aggregate_id: AggregateId, stream: &[StoredEvent]) -> Result<(), DispatchError> {
    // A buggy backend must not leak other streams or reorder this one.
    let mut last = 0u64;
    for (idx, e) in stream.iter().enumerate() {
        if e.aggregate_id != aggregate_id {
            return Err(DispatchError::Store(JournalStoreError::InvalidAppend(format!(
                "loaded stream contains wrong aggregate_id at index {idx}"
            ))));
        }
        if e.sequence_number <= last {
            return Err(DispatchError::Store(JournalStoreError::InvalidAppend(format!(
                "non-monotonic sequence_number in loaded stream (last={last}, found={})",
                e.sequence_number
            ))));
        }
        last = e.sequence_number;
    }
    Ok(())
}

fn apply_history<A>(aggregate: &mut A, history: &[StoredEvent]) -> Result<(), DispatchError>
where
    A: Aggregate,
    A::Event: DeserializeOwned,
{
    for stored in history {
        let ev: A::Event =
            serde_json::from_value(stored.payload.clone()).map_err(|e| DispatchError::Deserialize(e.to_string()))?;
        aggregate.apply(&ev);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use workshop_core::AggregateRoot;
    use workshop_events::InMemoryEventBus;
    use workshop_factory::{Factory, FactoryCommand, FactoryEvent, FactoryId};

    use crate::journal_store::InMemoryJournalStore;

    type Bus = Arc<InMemoryEventBus<EventEnvelope<JsonValue>>>;

    fn dispatcher() -> (CommandDispatcher<InMemoryJournalStore, Bus>, Bus) {
        let bus: Bus = Arc::new(InMemoryEventBus::new());
        (CommandDispatcher::new(InMemoryJournalStore::new(), bus.clone()), bus)
    }

    fn send(
        d: &CommandDispatcher<InMemoryJournalStore, Bus>,
        id: AggregateId,
        command: FactoryCommand,
    ) -> Result<Vec<StoredEvent>, DispatchError> {
        d.dispatch(id, "factory", command, |id| Factory::empty(FactoryId::new(id)))
    }

    #[test]
    fn accepted_commands_are_appended_then_published() {
        let (d, bus) = dispatcher();
        let sub = bus.subscribe();
        let id = AggregateId::new();

        let committed = send(&d, id, FactoryCommand::assign_employee("Yoda")).unwrap();

        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].event_type, "factory.employee_assigned");
        let published: Vec<_> = sub.drain().collect();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].sequence_number(), 1);
    }

    #[test]
    fn history_is_replayed_before_deciding() {
        let (d, _bus) = dispatcher();
        let id = AggregateId::new();
        send(&d, id, FactoryCommand::assign_employee("Yoda")).unwrap();

        let err = send(&d, id, FactoryCommand::assign_employee("Yoda")).unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "the name of Yoda only one can have");
    }

    #[test]
    fn rejected_commands_publish_nothing() {
        let (d, bus) = dispatcher();
        let sub = bus.subscribe();
        let id = AggregateId::new();

        let err = send(&d, id, FactoryCommand::assign_employee("Bender")).unwrap_err();

        assert!(matches!(err, DispatchError::InvariantViolation(_)));
        assert_eq!(sub.drain().count(), 0);
        assert!(d.store().load_stream(id).unwrap().is_empty());
    }

    #[test]
    fn load_events_rebuilds_the_aggregate() {
        let (d, _bus) = dispatcher();
        let id = AggregateId::new();
        send(&d, id, FactoryCommand::assign_employee("Yoda")).unwrap();
        send(&d, id, FactoryCommand::assign_employee("Luke")).unwrap();

        let journal: Vec<FactoryEvent> = d.load_events(id).unwrap();
        let factory = Factory::from_journal(FactoryId::new(id), journal);

        assert_eq!(factory.version(), 2);
        assert_eq!(factory.state().employees().len(), 2);
    }
}
