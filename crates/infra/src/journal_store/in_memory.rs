use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use workshop_core::{AggregateId, ExpectedVersion};

use super::{JournalStore, JournalStoreError, StoredEvent, UncommittedEvent};

/// In-memory append-only journal.
///
/// Intended for demos and tests. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryJournalStore {
    streams: RwLock<HashMap<AggregateId, Vec<StoredEvent>>>,
}

impl InMemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_version(stream: &[StoredEvent]) -> u64 {
        stream.last().map(|e| e.sequence_number).unwrap_or(0)
    }
}

impl JournalStore for InMemoryJournalStore {
    fn append(
        &self,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, JournalStoreError> {
        let Some(first) = events.first() else {
            return Ok(vec![]);
        };

        // All events must target the same stream.
        let aggregate_id = first.aggregate_id;
        let aggregate_type = first.aggregate_type.clone();

        for (idx, e) in events.iter().enumerate() {
            if e.aggregate_id != aggregate_id {
                return Err(JournalStoreError::InvalidAppend(format!(
                    "batch contains multiple aggregate_ids (index {idx})"
                )));
            }
            if e.aggregate_type != aggregate_type {
                return Err(JournalStoreError::AggregateTypeMismatch(format!(
                    "batch contains multiple aggregate_types (index {idx})"
                )));
            }
        }

        let mut streams = self.streams.write().map_err(|_| JournalStoreError::Poisoned)?;

        let stream = streams.entry(aggregate_id).or_default();
        let current = Self::current_version(stream);

        if !expected_version.matches(current) {
            return Err(JournalStoreError::Concurrency(format!(
                "expected {expected_version:?}, found {current}"
            )));
        }

        if let Some(existing) = stream.first() {
            if existing.aggregate_type != aggregate_type {
                return Err(JournalStoreError::AggregateTypeMismatch(format!(
                    "stream aggregate_type is '{}', attempted append with '{}'",
                    existing.aggregate_type, aggregate_type
                )));
            }
        }

        let recorded_at = Utc::now();
        let mut next = current + 1;
        let mut committed = Vec::with_capacity(events.len());
        for e in events {
            let stored = StoredEvent {
                event_id: e.event_id,
                aggregate_id: e.aggregate_id,
                aggregate_type: e.aggregate_type,
                sequence_number: next,
                event_type: e.event_type,
                event_version: e.event_version,
                recorded_at,
                payload: e.payload,
            };
            next += 1;
            stream.push(stored.clone());
            committed.push(stored);
        }

        tracing::debug!(
            aggregate_id = %aggregate_id,
            appended = committed.len(),
            version = next - 1,
            "journal appended"
        );

        Ok(committed)
    }

    fn load_stream(&self, aggregate_id: AggregateId) -> Result<Vec<StoredEvent>, JournalStoreError> {
        let streams = self.streams.read().map_err(|_| JournalStoreError::Poisoned)?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn event(aggregate_id: AggregateId, aggregate_type: &str, n: u32) -> UncommittedEvent {
        UncommittedEvent {
            event_id: Uuid::now_v7(),
            aggregate_id,
            aggregate_type: aggregate_type.to_string(),
            event_type: "test.noted".to_string(),
            event_version: 1,
            payload: json!({ "n": n }),
        }
    }

    #[test]
    fn assigns_sequence_numbers_from_one() {
        let store = InMemoryJournalStore::new();
        let id = AggregateId::new();

        let first = store
            .append(vec![event(id, "factory", 1), event(id, "factory", 2)], ExpectedVersion::Exact(0))
            .unwrap();
        let second = store
            .append(vec![event(id, "factory", 3)], ExpectedVersion::Exact(2))
            .unwrap();

        assert_eq!(first.iter().map(|e| e.sequence_number).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(second[0].sequence_number, 3);
        assert_eq!(store.load_stream(id).unwrap().len(), 3);
    }

    #[test]
    fn stale_version_is_rejected_and_nothing_is_written() {
        let store = InMemoryJournalStore::new();
        let id = AggregateId::new();
        store.append(vec![event(id, "factory", 1)], ExpectedVersion::Exact(0)).unwrap();

        let err = store
            .append(vec![event(id, "factory", 2)], ExpectedVersion::Exact(0))
            .unwrap_err();

        assert!(matches!(err, JournalStoreError::Concurrency(_)));
        assert_eq!(store.load_stream(id).unwrap().len(), 1);
    }

    #[test]
    fn streams_do_not_mix() {
        let store = InMemoryJournalStore::new();
        let a = AggregateId::new();
        let b = AggregateId::new();

        let err = store
            .append(vec![event(a, "factory", 1), event(b, "factory", 2)], ExpectedVersion::Any)
            .unwrap_err();
        assert!(matches!(err, JournalStoreError::InvalidAppend(_)));

        store.append(vec![event(a, "factory", 1)], ExpectedVersion::Any).unwrap();
        let err = store
            .append(vec![event(a, "basket", 2)], ExpectedVersion::Any)
            .unwrap_err();
        assert!(matches!(err, JournalStoreError::AggregateTypeMismatch(_)));

        assert!(store.load_stream(b).unwrap().is_empty());
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let store = InMemoryJournalStore::new();
        assert!(store.append(vec![], ExpectedVersion::Exact(42)).unwrap().is_empty());
    }

    #[test]
    fn envelope_keeps_stream_metadata() {
        let store = InMemoryJournalStore::new();
        let id = AggregateId::new();
        let stored = store.append(vec![event(id, "factory", 7)], ExpectedVersion::Any).unwrap();

        let envelope = stored[0].to_envelope();

        assert_eq!(envelope.aggregate_id(), id);
        assert_eq!(envelope.aggregate_type(), "factory");
        assert_eq!(envelope.sequence_number(), 1);
        assert_eq!(envelope.payload()["n"], 7);
    }
}
