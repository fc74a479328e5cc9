use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workshop_core::AggregateId;

/// Envelope for an event, carrying stream metadata.
///
/// This is the unit published on the bus after a journal append.
///
/// - **Append-only**: `sequence_number` increases monotonically per stream.
/// - `payload` is the domain event (typed, or JSON once it left its crate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    aggregate_id: AggregateId,
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        aggregate_id: AggregateId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> AggregateId {
        self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }

    /// Swap the payload while keeping the stream metadata (e.g. JSON → typed).
    pub fn try_map_payload<F, T, Err>(self, f: F) -> Result<EventEnvelope<T>, Err>
    where
        F: FnOnce(E) -> Result<T, Err>,
    {
        Ok(EventEnvelope {
            event_id: self.event_id,
            aggregate_id: self.aggregate_id,
            aggregate_type: self.aggregate_type,
            sequence_number: self.sequence_number,
            payload: f(self.payload)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_map_payload_keeps_metadata() {
        let id = AggregateId::new();
        let env = EventEnvelope::new(Uuid::now_v7(), id, "factory", 7, "42".to_string());
        let event_id = env.event_id();

        let mapped = env
            .try_map_payload(|s| s.parse::<u32>())
            .unwrap();

        assert_eq!(*mapped.payload(), 42);
        assert_eq!(mapped.aggregate_id(), id);
        assert_eq!(mapped.aggregate_type(), "factory");
        assert_eq!(mapped.sequence_number(), 7);
        assert_eq!(mapped.event_id(), event_id);
    }

    #[test]
    fn try_map_payload_surfaces_errors() {
        let env = EventEnvelope::new(Uuid::now_v7(), AggregateId::new(), "factory", 1, "x".to_string());
        assert!(env.try_map_payload(|s| s.parse::<u32>()).is_err());
    }
}
