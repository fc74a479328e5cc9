use std::collections::{BTreeMap, HashMap};

use serde_json::Value as JsonValue;
use thiserror::Error;

use workshop_core::AggregateId;
use workshop_events::{EventEnvelope, Projection, ProjectionError, ProjectionRunner};
use workshop_factory::{CarModel, CarPart, FactoryEvent};

/// Stock and output of one factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryStock {
    pub parts: BTreeMap<CarPart, i64>,
    pub cars_produced: BTreeMap<String, u32>,
}

impl FactoryStock {
    pub fn stock_of(&self, part: &CarPart) -> i64 {
        self.parts.get(part).copied().unwrap_or(0)
    }

    pub fn cars_of(&self, model: CarModel) -> u32 {
        self.cars_produced.get(&model.to_string()).copied().unwrap_or(0)
    }

    pub fn total_cars(&self) -> u32 {
        self.cars_produced.values().sum()
    }
}

impl Projection for FactoryStock {
    type Ev = FactoryEvent;

    fn apply(&mut self, envelope: &EventEnvelope<FactoryEvent>) {
        match envelope.payload() {
            FactoryEvent::ShipmentUnpacked(e) => {
                for pack in &e.packs {
                    *self.parts.entry(pack.part.clone()).or_insert(0) += i64::from(pack.quantity);
                }
            }
            FactoryEvent::CarProduced(e) => {
                for pack in &e.packs {
                    *self.parts.entry(pack.part.clone()).or_insert(0) -= i64::from(pack.quantity);
                }
                *self.cars_produced.entry(e.model.to_string()).or_insert(0) += 1;
            }
            FactoryEvent::EmployeeAssigned(_)
            | FactoryEvent::ShipmentTransferred(_)
            | FactoryEvent::CurseWordUttered(_) => {}
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryProjectionError {
    #[error("failed to deserialize factory event: {0}")]
    Deserialize(String),

    #[error("sequence gap in stream {aggregate_id} (last={last}, found={found})")]
    SequenceGap {
        aggregate_id: AggregateId,
        last: u64,
        found: u64,
    },

    #[error("projection refused envelope: {0:?}")]
    Runner(ProjectionError),
}

/// Inventory read model across factories, one cursor per stream.
///
/// Envelopes at or below a stream's cursor are replays and are ignored.
/// Envelopes for other aggregate types are ignored too.
#[derive(Debug, Default)]
pub struct FactoryInventoryProjection {
    streams: HashMap<AggregateId, ProjectionRunner<FactoryStock>>,
}

impl FactoryInventoryProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, factory: AggregateId) -> Option<&FactoryStock> {
        self.streams.get(&factory).map(ProjectionRunner::projection)
    }

    /// Last sequence number applied for `factory` (0 when none).
    pub fn position(&self, factory: AggregateId) -> u64 {
        self.streams
            .get(&factory)
            .and_then(ProjectionRunner::cursor)
            .map(|c| c.last_sequence_number())
            .unwrap_or(0)
    }

    pub fn apply_envelope(&mut self, envelope: &EventEnvelope<JsonValue>) -> Result<(), InventoryProjectionError> {
        if envelope.aggregate_type() != crate::factory_floor::AGGREGATE_TYPE {
            return Ok(());
        }

        let aggregate_id = envelope.aggregate_id();
        let seq = envelope.sequence_number();
        let last = self.position(aggregate_id);

        if seq <= last {
            tracing::debug!(aggregate_id = %aggregate_id, seq, last, "replayed envelope ignored");
            return Ok(());
        }
        if seq != last + 1 {
            return Err(InventoryProjectionError::SequenceGap {
                aggregate_id,
                last,
                found: seq,
            });
        }

        let typed = envelope
            .clone()
            .try_map_payload(serde_json::from_value::<FactoryEvent>)
            .map_err(|e| InventoryProjectionError::Deserialize(e.to_string()))?;

        self.streams
            .entry(aggregate_id)
            .or_insert_with(|| ProjectionRunner::new_for_stream(aggregate_id, FactoryStock::default()))
            .apply(&typed)
            .map_err(InventoryProjectionError::Runner)
    }

    /// Drop everything and replay `envelopes` in stream order.
    pub fn rebuild_from_scratch(
        &mut self,
        envelopes: impl IntoIterator<Item = EventEnvelope<JsonValue>>,
    ) -> Result<(), InventoryProjectionError> {
        self.streams.clear();

        let mut envelopes: Vec<_> = envelopes.into_iter().collect();
        envelopes.sort_by_key(|e| (e.aggregate_id(), e.sequence_number()));

        for envelope in &envelopes {
            self.apply_envelope(envelope)?;
        }
        Ok(())
    }
}
