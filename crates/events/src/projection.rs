use crate::{Event, EventEnvelope};

/// A projection builds a read model from an append-only event stream.
///
/// Read models are **disposable**: drop one and replay the journal to get it
/// back. The journal is the only source of truth.
///
/// `apply` should be idempotent where it can be; `ProjectionRunner` adds
/// sequence-number tracking on top so replays of already-seen envelopes are
/// refused before they reach the projection.
pub trait Projection {
    type Ev: Event;

    /// Apply a single event to the read model.
    ///
    /// Events that are irrelevant to this projection are ignored.
    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>);
}
