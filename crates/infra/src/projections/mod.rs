//! Read models built from published envelopes.
//!
//! Every projection here is disposable and rebuildable from the journal, and
//! idempotent under at-least-once delivery.

pub mod inventory;
