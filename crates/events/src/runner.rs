//! Projection runner (read model builder).
//!
//! Deterministic replay plus cursor tracking for a single aggregate stream,
//! without making storage assumptions.

use workshop_core::AggregateId;

use crate::{EventEnvelope, Projection};

/// Tracks projection progress for one aggregate stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProjectionCursor {
    aggregate_id: AggregateId,
    last_sequence_number: u64,
}

impl ProjectionCursor {
    pub fn aggregate_id(&self) -> AggregateId {
        self.aggregate_id
    }

    pub fn last_sequence_number(&self) -> u64 {
        self.last_sequence_number
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    StreamMismatch {
        expected: AggregateId,
        found: AggregateId,
    },
    NonMonotonicSequence {
        last: u64,
        found: u64,
    },
}

/// Runs envelopes through a projection and tracks progress.
#[derive(Debug)]
pub struct ProjectionRunner<P>
where
    P: Projection,
{
    projection: P,
    cursor: Option<ProjectionCursor>,
}

impl<P> ProjectionRunner<P>
where
    P: Projection,
{
    pub fn new(projection: P) -> Self {
        Self {
            projection,
            cursor: None,
        }
    }

    /// Create a runner pinned to a specific stream.
    pub fn new_for_stream(aggregate_id: AggregateId, projection: P) -> Self {
        Self {
            projection,
            cursor: Some(ProjectionCursor {
                aggregate_id,
                last_sequence_number: 0,
            }),
        }
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    pub fn into_projection(self) -> P {
        self.projection
    }

    pub fn cursor(&self) -> Option<ProjectionCursor> {
        self.cursor
    }

    /// Apply a single envelope, enforcing stream consistency and monotonic sequencing.
    pub fn apply(&mut self, envelope: &EventEnvelope<P::Ev>) -> Result<(), ProjectionError> {
        let found_stream = envelope.aggregate_id();
        let found_seq = envelope.sequence_number();

        let mut cursor = self.cursor.unwrap_or(ProjectionCursor {
            aggregate_id: found_stream,
            last_sequence_number: 0,
        });

        if cursor.aggregate_id != found_stream {
            return Err(ProjectionError::StreamMismatch {
                expected: cursor.aggregate_id,
                found: found_stream,
            });
        }
        if found_seq <= cursor.last_sequence_number {
            return Err(ProjectionError::NonMonotonicSequence {
                last: cursor.last_sequence_number,
                found: found_seq,
            });
        }

        self.projection.apply(envelope);
        cursor.last_sequence_number = found_seq;
        self.cursor = Some(cursor);
        Ok(())
    }

    /// Apply many envelopes in order.
    pub fn run<'a>(
        &mut self,
        envelopes: impl IntoIterator<Item = &'a EventEnvelope<P::Ev>>,
    ) -> Result<(), ProjectionError>
    where
        P::Ev: 'a,
    {
        for env in envelopes {
            self.apply(env)?;
        }
        Ok(())
    }

    /// Rebuild a projection from scratch by replaying the full history.
    pub fn rebuild_from_scratch<'a>(
        make: impl FnOnce() -> P,
        envelopes: impl IntoIterator<Item = &'a EventEnvelope<P::Ev>>,
    ) -> Result<(P, Option<ProjectionCursor>), ProjectionError>
    where
        P::Ev: 'a,
    {
        let mut runner = ProjectionRunner::new(make());
        runner.run(envelopes)?;
        Ok((runner.projection, runner.cursor))
    }
}
