/// Execute an aggregate command deterministically (no IO, no async).
///
/// The object-style lifecycle in one call:
///
/// 1. **Decide**: `aggregate.handle(command)` produces events without mutating
/// 2. **Record**: each event is applied to the aggregate in order
///
/// Nothing is recorded when the command is rejected. For the journal-backed
/// pipeline (append, publish) use the infra `CommandDispatcher`.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: workshop_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
