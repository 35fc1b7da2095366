use agrismart_core::Aggregate;

use crate::event::Event;

/// Execute an aggregate command deterministically (no IO, no async).
///
/// 1. **Decide**: `aggregate.handle(command)` produces events without mutating.
/// 2. **Evolve**: each event is applied via `aggregate.apply(event)`.
///
/// If `handle` rejects the command nothing is applied, so a failed command
/// never leaves the aggregate half-updated.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
    A::Event: Event,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
        tracing::trace!(
            event_type = ev.event_type(),
            occurred_at = %ev.occurred_at(),
            version = aggregate.version(),
            "event applied"
        );
    }
    Ok(events)
}
