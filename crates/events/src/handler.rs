/// Execute an aggregate command deterministically (no IO, no async).
///
/// Combines decision and state evolution in one step:
///
/// 1. **Decide**: Calls `aggregate.handle(command)` to get events (pure, no mutation)
/// 2. **Evolve**: Applies each event to the aggregate via `aggregate.apply(event)`
///
/// A rejected command returns the error and leaves the aggregate untouched,
/// because `handle` never mutates and nothing is applied.
///
/// The aggregate is responsible for its own version tracking during `apply()`
/// (typically +1 per event).
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: poforge_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
