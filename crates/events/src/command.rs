/// A user action aimed at an aggregate (command abstraction).
///
/// Commands represent **intent** - a request to change state, e.g. "add a line
/// item costing 25.00". They are transient and are either rejected (validation
/// errors, state unchanged) or turned into events.
///
/// ## Command vs Event
///
/// - **Command**: Intent to do something (e.g., "Remove the last item")
/// - **Event**: Fact that something happened (e.g., "ItemRemoved { sequence: 3 }")
///
/// Commands must be cloneable and own all their data so a front end can log,
/// replay, or queue them.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable command name used in logs (e.g. "purchasing.session.add_item").
    fn command_type(&self) -> &'static str;
}
