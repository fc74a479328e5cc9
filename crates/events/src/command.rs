/// A message asking something to happen.
///
/// Commands (and basket messages) represent **intent**. They are transient,
/// may be rejected, and are turned into events (facts) when accepted. Because
/// they are plain data they can be queued, serialized and replayed later, which
/// is what decouples the sender from the handler in time.
///
/// Commands must be:
/// - **Cloneable**: copied for queues, retries and logging
/// - **Send + Sync + 'static**: own their data so they can cross threads
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable command name (e.g. "factory.produce_car").
    fn command_type(&self) -> &'static str;
}
