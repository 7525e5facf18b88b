use herald_common::prelude::*;

use super::Message;
use crate::events::Sink;

/// A destination queue an EVENT task publishes to. Implementations must be safe to share across
/// the threads of the task execution loop.
pub trait ObservableQueue: Send + Sync {
    /// Transport backing the queue.
    fn get_type(&self) -> Sink;

    /// Name of the queue within its transport.
    fn get_name(&self) -> &str;

    /// Composite identifier, `<kind>:<name>`.
    fn get_uri(&self) -> String {
        self.get_type().queue_uri(self.get_name())
    }

    /// Publishes the messages. Transport failures are returned to the caller as is.
    fn publish(&self, messages: Vec<Message>) -> TegResult<()>;

    /// Acknowledges the messages, returns the ids that were acknowledged.
    fn ack(&self, messages: Vec<Message>) -> TegResult<Vec<InlineStr>>;

    /// Number of messages currently held by the queue.
    fn size(&self) -> usize;
}
