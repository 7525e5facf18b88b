use herald_common::prelude::*;

use super::queue::ObservableQueue;
use super::Sink;

/// Creates queues of one transport. `EventQueues` routes to a provider by the `<kind>` prefix of
/// the queue identifier.
pub trait EventQueueProvider: Send + Sync {
    fn get_queue_type(&self) -> Sink;

    fn get_queue(&self, queue_name: &str) -> TegResult<Arc<dyn ObservableQueue>>;
}
