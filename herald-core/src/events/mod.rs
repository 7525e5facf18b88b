mod event_queue_provider;
mod event_queues;
pub mod queue;
mod sink;

pub use event_queue_provider::EventQueueProvider;
pub use event_queues::EventQueues;
pub use sink::Sink;
