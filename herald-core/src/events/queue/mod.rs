mod conductor_queue;
mod message;
mod observable_queue;

pub use conductor_queue::{ConductorEventQueueProvider, ConductorObservableQueue};
pub use message::Message;
pub use observable_queue::ObservableQueue;
