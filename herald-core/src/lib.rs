mod config;
mod dao;
mod events;
mod model;
mod runtime;
mod utils;

pub use config::Properties;
pub use dao::QueueDao;
pub use events::queue::{
    ConductorEventQueueProvider, ConductorObservableQueue, Message, ObservableQueue,
};
pub use events::{EventQueueProvider, EventQueues, Sink};
pub use model::{TaskModel, TaskStatus, WorkflowModel, WorkflowStatus};
pub use runtime::{
    payload, CancelOutcome, Event, SinkResolver, SystemTaskRegistry, WorkflowSystemTask,
};
pub use utils::ParametersUtils;
