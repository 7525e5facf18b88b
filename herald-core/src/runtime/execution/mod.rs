mod tasks;

pub use tasks::{
    payload, CancelOutcome, Event, SinkResolver, SystemTaskRegistry, WorkflowSystemTask,
};
