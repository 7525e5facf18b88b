mod execution;

pub use execution::{
    payload, CancelOutcome, Event, SinkResolver, SystemTaskRegistry, WorkflowSystemTask,
};
