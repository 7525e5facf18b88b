mod event;
pub mod payload;
mod sink_resolver;
mod system_task_registry;
mod workflow_system_task;

pub use event::Event;
pub use sink_resolver::SinkResolver;
pub use system_task_registry::SystemTaskRegistry;
pub use workflow_system_task::{CancelOutcome, WorkflowSystemTask};
