mod task_model;
mod workflow;
mod workflow_model;

pub use task_model::{TaskModel, TaskStatus};
pub use workflow::WorkflowStatus;
pub use workflow_model::WorkflowModel;
