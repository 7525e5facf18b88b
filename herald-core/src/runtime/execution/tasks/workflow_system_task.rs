use herald_common::prelude::*;

use crate::model::{TaskModel, WorkflowModel};

/// Result of cancelling a system task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The task's outstanding work was acknowledged on its queue.
    Acknowledged,
    /// There was no queue to acknowledge on, the cancellation is a no-op.
    NothingToAcknowledge,
}

pub trait WorkflowSystemTask: Send + Sync {
    /// Start the task execution.
    ///
    /// Called only once, and first, when the task status is SCHEDULED.
    fn start(&self, _workflow: &WorkflowModel, _task: &mut TaskModel) -> TegResult<()> {
        // Do nothing unless overridden by the task implementation
        Ok(())
    }

    /// "Execute" the task.
    ///
    /// Called after `start`, if the task status is not terminal. Can be called more than once.
    /// Returns true when the task was changed and must be persisted.
    fn execute(&self, _workflow: &WorkflowModel, _task: &mut TaskModel) -> TegResult<bool> {
        Ok(false)
    }

    /// Cancel task execution
    fn cancel(&self, _workflow: &WorkflowModel, _task: &mut TaskModel) -> TegResult<CancelOutcome> {
        Ok(CancelOutcome::NothingToAcknowledge)
    }

    /// return True if the task is supposed to be started asynchronously using internal queues.
    fn is_async(&self) -> bool {
        false
    }

    /// return name of the system task
    fn get_task_type(&self) -> &str;
}
