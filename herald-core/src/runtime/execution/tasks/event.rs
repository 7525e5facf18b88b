use std::time::Duration;

use herald_common::prelude::*;
use herald_common::TaskType;

use super::payload;
use super::sink_resolver::SinkResolver;
use super::workflow_system_task::{CancelOutcome, WorkflowSystemTask};
use crate::config::Properties;
use crate::events::queue::Message;
use crate::events::EventQueues;
use crate::model::{TaskModel, TaskStatus, WorkflowModel};

/// The EVENT task publishes a message describing the workflow and the task input to the queue
/// named by the task's `sink` input, then completes.
///
/// The task waits in SCHEDULED for the readiness delay before the message is sent; calls to
/// `execute` during that window leave it untouched.
pub struct Event {
    sink_resolver: SinkResolver,
    readiness_delay: Duration,
}

impl Event {
    pub fn new(event_queues: Arc<EventQueues>, properties: &Properties) -> Self {
        Self {
            sink_resolver: SinkResolver::new(event_queues, properties.event_queue_auto_create),
            readiness_delay: properties.get_event_readiness_delay(),
        }
    }

    fn is_ready(&self, task: &TaskModel) -> bool {
        task.time_since_scheduled() as u128 >= self.readiness_delay.as_millis()
    }
}

impl WorkflowSystemTask for Event {
    fn get_task_type(&self) -> &str {
        TaskType::Event.as_ref()
    }

    fn start(&self, workflow: &WorkflowModel, task: &mut TaskModel) -> TegResult<()> {
        let payload_json = payload::to_json(&payload::build(workflow, task))?;
        let message = Message::new(
            task.task_id.clone(),
            Some(payload_json),
            task.task_id.clone(),
        );

        // a failed resolution has already failed the task
        if let Ok(queue) = self.sink_resolver.resolve(workflow, task) {
            queue.publish(vec![message])?;
            task.status = TaskStatus::Completed;
            info!(
                "task {} of {} published event to {}",
                task.task_id,
                workflow.to_short_string(),
                queue.get_uri()
            );
        }
        Ok(())
    }

    fn execute(&self, workflow: &WorkflowModel, task: &mut TaskModel) -> TegResult<bool> {
        if task.status != TaskStatus::Scheduled {
            return Ok(false);
        }
        if !self.is_ready(task) {
            trace!(
                "task {} scheduled {}ms ago, waiting for {:?}",
                task.task_id,
                task.time_since_scheduled(),
                self.readiness_delay
            );
            return Ok(false);
        }

        self.start(workflow, task)?;
        Ok(true)
    }

    fn cancel(&self, workflow: &WorkflowModel, task: &mut TaskModel) -> TegResult<CancelOutcome> {
        let message = Message::new(task.task_id.clone(), None, task.task_id.clone());
        match self.sink_resolver.resolve(workflow, task) {
            Ok(queue) => {
                queue.ack(vec![message])?;
                debug!("acknowledged task {} on {}", task.task_id, queue.get_uri());
                Ok(CancelOutcome::Acknowledged)
            }
            Err(e) => {
                warn!(
                    "nothing to acknowledge for cancelled task {}: {}",
                    task.task_id,
                    e.message()
                );
                Ok(CancelOutcome::NothingToAcknowledge)
            }
        }
    }
}
