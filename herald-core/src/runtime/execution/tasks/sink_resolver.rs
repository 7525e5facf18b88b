use herald_common::prelude::*;

use crate::events::queue::ObservableQueue;
use crate::events::{EventQueues, Sink};
use crate::model::{TaskModel, WorkflowModel};
use crate::utils::ParametersUtils;

/// Turns the `sink` input of an EVENT task into the queue the event goes to.
///
/// Accepted forms, tested in this order:
/// - `conductor`: the internal queue `<workflowType>:<taskReferenceName>`
/// - `conductor...`: the internal queue named by the whole value
/// - `sqs:<name>`: the external queue `<name>`
pub struct SinkResolver {
    event_queues: Arc<EventQueues>,
    auto_create: bool,
}

impl SinkResolver {
    pub const SINK_PARAMETER: &'static str = "sink";
    pub const EVENT_PRODUCED: &'static str = "event_produced";

    const CONDUCTOR_SINK: &'static str = "conductor";
    const SQS_PREFIX: &'static str = "sqs:";

    pub fn new(event_queues: Arc<EventQueues>, auto_create: bool) -> Self {
        Self {
            event_queues,
            auto_create,
        }
    }

    /// Resolves the task's sink to a queue.
    ///
    /// On failure the task is already marked FAILED with the reason, and the error is returned
    /// for the caller to log or inspect. Once the sink syntax is accepted, the attempted
    /// destination is recorded in the output under `event_produced`, even when the lookup fails.
    pub fn resolve(
        &self,
        workflow: &WorkflowModel,
        task: &mut TaskModel,
    ) -> TegResult<Arc<dyn ObservableQueue>> {
        let sink_value = match Self::sink_value(workflow, task) {
            Ok(sink_value) => sink_value,
            Err(e) => {
                error!(
                    "failed to evaluate sink of task {} in {}: {}",
                    task.task_id,
                    workflow.to_short_string(),
                    e.message()
                );
                task.fail(format!(
                    "Error when evaluating the specified sink: {}, error: {}",
                    Self::raw_sink(task),
                    e.message()
                ));
                return Err(e);
            }
        };

        let (sink, queue_name) = match Self::parse(&sink_value, workflow, task) {
            Some(parsed) => parsed,
            None => {
                let reason = format!("Invalid / Unsupported sink specified: {}", sink_value);
                task.fail(reason.as_str());
                return Err(ErrorCode::IllegalArgument(reason));
            }
        };

        let event_produced = sink.queue_uri(&queue_name);
        task.output_data.insert(
            Self::EVENT_PRODUCED.into(),
            Object::from(event_produced.as_str()),
        );

        match self.event_queues.get_queue(&event_produced, self.auto_create) {
            Ok(queue) => Ok(queue),
            Err(e) => {
                error!("{:?}", e);
                task.fail(format!(
                    "Error when trying to access the specified queue/topic: {}, error: {}",
                    sink_value,
                    e.message()
                ));
                Err(e)
            }
        }
    }

    /// Splits an already substituted sink value into its transport and queue name, `None` when
    /// the value is not a supported sink.
    pub fn parse(
        sink_value: &str,
        workflow: &WorkflowModel,
        task: &TaskModel,
    ) -> Option<(Sink, InlineStr)> {
        if sink_value == Self::CONDUCTOR_SINK {
            let mut queue_name = workflow.workflow_name.clone();
            queue_name.push(':');
            queue_name.push_str(&task.reference_task_name);
            Some((Sink::Internal, queue_name))
        } else if sink_value.starts_with(Self::CONDUCTOR_SINK) {
            Some((Sink::Internal, sink_value.into()))
        } else {
            sink_value
                .strip_prefix(Self::SQS_PREFIX)
                .map(|queue_name| (Sink::External, queue_name.into()))
        }
    }

    fn raw_sink(task: &TaskModel) -> InlineStr {
        match task.input_data.get(Self::SINK_PARAMETER) {
            Some(Object::Null) | None => InlineStr::from("null"),
            Some(value) => value.to_string(),
        }
    }

    fn sink_value(workflow: &WorkflowModel, task: &TaskModel) -> TegResult<InlineStr> {
        let raw = Self::raw_sink(task);
        let input = HashMap::from([(InlineStr::from(Self::SINK_PARAMETER), Object::from(raw))]);
        let replaced = ParametersUtils::get_task_input(&input, workflow, Some(&task.task_id))?;

        Ok(match replaced.get(Self::SINK_PARAMETER) {
            Some(Object::Null) | None => InlineStr::from("null"),
            Some(value) => value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;

    fn context(sink: &str) -> (WorkflowModel, TaskModel) {
        let workflow = WorkflowModel::new("wf-1".into(), "order_flow".into(), 1);
        let mut task = TaskModel::new(TaskStatus::Scheduled);
        task.task_id = "task-1".into();
        task.reference_task_name = "notify_ref".into();
        task.input_data.insert("sink".into(), sink.into());
        (workflow, task)
    }

    fn event_produced(task: &TaskModel) -> Option<&str> {
        task.output_data
            .get(SinkResolver::EVENT_PRODUCED)
            .and_then(|x| x.as_string().ok())
            .map(|x| x.as_str())
    }

    #[test]
    fn parse_forms() {
        let (workflow, task) = context("");
        assert_eq!(
            SinkResolver::parse("conductor", &workflow, &task),
            Some((Sink::Internal, InlineStr::from("order_flow:notify_ref")))
        );
        assert_eq!(
            SinkResolver::parse("conductor:custom", &workflow, &task),
            Some((Sink::Internal, InlineStr::from("conductor:custom")))
        );
        assert_eq!(
            SinkResolver::parse("sqs:myqueue", &workflow, &task),
            Some((Sink::External, InlineStr::from("myqueue")))
        );
        assert_eq!(SinkResolver::parse("Conductor", &workflow, &task), None);
        assert_eq!(SinkResolver::parse("sqs", &workflow, &task), None);
    }

    #[test]
    fn default_internal_queue() {
        let resolver = SinkResolver::new(Arc::new(EventQueues::with_conductor_queues()), true);
        let (workflow, mut task) = context("conductor");
        let queue = resolver.resolve(&workflow, &mut task).ok().expect("queue");
        assert_eq!(queue.get_name(), "order_flow:notify_ref");
        assert_eq!(event_produced(&task), Some("Conductor:order_flow:notify_ref"));
        assert_eq!(task.status, TaskStatus::Scheduled);
    }

    #[test]
    fn invalid_sink_fails_without_output() {
        let resolver = SinkResolver::new(Arc::new(EventQueues::with_conductor_queues()), true);
        let (workflow, mut task) = context("invalid");
        assert!(resolver.resolve(&workflow, &mut task).is_err());
        assert_eq!(task.status, TaskStatus::Failed);
        assert!(task
            .reason_for_incompletion
            .contains("Invalid / Unsupported sink specified: invalid"));
        assert!(event_produced(&task).is_none());
    }

    #[test]
    fn missing_sink_is_invalid() {
        let resolver = SinkResolver::new(Arc::new(EventQueues::with_conductor_queues()), true);
        let (workflow, mut task) = context("");
        task.input_data.clear();
        assert!(resolver.resolve(&workflow, &mut task).is_err());
        assert_eq!(
            task.reason_for_incompletion.as_str(),
            "Invalid / Unsupported sink specified: null"
        );
    }

    #[test]
    fn lookup_failure_keeps_event_produced() {
        // no provider for External queues
        let resolver = SinkResolver::new(Arc::new(EventQueues::with_conductor_queues()), true);
        let (workflow, mut task) = context("sqs:myqueue");
        let err = resolver.resolve(&workflow, &mut task).err().expect("lookup fails");
        assert_eq!(event_produced(&task), Some("External:myqueue"));
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(
            task.reason_for_incompletion.as_str(),
            format!(
                "Error when trying to access the specified queue/topic: sqs:myqueue, error: {}",
                err.message()
            )
        );
    }

    #[test]
    fn evaluation_error_has_its_own_reason() {
        let resolver = SinkResolver::new(Arc::new(EventQueues::with_conductor_queues()), true);
        let (mut workflow, mut task) = context("conductor");
        // a workflow task without reference name breaks the substitution context
        workflow.tasks.push(TaskModel::new(TaskStatus::Completed));
        let err = resolver.resolve(&workflow, &mut task).err().expect("evaluation fails");
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(
            task.reason_for_incompletion.as_str(),
            format!(
                "Error when evaluating the specified sink: conductor, error: {}",
                err.message()
            )
        );
        assert!(!task
            .reason_for_incompletion
            .contains("Invalid / Unsupported sink specified"));
        assert!(event_produced(&task).is_none());
    }

    #[test]
    fn templated_sink() {
        let resolver = SinkResolver::new(Arc::new(EventQueues::with_conductor_queues()), true);
        let (mut workflow, mut task) = context("conductor:${workflow.input.topic}");
        workflow.input.insert("topic".into(), "billing".into());
        let queue = resolver.resolve(&workflow, &mut task).ok().expect("queue");
        assert_eq!(queue.get_name(), "conductor:billing");
        assert_eq!(event_produced(&task), Some("Conductor:conductor:billing"));
    }

    #[test]
    fn resolution_is_stable() {
        let resolver = SinkResolver::new(Arc::new(EventQueues::with_conductor_queues()), true);
        let (workflow, mut task) = context("conductor");
        let first = resolver.resolve(&workflow, &mut task).ok().expect("queue");
        let first_produced = event_produced(&task).map(str::to_string);
        let second = resolver.resolve(&workflow, &mut task).ok().expect("queue");
        assert_eq!(event_produced(&task).map(str::to_string), first_produced);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
