use dashmap::mapref::one::Ref;
use dashmap::DashMap;
use herald_common::prelude::*;
use herald_common::TaskType;

use super::event::Event;
use super::workflow_system_task::WorkflowSystemTask;
use crate::config::Properties;
use crate::events::EventQueues;

/// A container that holds a mapping of system task types `TaskType` to `WorkflowSystemTask`
/// instances.
pub struct SystemTaskRegistry {
    registry: DashMap<InlineStr, Box<dyn WorkflowSystemTask>>,
}

impl SystemTaskRegistry {
    /// A registry with the built-in system tasks.
    pub fn new(event_queues: Arc<EventQueues>, properties: &Properties) -> Self {
        let registry = DashMap::new();
        registry.insert(
            TaskType::Event.as_ref().into(),
            Box::new(Event::new(event_queues, properties)) as Box<dyn WorkflowSystemTask>,
        );
        Self { registry }
    }

    pub fn get(&self, task_type: &str) -> TegResult<Ref<'_, InlineStr, Box<dyn WorkflowSystemTask>>> {
        self.registry.get(task_type).ok_or_else(|| {
            ErrorCode::IllegalArgument(format!("{} not found in SystemTaskRegistry", task_type))
        })
    }

    pub fn is_system_task(&self, task_type: &str) -> bool {
        self.registry.contains_key(task_type)
    }

    pub fn register(&self, task: Box<dyn WorkflowSystemTask>) {
        self.registry.insert(task.get_task_type().into(), task);
    }

    pub fn unregister(&self, task_type: &str) {
        self.registry.remove(task_type);
    }
}
