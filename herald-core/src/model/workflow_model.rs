use chrono::Utc;
use herald_common::prelude::*;

use super::task_model::TaskModel;
use super::WorkflowStatus;

#[derive(Clone, Debug)]
pub struct WorkflowModel {
    pub workflow_id: InlineStr,
    pub correlation_id: InlineStr,
    /// Name of the workflow definition, a.k.a. the workflow type
    pub workflow_name: InlineStr,
    pub workflow_version: i32,
    pub schema_version: i32,
    pub parent_workflow_id: InlineStr,
    pub parent_workflow_task_id: InlineStr,
    pub tasks: Vec<TaskModel>,

    pub variables: HashMap<InlineStr, Object>,
    pub input: HashMap<InlineStr, Object>,
    pub output: HashMap<InlineStr, Object>,

    pub status: WorkflowStatus,
    pub reason_for_incompletion: InlineStr,
    pub create_time: i64,
}

impl WorkflowModel {
    pub fn new(workflow_id: InlineStr, workflow_name: InlineStr, workflow_version: i32) -> Self {
        Self {
            workflow_id,
            correlation_id: InlineStr::new(),
            workflow_name,
            workflow_version,
            schema_version: 2,
            parent_workflow_id: InlineStr::new(),
            parent_workflow_task_id: InlineStr::new(),
            tasks: Vec::default(),

            variables: HashMap::default(),
            input: HashMap::default(),
            output: HashMap::default(),

            status: WorkflowStatus::Running,
            reason_for_incompletion: InlineStr::new(),
            create_time: Utc::now().timestamp_millis(),
        }
    }

    pub fn to_short_string(&self) -> String {
        format!(
            "{}.{}/{}",
            self.workflow_name, self.workflow_version, self.workflow_id
        )
    }

    pub fn get_task_by_ref_name(&self, ref_name: &str) -> TegResult<Option<&TaskModel>> {
        if ref_name.is_empty() {
            return str_err!(UnknownException, "refName passed is null.  Check the workflow execution.  For dynamic tasks, make sure referenceTaskName is set to a not null value");
        }

        Ok(self
            .tasks
            .iter()
            .filter(|task| task.reference_task_name.eq(ref_name))
            .last())
    }
}
