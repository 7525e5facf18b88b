use chrono::Utc;
use herald_common::prelude::*;
use strum_macros::{AsRefStr, EnumString};

#[derive(Clone, Debug)]
pub struct TaskModel {
    pub task_type: InlineStr,
    pub status: TaskStatus,
    pub reference_task_name: InlineStr,
    pub retry_count: i32,
    pub seq: i32,
    pub correlation_id: InlineStr,
    pub poll_count: i32,
    pub task_def_name: InlineStr,
    /// Time when the task was scheduled
    pub scheduled_time: i64,
    /// Time when the task was first polled
    pub start_time: i64,
    /// Time when the task completed executing
    pub end_time: i64,
    /// Time when the task was last updated
    pub update_time: i64,
    pub workflow_instance_id: InlineStr,
    pub workflow_type: InlineStr,
    pub task_id: InlineStr,
    pub reason_for_incompletion: InlineStr,
    pub callback_after_seconds: i64,
    pub worker_id: InlineStr,
    pub iteration: i32,
    pub input_data: HashMap<InlineStr, Object>,
    pub output_data: HashMap<InlineStr, Object>,
}

impl TaskModel {
    pub fn new(status: TaskStatus) -> Self {
        Self {
            task_type: InlineStr::new(),
            status,
            reference_task_name: InlineStr::new(),
            retry_count: 0,
            seq: 0,
            correlation_id: InlineStr::new(),
            poll_count: 0,
            task_def_name: InlineStr::new(),
            scheduled_time: 0,
            start_time: 0,
            end_time: 0,
            update_time: 0,
            workflow_instance_id: InlineStr::new(),
            workflow_type: InlineStr::new(),
            task_id: InlineStr::new(),
            reason_for_incompletion: InlineStr::new(),
            callback_after_seconds: 0,
            worker_id: InlineStr::new(),
            iteration: 0,
            input_data: HashMap::new(),
            output_data: HashMap::new(),
        }
    }

    /// Milliseconds elapsed since the task was scheduled, never negative.
    pub fn time_since_scheduled(&self) -> i64 {
        Utc::now()
            .timestamp_millis()
            .saturating_sub(self.scheduled_time)
            .max(0)
    }

    /// Marks the task FAILED with the given reason.
    pub fn fail(&mut self, reason: impl Into<InlineStr>) {
        self.status = TaskStatus::Failed;
        self.reason_for_incompletion = reason.into();
    }
}

#[derive(Clone, Copy, Debug, EnumString, AsRefStr, PartialEq, Eq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    InProgress,
    Canceled,
    Failed,
    FailedWithTerminalError,
    Completed,
    CompletedWithErrors,
    Scheduled,
    TimedOut,
    Skipped,
}
