mod task_type;

pub use task_type::TaskType;
