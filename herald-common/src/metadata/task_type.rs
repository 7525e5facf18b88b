use std::str::FromStr;

use strum_macros::{AsRefStr, EnumString};

#[derive(Clone, Copy, Debug, EnumString, AsRefStr, PartialEq, Eq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Event,
    UserDefined,
}

impl TaskType {
    /// Converts a task type string to `TaskType`. For an unknown string, the value is defaulted to
    /// `TaskType::UserDefined`.
    pub fn of(task_type: &str) -> TaskType {
        TaskType::from_str(task_type).unwrap_or(TaskType::UserDefined)
    }
}

#[cfg(test)]
mod tests {
    use super::TaskType;

    #[test]
    fn task_type_names() {
        assert_eq!(TaskType::Event.as_ref(), "EVENT");
        assert_eq!(TaskType::of("EVENT"), TaskType::Event);
        assert_eq!(TaskType::of("encode_task"), TaskType::UserDefined);
    }
}
