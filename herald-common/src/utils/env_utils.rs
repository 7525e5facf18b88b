use std::env;

use strum_macros::{AsRefStr, EnumString};

use crate::prelude::*;

pub struct EnvUtils;

impl EnvUtils {
    pub fn get_system_parameters_value(
        sys_param: &str,
        task_id: Option<&InlineStr>,
    ) -> Option<InlineStr> {
        if SystemParameters::WfTaskId.as_ref().eq(sys_param) {
            task_id.cloned()
        } else {
            env::var(sys_param).ok().map(InlineStr::from)
        }
    }
}

#[derive(Clone, Copy, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
enum SystemParameters {
    WfTaskId,
    SfEnv,
    SfStack,
}

#[cfg(test)]
mod tests {
    use super::EnvUtils;
    use crate::prelude::InlineStr;

    #[test]
    fn task_id_is_a_system_parameter() {
        let task_id = InlineStr::from("t-1");
        assert_eq!(
            EnvUtils::get_system_parameters_value("WF_TASK_ID", Some(&task_id)),
            Some(task_id)
        );
        assert_eq!(EnvUtils::get_system_parameters_value("WF_TASK_ID", None), None);
    }
}
