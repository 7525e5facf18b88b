use either::Either;
use fancy_regex::Regex;
use herald_common::prelude::*;
use herald_common::{EnvUtils, TaskUtils};

use crate::model::{TaskModel, WorkflowModel};

/// Used to parse and resolve the JSONPath bindings in task inputs.
pub struct ParametersUtils;

impl ParametersUtils {
    /// Replaces every `${...}` expression in `input_params` with the value it points to in the
    /// workflow document (`workflow.*` plus one entry per task reference name). `task_id` is what
    /// the `WF_TASK_ID` system parameter resolves to.
    pub fn get_task_input(
        input_params: &HashMap<InlineStr, Object>,
        workflow: &WorkflowModel,
        task_id: Option<&InlineStr>,
    ) -> TegResult<HashMap<InlineStr, Object>> {
        let workflow_params: HashMap<InlineStr, Object> = HashMap::from([
            (InlineStr::from("input"), workflow.input.clone().into()),
            (InlineStr::from("output"), workflow.output.clone().into()),
            (InlineStr::from("status"), workflow.status.as_ref().into()),
            (
                InlineStr::from("workflowId"),
                workflow.workflow_id.clone().into(),
            ),
            (
                InlineStr::from("parentWorkflowId"),
                workflow.parent_workflow_id.clone().into(),
            ),
            (
                InlineStr::from("parentWorkflowTaskId"),
                workflow.parent_workflow_task_id.clone().into(),
            ),
            (
                InlineStr::from("workflowType"),
                workflow.workflow_name.clone().into(),
            ),
            (InlineStr::from("version"), workflow.workflow_version.into()),
            (
                InlineStr::from("correlationId"),
                workflow.correlation_id.clone().into(),
            ),
            (
                InlineStr::from("reasonForIncompletion"),
                workflow.reason_for_incompletion.clone().into(),
            ),
            (
                InlineStr::from("schemaVersion"),
                workflow.schema_version.into(),
            ),
            (
                InlineStr::from("variables"),
                workflow.variables.clone().into(),
            ),
        ]);

        let mut input_map: HashMap<InlineStr, Object> =
            HashMap::from([(InlineStr::from("workflow"), workflow_params.into())]);
        // For new workflow being started the list of tasks will be empty
        if let ControlFlow::Break(e) = workflow
            .tasks
            .iter()
            .map(|x| &x.reference_task_name)
            .try_for_each(|x| match workflow.get_task_by_ref_name(x) {
                Ok(Some(x)) => {
                    let input_key = if x.iteration > 0 {
                        TaskUtils::remove_iteration_from_task_ref_name(&x.reference_task_name)
                            .into()
                    } else {
                        x.reference_task_name.clone()
                    };
                    input_map.insert(input_key, Self::task_params(x).into());
                    ControlFlow::Continue(())
                }
                Ok(None) => ControlFlow::Continue(()),
                Err(e) => ControlFlow::Break(e),
            })
        {
            return Err(e);
        }

        let mut document_context = Either::Left(input_map);
        Ok(Self::replace(
            input_params.clone(),
            &mut document_context,
            task_id,
        ))
    }

    fn task_params(x: &TaskModel) -> HashMap<InlineStr, Object> {
        let mut task_params: HashMap<InlineStr, Object> = HashMap::default();
        task_params.insert("input".into(), x.input_data.clone().into());
        task_params.insert("output".into(), x.output_data.clone().into());
        task_params.insert("taskType".into(), x.task_type.clone().into());
        task_params.insert("status".into(), x.status.as_ref().into());
        task_params.insert(
            "referenceTaskName".into(),
            x.reference_task_name.clone().into(),
        );
        task_params.insert("retryCount".into(), x.retry_count.into());
        task_params.insert("correlationId".into(), x.correlation_id.clone().into());
        task_params.insert("pollCount".into(), x.poll_count.into());
        task_params.insert("taskDefName".into(), x.task_def_name.clone().into());
        task_params.insert("scheduledTime".into(), x.scheduled_time.into());
        task_params.insert("startTime".into(), x.start_time.into());
        task_params.insert("endTime".into(), x.end_time.into());
        task_params.insert(
            "workflowInstanceId".into(),
            x.workflow_instance_id.clone().into(),
        );
        task_params.insert("taskId".into(), x.task_id.clone().into());
        task_params.insert(
            "reasonForIncompletion".into(),
            x.reason_for_incompletion.clone().into(),
        );
        task_params.insert(
            "callbackAfterSeconds".into(),
            x.callback_after_seconds.into(),
        );
        task_params.insert("workerId".into(), x.worker_id.clone().into());
        task_params.insert("iteration".into(), x.iteration.into());
        task_params
    }

    fn replace(
        input: HashMap<InlineStr, Object>,
        document_context: &mut Either<HashMap<InlineStr, Object>, serde_json::Value>,
        task_id: Option<&InlineStr>,
    ) -> HashMap<InlineStr, Object> {
        let mut replace_map = HashMap::with_capacity(input.len());
        for (k, v) in input {
            let new_value = Self::replace_object(v, document_context, task_id);
            replace_map.insert(k, new_value);
        }
        replace_map
    }

    fn replace_object(
        value: Object,
        document_context: &mut Either<HashMap<InlineStr, Object>, serde_json::Value>,
        task_id: Option<&InlineStr>,
    ) -> Object {
        match value {
            Object::String(value) => Self::replace_variables(value, document_context, task_id),
            Object::Map(value) => Self::replace(value, document_context, task_id).into(),
            Object::List(value) => value
                .into_iter()
                .map(|v| Self::replace_object(v, document_context, task_id))
                .collect::<Vec<_>>()
                .into(),
            v => v,
        }
    }

    fn replace_variables(
        param_string: InlineStr,
        document_context: &mut Either<HashMap<InlineStr, Object>, serde_json::Value>,
        task_id: Option<&InlineStr>,
    ) -> Object {
        lazy_static! {
            static ref DOLLAR_REGEX: Regex =
                Regex::new(r"(?=(?<!\$)\$\{)|(?<=})").expect("regex compile error");
            static ref DOUBLE_DOLLAR_REGEX: Regex =
                Regex::new(r"\$\$\{").expect("regex compile error");
        }

        if param_string.is_empty() {
            return param_string.into();
        }

        let text = param_string.as_str();
        let mut values = Vec::default();
        let mut last = 0;
        for m in DOLLAR_REGEX.find_iter(text) {
            match m {
                Ok(m) => {
                    if last != m.start() {
                        values.push(&text[last..m.start()]);
                    }
                    last = m.end();
                }
                Err(e) => {
                    error!("regex match failed, error: {}", e);
                }
            }
        }
        if last < text.len() {
            values.push(&text[last..]);
        }

        let mut converted_values: Vec<Object> = Vec::with_capacity(values.len());
        for v in values {
            if v.starts_with("${") && v.ends_with('}') {
                let param_path = &v[2..v.len() - 1];
                // if the paramPath is blank, meaning no value in between ${ and }
                // like ${}, ${  } etc, set the value to empty string
                if param_path.trim().is_empty() {
                    converted_values.push(InlineStr::new().into());
                    continue;
                }
                if let Some(sys_value) = EnvUtils::get_system_parameters_value(param_path, task_id)
                {
                    converted_values.push(sys_value.into());
                } else {
                    converted_values.push(Object::read(document_context, param_path))
                }
            } else if v.contains("$${") {
                converted_values.push(
                    InlineStr::from(DOUBLE_DOLLAR_REGEX.replace_all(v, "$${").as_ref()).into(),
                );
            } else {
                converted_values.push(v.into());
            }
        }

        // If the parameter String was "v1 v2 v3" then make sure to stitch it
        if converted_values.len() > 1 {
            let mut ret_obj = InlineStr::new();
            for val in converted_values {
                ret_obj.push_str(&val.to_string());
            }
            return ret_obj.into();
        }

        converted_values.pop().unwrap_or(Object::Null)
    }
}
