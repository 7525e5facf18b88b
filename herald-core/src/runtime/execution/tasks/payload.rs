//! Message payload of the EVENT task.

use herald_common::prelude::*;

use crate::model::{TaskModel, WorkflowModel};

/// Task input plus the identity of the workflow that produced the event.
pub fn build(workflow: &WorkflowModel, task: &TaskModel) -> HashMap<InlineStr, Object> {
    let mut payload = task.input_data.clone();
    payload.insert(
        "workflowInstanceId".into(),
        workflow.workflow_id.clone().into(),
    );
    payload.insert("workflowType".into(), workflow.workflow_name.clone().into());
    payload.insert("workflowVersion".into(), workflow.workflow_version.into());
    payload.insert(
        "correlationId".into(),
        if workflow.correlation_id.is_empty() {
            Object::Null
        } else {
            workflow.correlation_id.clone().into()
        },
    );
    payload
}

/// Serializes the payload with object keys in lexicographic order at every level, so equal
/// payloads always produce the same text.
pub fn to_json(payload: &HashMap<InlineStr, Object>) -> TegResult<String> {
    Ok(serde_json::to_string(&canonical_map(payload))?)
}

fn canonical_map(map: &HashMap<InlineStr, Object>) -> serde_json::Value {
    let sorted: BTreeMap<&str, &Object> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let mut json = serde_json::Map::with_capacity(sorted.len());
    for (k, v) in sorted {
        json.insert(k.to_string(), canonical(v));
    }
    serde_json::Value::Object(json)
}

fn canonical(value: &Object) -> serde_json::Value {
    match value {
        Object::Map(map) => canonical_map(map),
        Object::List(list) => serde_json::Value::Array(list.iter().map(canonical).collect()),
        other => other.to_json(),
    }
}
