use herald_common::prelude::*;
use serde::Serialize;

/// A unit sent to or acknowledged on an event queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: InlineStr,
    pub payload: Option<String>,
    /// Key handed back to the queue when acknowledging.
    pub receipt_key: InlineStr,
}

impl Message {
    pub fn new(id: InlineStr, payload: Option<String>, receipt_key: InlineStr) -> Self {
        Self {
            id,
            payload,
            receipt_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Message;

    #[test]
    fn wire_shape() {
        let message = Message::new("t-1".into(), None, "t-1".into());
        assert_eq!(
            serde_json::to_value(&message).expect("serialize"),
            json!({"id": "t-1", "payload": null, "receiptKey": "t-1"})
        );
    }
}
