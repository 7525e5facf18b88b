use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use herald_common::prelude::*;
use keyed_priority_queue::KeyedPriorityQueue;

use crate::events::queue::Message;

/// In-process storage for the internal event queues. Messages are popped in the order they were
/// pushed; pushing an id that is already queued replaces its payload and keeps its position.
#[derive(Default)]
pub struct QueueDao {
    queues: DashMap<InlineStr, Mutex<QueueState>>,
    sequence: AtomicU64,
}

struct QueueState {
    order: KeyedPriorityQueue<InlineStr, Reverse<u64>>,
    messages: HashMap<InlineStr, Message>,
}

impl Default for QueueState {
    fn default() -> Self {
        Self {
            order: KeyedPriorityQueue::new(),
            messages: HashMap::default(),
        }
    }
}

impl QueueDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_queue(&self, queue_name: &str) {
        self.queues
            .entry(queue_name.into())
            .or_insert_with(|| Mutex::new(QueueState::default()));
    }

    pub fn push(&self, queue_name: &str, messages: Vec<Message>) -> TegResult<()> {
        let queue = self
            .queues
            .get(queue_name)
            .ok_or_else(|| ErrorCode::NotFound(format!("queue {} not found", queue_name)))?;
        let mut state = queue.value().lock();
        for message in messages {
            if !state.messages.contains_key(&message.id) {
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                state.order.push(message.id.clone(), Reverse(seq));
            }
            state.messages.insert(message.id.clone(), message);
        }
        Ok(())
    }

    /// Removes and returns up to `count` messages, oldest first.
    pub fn pop(&self, queue_name: &str, count: usize) -> Vec<Message> {
        let Some(queue) = self.queues.get(queue_name) else {
            return Vec::default();
        };
        let mut state = queue.value().lock();
        let mut popped = Vec::with_capacity(count.min(state.messages.len()));
        while popped.len() < count {
            let Some((id, _)) = state.order.pop() else {
                break;
            };
            if let Some(message) = state.messages.remove(&id) {
                popped.push(message);
            }
        }
        popped
    }

    /// return true if the message was queued and is now removed
    pub fn remove(&self, queue_name: &str, message_id: &str) -> bool {
        match self.queues.get(queue_name) {
            Some(queue) => {
                let mut state = queue.value().lock();
                state.order.remove(&InlineStr::from(message_id));
                state.messages.remove(message_id).is_some()
            }
            None => false,
        }
    }

    pub fn size(&self, queue_name: &str) -> usize {
        self.queues
            .get(queue_name)
            .map(|x| x.value().lock().messages.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, payload: &str) -> Message {
        Message::new(id.into(), Some(payload.to_string()), id.into())
    }

    #[test]
    fn push_requires_queue() {
        let dao = QueueDao::new();
        assert!(dao.push("missing", vec![message("a", "1")]).is_err());
        dao.create_queue("q");
        assert!(dao.push("q", vec![message("a", "1")]).is_ok());
    }

    #[test]
    fn pop_in_push_order() {
        let dao = QueueDao::new();
        dao.create_queue("q");
        dao.push("q", vec![message("a", "1"), message("b", "2")])
            .expect("push");
        dao.push("q", vec![message("c", "3"), message("a", "4")])
            .expect("push");
        assert_eq!(dao.size("q"), 3);

        let popped = dao.pop("q", 2);
        let ids: Vec<&str> = popped.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(popped[0].payload.as_deref(), Some("4"));
        assert_eq!(dao.size("q"), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let dao = QueueDao::new();
        dao.create_queue("q");
        dao.push("q", vec![message("a", "1")]).expect("push");
        assert!(dao.remove("q", "a"));
        assert!(!dao.remove("q", "a"));
        assert!(!dao.remove("other", "a"));
        assert!(dao.pop("q", 1).is_empty());
    }
}
