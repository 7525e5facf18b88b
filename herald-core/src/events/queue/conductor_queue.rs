use herald_common::prelude::*;

use super::{Message, ObservableQueue};
use crate::dao::QueueDao;
use crate::events::{EventQueueProvider, Sink};

/// Event queue hosted by the engine itself, backed by `QueueDao`.
pub struct ConductorObservableQueue {
    queue_name: InlineStr,
    queue_dao: Arc<QueueDao>,
}

impl ConductorObservableQueue {
    pub fn new(queue_name: &str, queue_dao: Arc<QueueDao>) -> Self {
        queue_dao.create_queue(queue_name);
        Self {
            queue_name: queue_name.into(),
            queue_dao,
        }
    }

    /// Takes up to `count` messages off the queue for consumers of the event.
    pub fn poll(&self, count: usize) -> Vec<Message> {
        let messages = self.queue_dao.pop(&self.queue_name, count);
        trace!(
            "polled {} messages from {}",
            messages.len(),
            self.get_uri()
        );
        messages
    }
}

impl ObservableQueue for ConductorObservableQueue {
    fn get_type(&self) -> Sink {
        Sink::Internal
    }

    fn get_name(&self) -> &str {
        &self.queue_name
    }

    fn publish(&self, messages: Vec<Message>) -> TegResult<()> {
        debug!(
            "publishing {} messages to {}",
            messages.len(),
            self.get_uri()
        );
        self.queue_dao.push(&self.queue_name, messages)
    }

    fn ack(&self, messages: Vec<Message>) -> TegResult<Vec<InlineStr>> {
        Ok(messages
            .into_iter()
            .filter(|x| self.queue_dao.remove(&self.queue_name, &x.receipt_key))
            .map(|x| x.id)
            .collect())
    }

    fn size(&self) -> usize {
        self.queue_dao.size(&self.queue_name)
    }
}

/// Provides `Conductor:*` queues, all sharing one `QueueDao`.
#[derive(Default)]
pub struct ConductorEventQueueProvider {
    queue_dao: Arc<QueueDao>,
}

impl ConductorEventQueueProvider {
    pub fn new(queue_dao: Arc<QueueDao>) -> Self {
        Self { queue_dao }
    }
}

impl EventQueueProvider for ConductorEventQueueProvider {
    fn get_queue_type(&self) -> Sink {
        Sink::Internal
    }

    fn get_queue(&self, queue_name: &str) -> TegResult<Arc<dyn ObservableQueue>> {
        if queue_name.trim().is_empty() {
            return str_err!(IllegalArgument, "queue name must not be blank");
        }
        Ok(Arc::new(ConductorObservableQueue::new(
            queue_name,
            self.queue_dao.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_poll_and_ack() {
        let queue = ConductorObservableQueue::new("wf:event_ref", Arc::new(QueueDao::new()));
        assert_eq!(queue.get_uri(), "Conductor:wf:event_ref");

        let message = Message::new("t-1".into(), Some("{}".into()), "t-1".into());
        queue.publish(vec![message.clone()]).expect("publish");
        assert_eq!(queue.size(), 1);

        let acked = queue.ack(vec![Message::new("t-1".into(), None, "t-1".into())]);
        assert_eq!(acked.expect("ack"), vec![InlineStr::from("t-1")]);
        assert_eq!(queue.size(), 0);

        queue.publish(vec![message.clone()]).expect("publish");
        assert_eq!(queue.poll(10), vec![message]);
        assert!(queue.ack(vec![Message::new("t-1".into(), None, "t-1".into())]).expect("ack").is_empty());
    }

    #[test]
    fn provider_rejects_blank_names() {
        let provider = ConductorEventQueueProvider::default();
        assert!(provider.get_queue(" ").is_err());
        assert_eq!(
            provider.get_queue("orders").expect("queue").get_type(),
            Sink::Internal
        );
    }
}
