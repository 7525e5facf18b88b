use std::str::FromStr;

use dashmap::DashMap;
use herald_common::prelude::*;

use super::queue::{ConductorEventQueueProvider, ObservableQueue};
use super::{EventQueueProvider, Sink};

/// Registry of event queues, keyed by composite identifiers of the form `<kind>:<name>` where
/// `<kind>` is the string form of a `Sink`. Shared by every task evaluation, so all lookups go
/// through concurrent maps and a single queue instance is kept per identifier.
pub struct EventQueues {
    providers: DashMap<Sink, Arc<dyn EventQueueProvider>>,
    queues: DashMap<InlineStr, Arc<dyn ObservableQueue>>,
}

impl EventQueues {
    /// A registry without any transport.
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
            queues: DashMap::new(),
        }
    }

    /// A registry with the internal `Conductor` transport registered.
    pub fn with_conductor_queues() -> Self {
        let event_queues = Self::new();
        event_queues.register_provider(Arc::new(ConductorEventQueueProvider::default()));
        event_queues
    }

    pub fn register_provider(&self, provider: Arc<dyn EventQueueProvider>) {
        let sink = provider.get_queue_type();
        if self.providers.insert(sink, provider).is_some() {
            warn!("replaced event queue provider for {}", sink);
        } else {
            info!("registered event queue provider for {}", sink);
        }
    }

    /// Returns the queue for `queue_uri`, creating it through the provider of its kind when
    /// `auto_create` is set and it does not exist yet.
    pub fn get_queue(
        &self,
        queue_uri: &str,
        auto_create: bool,
    ) -> TegResult<Arc<dyn ObservableQueue>> {
        if let Some(queue) = self.queues.get(queue_uri) {
            return Ok(queue.value().clone());
        }

        let (sink, queue_name) = Self::parse(queue_uri)?;
        if !auto_create {
            return fmt_err!(NotFound, "queue {} does not exist", queue_uri);
        }
        let provider = self
            .providers
            .get(&sink)
            .map(|x| x.value().clone())
            .ok_or_else(|| {
                ErrorCode::NotFound(format!("no event queue provider registered for {}", sink))
            })?;

        // Providers may block or call back into the registry, so no map lock is held while
        // creating. Racing creators keep whichever queue got inserted first.
        debug!("creating event queue {}", queue_uri);
        let created = provider.get_queue(queue_name)?;
        let queue = self.queues.entry(queue_uri.into()).or_insert(created);
        Ok(queue.value().clone())
    }

    /// Identifiers of all queues created so far.
    pub fn queues(&self) -> Vec<InlineStr> {
        self.queues.iter().map(|x| x.key().clone()).collect()
    }

    fn parse(queue_uri: &str) -> TegResult<(Sink, &str)> {
        let (kind, queue_name) = queue_uri.split_once(':').ok_or_else(|| {
            ErrorCode::IllegalArgument(format!("illegal queue identifier {}", queue_uri))
        })?;
        let sink = Sink::from_str(kind).map_err(|_| {
            ErrorCode::IllegalArgument(format!("unsupported event queue type {}", kind))
        })?;
        Ok((sink, queue_name))
    }
}

impl Default for EventQueues {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_instance_for_repeated_lookups() {
        let event_queues = EventQueues::with_conductor_queues();
        let first = event_queues
            .get_queue("Conductor:wf:ref", true)
            .expect("created");
        let second = event_queues
            .get_queue("Conductor:wf:ref", false)
            .expect("cached");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.get_name(), "wf:ref");
        assert_eq!(event_queues.queues(), vec![InlineStr::from("Conductor:wf:ref")]);
    }

    /// Serves `External` queues by delegating to the registry's own `Conductor` queues.
    struct DelegatingProvider {
        registry: Mutex<Option<Arc<EventQueues>>>,
    }

    impl EventQueueProvider for DelegatingProvider {
        fn get_queue_type(&self) -> Sink {
            Sink::External
        }

        fn get_queue(&self, queue_name: &str) -> TegResult<Arc<dyn ObservableQueue>> {
            let registry = self.registry.lock().clone().expect("registry set");
            assert!(registry.queues().iter().all(|x| x.as_str() != "External:mirror"));
            registry.get_queue(&Sink::Internal.queue_uri(queue_name), true)
        }
    }

    #[test]
    fn provider_may_call_back_into_registry() {
        let event_queues = Arc::new(EventQueues::with_conductor_queues());
        let provider = Arc::new(DelegatingProvider {
            registry: Mutex::new(Some(event_queues.clone())),
        });
        event_queues.register_provider(provider.clone());

        let external = event_queues
            .get_queue("External:mirror", true)
            .expect("created");
        let internal = event_queues
            .get_queue("Conductor:mirror", false)
            .expect("created by the provider");
        assert!(Arc::ptr_eq(&external, &internal));
        let again = event_queues
            .get_queue("External:mirror", false)
            .expect("cached");
        assert!(Arc::ptr_eq(&external, &again));

        let mut queues = event_queues.queues();
        queues.sort();
        assert_eq!(
            queues,
            vec![
                InlineStr::from("Conductor:mirror"),
                InlineStr::from("External:mirror")
            ]
        );
        // break the registry <-> provider cycle
        provider.registry.lock().take();
    }

    #[test]
    fn no_creation_without_auto_create() {
        let event_queues = EventQueues::with_conductor_queues();
        let err = event_queues
            .get_queue("Conductor:orders", false)
            .err()
            .expect("not created");
        assert_eq!(err.code(), ErrorCode::not_found_code());
        assert!(event_queues.queues().is_empty());
    }

    #[test]
    fn unknown_kind_or_provider() {
        let event_queues = EventQueues::with_conductor_queues();
        let err = event_queues.get_queue("kafka:orders", true).err().expect("kind");
        assert_eq!(err.code(), ErrorCode::illegal_argument_code());
        let err = event_queues.get_queue("orders", true).err().expect("shape");
        assert_eq!(err.code(), ErrorCode::illegal_argument_code());
        let err = event_queues.get_queue("External:orders", true).err().expect("provider");
        assert_eq!(err.code(), ErrorCode::not_found_code());
        assert!(err.message().contains("External"));
    }
}
