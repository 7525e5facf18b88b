use strum_macros::{AsRefStr, Display, EnumString};

/// Transport backing an event destination. The string form is the `<kind>` prefix of composite
/// queue identifiers such as `Conductor:orders` or `External:orders`.
#[derive(Clone, Copy, Debug, Display, EnumString, AsRefStr, PartialEq, Eq, Hash)]
pub enum Sink {
    /// Queues hosted by the workflow engine itself.
    #[strum(serialize = "Conductor")]
    Internal,
    /// Queues of an external broker, e.g. SQS.
    #[strum(serialize = "External")]
    External,
}

impl Sink {
    /// Composite identifier understood by `EventQueues`.
    pub fn queue_uri(&self, queue_name: &str) -> String {
        format!("{}:{}", self.as_ref(), queue_name)
    }
}
