use std::time::Duration;

use herald_common::prelude::*;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Properties {
    /// How long an EVENT task stays SCHEDULED before its message is published.
    /// MILLISECONDS
    pub event_readiness_delay_ms: u64,
    /// Whether the EVENT task may create the destination queue when it does not exist yet.
    pub event_queue_auto_create: bool,
}

impl Properties {
    pub const DEFAULT_EVENT_READINESS_DELAY_MS: u64 = 600_000;

    /// Parses properties from a TOML document, missing keys keep their defaults.
    pub fn from_toml(content: &str) -> TegResult<Self> {
        let properties: Properties = toml::from_str(content)?;
        debug!("loaded properties: {:?}", properties);
        Ok(properties)
    }

    pub fn get_event_readiness_delay(&self) -> Duration {
        Duration::from_millis(self.event_readiness_delay_ms)
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            event_readiness_delay_ms: Self::DEFAULT_EVENT_READINESS_DELAY_MS,
            event_queue_auto_create: true,
        }
    }
}
