//! Collaborators shared by a bank and everything it creates

use crate::config::BankConfig;
use crate::core::latency::{Latency, SleepLatency};
use crate::core::persistence::{NoopSink, PersistenceSink};
use crate::core::registry::Registry;
use std::sync::Arc;

/// Identity registry, latency source and persistence sink for a bank
///
/// Cheap to clone; every account and card keeps a copy of the handles it needs.
#[derive(Debug, Clone)]
pub struct BankServices {
    registry: Arc<Registry>,
    latency: Arc<dyn Latency>,
    sink: Arc<dyn PersistenceSink>,
}

impl BankServices {
    pub fn new(
        registry: Arc<Registry>,
        latency: Arc<dyn Latency>,
        sink: Arc<dyn PersistenceSink>,
    ) -> Self {
        Self {
            registry,
            latency,
            sink,
        }
    }

    /// Fresh registry, sleeping latency from the config, no persistence
    pub fn from_config(config: &BankConfig) -> Self {
        Self::new(
            Arc::new(Registry::new()),
            Arc::new(SleepLatency(config.processing_delay)),
            Arc::new(NoopSink),
        )
    }

    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_latency(mut self, latency: Arc<dyn Latency>) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn PersistenceSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn latency(&self) -> &Arc<dyn Latency> {
        &self.latency
    }

    pub fn sink(&self) -> &Arc<dyn PersistenceSink> {
        &self.sink
    }
}

impl Default for BankServices {
    fn default() -> Self {
        Self::from_config(&BankConfig::default())
    }
}
