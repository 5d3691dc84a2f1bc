use hr_saas::config::DatabaseSettings;
use hr_saas::diagnostics::DatabaseProbe;
use hr_saas::schema::SchemaRegistry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Shared, read-only context handed to every handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) registry: Arc<SchemaRegistry>,
    pub(crate) database: Arc<DatabaseSettings>,
    pub(crate) probe: Option<Arc<dyn DatabaseProbe>>,
}

impl AppState {
    pub(crate) fn new(
        registry: SchemaRegistry,
        database: DatabaseSettings,
        metrics: PrometheusHandle,
    ) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            registry: Arc::new(registry),
            database: Arc::new(database),
            probe: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_probe(mut self, probe: Arc<dyn DatabaseProbe>) -> Self {
        self.probe = Some(probe);
        self
    }
}
