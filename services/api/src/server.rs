use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use hr_saas::config::AppConfig;
use hr_saas::error::AppError;
use hr_saas::schema::SchemaRegistry;
use hr_saas::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // Refuse to start with a registry the exporter would reject.
    let registry = SchemaRegistry::standard();
    registry.validate()?;
    info!(
        models = registry.models().len(),
        collections = ?registry.collection_names(),
        "schema registry validated"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = AppState::new(registry, config.database.clone(), prometheus_handle);
    let readiness_flag = state.readiness.clone();

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database_url_set = config.database.url_is_set(),
        database_name_set = config.database.name_is_set(),
        "hr backend ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
