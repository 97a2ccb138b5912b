use crate::cli::ServeArgs;
use crate::infra::{advisor_from_app_config, load_catalog, AppState};
use crate::routes::with_advisory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use realty_ai::advisory::AdvisoryState;
use realty_ai::config::AppConfig;
use realty_ai::error::AppError;
use realty_ai::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let advisor = Arc::new(advisor_from_app_config(&config)?);
    let catalog = Arc::new(load_catalog(None)?);
    info!(
        listings = catalog.len(),
        narrator = advisor.narrator_name(),
        "advisory service configured"
    );

    let app = with_advisory_routes(AdvisoryState::new(advisor, catalog))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "property advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
