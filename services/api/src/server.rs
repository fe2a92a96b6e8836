use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryProfileRepository, LoggingNotificationPublisher};
use crate::routes::with_profile_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use care_connect::config::AppConfig;
use care_connect::error::AppError;
use care_connect::profiles::CaregiverProfileService;
use care_connect::telemetry;
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

    let repository = Arc::new(InMemoryProfileRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let profile_service = Arc::new(CaregiverProfileService::new(
        repository,
        notifications,
        config.profiles.search_limit,
    ));

    let app = with_profile_routes(profile_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        search_limit = config.profiles.search_limit,
        "care connect profile service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
