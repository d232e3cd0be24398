use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryCompanyRepository, InMemoryReportRepository, InMemoryTokenStore,
    InMemoryUserRepository,
};
use crate::routes::service_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use inspect_report::accounts::AccountService;
use inspect_report::config::AppConfig;
use inspect_report::error::AppError;
use inspect_report::reports::InspectionReportService;
use inspect_report::telemetry;
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

    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryCompanyRepository::default()),
        Arc::new(InMemoryTokenStore::default()),
    ));
    let reports = Arc::new(InspectionReportService::new(Arc::new(
        InMemoryReportRepository::default(),
    )));

    let app = service_router(accounts, reports)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "inspection report service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
