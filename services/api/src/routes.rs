use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use inspect_report::accounts::{
    account_router, AccountService, CompanyRepository, TokenStore, UserRepository,
};
use inspect_report::reports::{report_router, InspectionReportService, ReportRepository};

/// Compose the account and report routers with the operational endpoints.
/// The account service doubles as the token authenticator for report routes.
pub(crate) fn service_router<U, C, T, R>(
    accounts: Arc<AccountService<U, C, T>>,
    reports: Arc<InspectionReportService<R>>,
) -> axum::Router
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
    R: ReportRepository + 'static,
{
    account_router(accounts.clone())
        .merge(report_router(reports, accounts))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
