use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use crate::accounts::router::{AuthedUser, AuthenticatorSource};
use crate::accounts::TokenAuthenticator;

use super::domain::{ReportDocument, ReportId, ReportPatch};
use super::repository::{ReportRepository, RepositoryError};
use super::service::{InspectionReportService, ReportServiceError};

/// Shared state for the report routes: the CRUD service plus whatever
/// authenticates tokens (the account service in production).
pub struct ReportRouterState<R, A> {
    pub service: Arc<InspectionReportService<R>>,
    pub auth: Arc<A>,
}

impl<R, A> Clone for ReportRouterState<R, A> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<R, A> AuthenticatorSource for ReportRouterState<R, A>
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    fn authenticator(&self) -> &dyn TokenAuthenticator {
        self.auth.as_ref()
    }
}

/// Router builder exposing the report CRUD endpoints.
pub fn report_router<R, A>(
    service: Arc<InspectionReportService<R>>,
    auth: Arc<A>,
) -> Router
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    let state = ReportRouterState { service, auth };
    Router::new()
        .route(
            "/api/v1/reports",
            get(list_handler::<R, A>).post(create_handler::<R, A>),
        )
        .route(
            "/api/v1/reports/:report_id",
            get(detail_handler::<R, A>)
                .put(replace_handler::<R, A>)
                .patch(patch_handler::<R, A>)
                .delete(delete_handler::<R, A>),
        )
        .with_state(state)
}

fn report_error_response(error: ReportServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    let status = match &error {
        ReportServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReportServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ReportServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ReportServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler<R, A>(
    State(state): State<ReportRouterState<R, A>>,
    AuthedUser(owner): AuthedUser,
    axum::Json(document): axum::Json<ReportDocument>,
) -> Response
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    match state.service.create(&owner.user_id, document) {
        Ok(report) => (StatusCode::CREATED, axum::Json(report)).into_response(),
        Err(error) => report_error_response(error),
    }
}

pub(crate) async fn list_handler<R, A>(
    State(state): State<ReportRouterState<R, A>>,
    AuthedUser(owner): AuthedUser,
) -> Response
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    match state.service.list(&owner.user_id) {
        Ok(reports) => (StatusCode::OK, axum::Json(reports)).into_response(),
        Err(error) => report_error_response(error),
    }
}

pub(crate) async fn detail_handler<R, A>(
    State(state): State<ReportRouterState<R, A>>,
    AuthedUser(owner): AuthedUser,
    Path(report_id): Path<String>,
) -> Response
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    match state.service.get(&owner.user_id, &ReportId(report_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => report_error_response(error),
    }
}

pub(crate) async fn replace_handler<R, A>(
    State(state): State<ReportRouterState<R, A>>,
    AuthedUser(owner): AuthedUser,
    Path(report_id): Path<String>,
    axum::Json(document): axum::Json<ReportDocument>,
) -> Response
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    match state
        .service
        .replace(&owner.user_id, &ReportId(report_id), document)
    {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => report_error_response(error),
    }
}

pub(crate) async fn patch_handler<R, A>(
    State(state): State<ReportRouterState<R, A>>,
    AuthedUser(owner): AuthedUser,
    Path(report_id): Path<String>,
    axum::Json(patch): axum::Json<ReportPatch>,
) -> Response
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    match state
        .service
        .patch(&owner.user_id, &ReportId(report_id), patch)
    {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => report_error_response(error),
    }
}

pub(crate) async fn delete_handler<R, A>(
    State(state): State<ReportRouterState<R, A>>,
    AuthedUser(owner): AuthedUser,
    Path(report_id): Path<String>,
) -> Response
where
    R: ReportRepository + 'static,
    A: TokenAuthenticator + 'static,
{
    match state.service.delete(&owner.user_id, &ReportId(report_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => report_error_response(error),
    }
}
