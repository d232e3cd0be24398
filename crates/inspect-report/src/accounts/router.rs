use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{CompanySubmission, ImageUpload, TokenRequest, UserAccount, UserRegistration};
use super::repository::{
    CompanyRepository, RepositoryError, TokenAuthenticator, TokenStore, UserRepository,
};
use super::service::{AccountService, AccountServiceError};

/// Router builder exposing registration, token, and company-management routes.
pub fn account_router<U, C, T>(service: Arc<AccountService<U, C, T>>) -> Router
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    Router::new()
        .route("/api/v1/users", post(register_handler::<U, C, T>))
        .route("/api/v1/company", post(create_company_handler::<U, C, T>))
        .route("/api/v1/company/token", post(token_handler::<U, C, T>))
        .route(
            "/api/v1/company/owner",
            get(company_detail_handler::<U, C, T>).put(update_company_handler::<U, C, T>),
        )
        .route(
            "/api/v1/company/owner/logo",
            post(upload_logo_handler::<U, C, T>),
        )
        .route(
            "/api/v1/users/me/signature",
            post(upload_signature_handler::<U, C, T>),
        )
        .with_state(service)
}

/// Pull the raw key out of a DRF-style `Authorization: Token <key>` header.
pub(crate) fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Token ").map(str::trim)
}

/// Resolve the request's token to an account or produce the 401 response.
pub(crate) fn authenticate<A>(auth: &A, headers: &HeaderMap) -> Result<UserAccount, Response>
where
    A: TokenAuthenticator + ?Sized,
{
    let Some(key) = token_from_headers(headers) else {
        return Err(unauthorized("authentication credentials were not provided"));
    };
    auth.resolve_token(key)
        .map_err(|err| unauthorized(&err.to_string()))
}

/// Hands [`AuthedUser`] the authenticator held inside a router's state.
pub trait AuthenticatorSource {
    fn authenticator(&self) -> &dyn TokenAuthenticator;
}

impl<U, C, T> AuthenticatorSource for Arc<AccountService<U, C, T>>
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    fn authenticator(&self) -> &dyn TokenAuthenticator {
        self.as_ref()
    }
}

/// The authenticated account, resolved from the `Authorization: Token <key>`
/// header. Runs as a parts extractor, so a missing or invalid token
/// short-circuits with 401 before any request body is read.
pub struct AuthedUser(pub UserAccount);

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: AuthenticatorSource + Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authenticate(state.authenticator(), &parts.headers).map(AuthedUser)
    }
}

fn unauthorized(detail: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "error": detail })),
    )
        .into_response()
}

fn account_error_response(error: AccountServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    let status = match &error {
        AccountServiceError::Validation(_) | AccountServiceError::Media(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AccountServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AccountServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AccountServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AccountServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
    };
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn register_handler<U, C, T>(
    State(service): State<Arc<AccountService<U, C, T>>>,
    axum::Json(registration): axum::Json<UserRegistration>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    match service.register_user(registration) {
        Ok(account) => {
            (StatusCode::CREATED, axum::Json(account.profile_view())).into_response()
        }
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn token_handler<U, C, T>(
    State(service): State<Arc<AccountService<U, C, T>>>,
    axum::Json(request): axum::Json<TokenRequest>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    match service.issue_token(&request.owner_email, &request.password) {
        Ok(token) => (StatusCode::OK, axum::Json(json!({ "token": token.key }))).into_response(),
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn create_company_handler<U, C, T>(
    State(service): State<Arc<AccountService<U, C, T>>>,
    AuthedUser(owner): AuthedUser,
    axum::Json(submission): axum::Json<CompanySubmission>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    match service.create_company(&owner, submission) {
        Ok(company) => (StatusCode::CREATED, axum::Json(company.view())).into_response(),
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn company_detail_handler<U, C, T>(
    State(service): State<Arc<AccountService<U, C, T>>>,
    AuthedUser(owner): AuthedUser,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    match service.company_for(&owner) {
        Ok(company) => (StatusCode::OK, axum::Json(company.view())).into_response(),
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn update_company_handler<U, C, T>(
    State(service): State<Arc<AccountService<U, C, T>>>,
    AuthedUser(owner): AuthedUser,
    axum::Json(submission): axum::Json<CompanySubmission>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    match service.update_company(&owner, submission) {
        Ok(company) => (StatusCode::OK, axum::Json(company.view())).into_response(),
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn upload_logo_handler<U, C, T>(
    State(service): State<Arc<AccountService<U, C, T>>>,
    AuthedUser(owner): AuthedUser,
    axum::Json(upload): axum::Json<ImageUpload>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    match service.attach_logo(&owner, upload) {
        Ok(company) => (StatusCode::OK, axum::Json(company.view())).into_response(),
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn upload_signature_handler<U, C, T>(
    State(service): State<Arc<AccountService<U, C, T>>>,
    AuthedUser(owner): AuthedUser,
    axum::Json(upload): axum::Json<ImageUpload>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    match service.attach_signature(&owner, upload) {
        Ok(account) => (StatusCode::OK, axum::Json(account.profile_view())).into_response(),
        Err(error) => account_error_response(error),
    }
}
