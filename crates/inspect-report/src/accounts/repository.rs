use super::domain::{AuthToken, Company, UserAccount, UserId};

/// Storage abstraction for inspector accounts.
pub trait UserRepository: Send + Sync {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;
    fn update(&self, account: UserAccount) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;
    fn fetch_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError>;
}

/// Storage abstraction for company profiles; one profile per owner.
pub trait CompanyRepository: Send + Sync {
    fn insert(&self, company: Company) -> Result<Company, RepositoryError>;
    fn update(&self, company: Company) -> Result<(), RepositoryError>;
    fn fetch_for_owner(&self, owner: &UserId) -> Result<Option<Company>, RepositoryError>;
}

/// Storage abstraction for issued auth tokens.
pub trait TokenStore: Send + Sync {
    fn issue(&self, token: AuthToken) -> Result<(), RepositoryError>;
    fn resolve(&self, key: &str) -> Result<Option<UserId>, RepositoryError>;
}

/// Error enumeration for account-storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a raw `Authorization: Token <key>` credential to an account.
/// Implemented by [`super::service::AccountService`] and consumed by every
/// router that guards its handlers.
pub trait TokenAuthenticator: Send + Sync {
    fn resolve_token(&self, key: &str) -> Result<UserAccount, AuthError>;
}

/// Authentication failures surfaced as 401 responses.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid token")]
    UnknownToken,
    #[error("user account is inactive")]
    InactiveUser,
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}
