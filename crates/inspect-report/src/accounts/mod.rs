//! Inspector accounts, company profiles, and token authentication.

pub mod domain;
pub mod media;
pub(crate) mod password;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    AuthToken, Company, CompanyId, CompanySubmission, CompanyView, ImageUpload, TokenRequest,
    UserAccount, UserId, UserProfileView, UserRegistration,
};
pub use media::MediaError;
pub use repository::{
    AuthError, CompanyRepository, RepositoryError, TokenAuthenticator, TokenStore, UserRepository,
};
pub use router::{account_router, AuthedUser, AuthenticatorSource};
pub use service::{AccountService, AccountServiceError, AccountValidationError};
