use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use super::domain::{
    normalize_email, AuthToken, Company, CompanyId, CompanySubmission, ImageUpload, UserAccount,
    UserId, UserRegistration,
};
use super::media::{image_storage_key, MediaError};
use super::password::{hash_password, hex_encode, verify_password};
use super::repository::{
    AuthError, CompanyRepository, RepositoryError, TokenAuthenticator, TokenStore, UserRepository,
};

/// Service composing user, company, and token storage behind the account API.
pub struct AccountService<U, C, T> {
    users: Arc<U>,
    companies: Arc<C>,
    tokens: Arc<T>,
}

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static COMPANY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TOKEN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("usr-{id:06}"))
}

fn next_company_id() -> CompanyId {
    let id = COMPANY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CompanyId(format!("co-{id:06}"))
}

fn next_token_key(email: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let sequence = TOKEN_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(nanos.to_le_bytes());
    hasher.update(sequence.to_le_bytes());
    hex_encode(&hasher.finalize())
}

impl<U, C, T> AccountService<U, C, T>
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    pub fn new(users: Arc<U>, companies: Arc<C>, tokens: Arc<T>) -> Self {
        Self {
            users,
            companies,
            tokens,
        }
    }

    /// Register a new inspector account with a salted password digest.
    pub fn register_user(
        &self,
        registration: UserRegistration,
    ) -> Result<UserAccount, AccountServiceError> {
        let email = normalize_email(&registration.email);
        if email.is_empty() || !email.contains('@') {
            return Err(AccountValidationError::InvalidEmail { email }.into());
        }
        if registration.password.is_empty() {
            return Err(AccountValidationError::EmptyPassword.into());
        }

        if self.users.fetch_by_email(&email)?.is_some() {
            return Err(RepositoryError::Conflict.into());
        }

        let account = UserAccount {
            user_id: next_user_id(),
            email,
            fname: registration.fname,
            lname: registration.lname,
            phone_number: registration.phone_number,
            license: registration.license,
            signature: None,
            is_active: true,
            is_staff: false,
            password_digest: hash_password(&registration.password),
        };

        let stored = self.users.insert(account)?;
        tracing::info!(user = %stored.user_id.0, "inspector account registered");
        Ok(stored)
    }

    /// Exchange owner credentials for an opaque auth token.
    pub fn issue_token(
        &self,
        owner_email: &str,
        password: &str,
    ) -> Result<AuthToken, AccountServiceError> {
        let email = normalize_email(owner_email);
        let account = self
            .users
            .fetch_by_email(&email)?
            .filter(|account| account.is_active)
            .filter(|account| verify_password(password, &account.password_digest))
            .ok_or(AccountServiceError::InvalidCredentials)?;

        let token = AuthToken {
            key: next_token_key(&account.email),
            user_id: account.user_id.clone(),
        };
        self.tokens.issue(token.clone())?;
        Ok(token)
    }

    /// Create the company profile for an owner; a second profile conflicts.
    pub fn create_company(
        &self,
        owner: &UserAccount,
        submission: CompanySubmission,
    ) -> Result<Company, AccountServiceError> {
        if self.companies.fetch_for_owner(&owner.user_id)?.is_some() {
            return Err(RepositoryError::Conflict.into());
        }

        let company = Company {
            company_id: next_company_id(),
            owner: submission.owner,
            owner_email: normalize_email(&submission.owner_email),
            company_name: submission.company_name,
            company_addr: submission.company_addr,
            phone_number: submission.phone_number,
            logo: None,
            user_id: owner.user_id.clone(),
        };

        let stored = self.companies.insert(company)?;
        Ok(stored)
    }

    /// Retrieve the authenticated owner's company.
    pub fn company_for(&self, owner: &UserAccount) -> Result<Company, AccountServiceError> {
        let company = self
            .companies
            .fetch_for_owner(&owner.user_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(company)
    }

    /// Replace the owner's company details, keeping id, logo, and ownership.
    pub fn update_company(
        &self,
        owner: &UserAccount,
        submission: CompanySubmission,
    ) -> Result<Company, AccountServiceError> {
        let mut company = self.company_for(owner)?;
        company.owner = submission.owner;
        company.owner_email = normalize_email(&submission.owner_email);
        company.company_name = submission.company_name;
        company.company_addr = submission.company_addr;
        company.phone_number = submission.phone_number;

        self.companies.update(company.clone())?;
        Ok(company)
    }

    /// Record a logo upload against the owner's company.
    pub fn attach_logo(
        &self,
        owner: &UserAccount,
        upload: ImageUpload,
    ) -> Result<Company, AccountServiceError> {
        let mut company = self.company_for(owner)?;
        company.logo = Some(image_storage_key(
            "logo",
            &upload.file_name,
            upload.content_length,
        )?);
        self.companies.update(company.clone())?;
        Ok(company)
    }

    /// Record a signature upload against the inspector account itself.
    pub fn attach_signature(
        &self,
        owner: &UserAccount,
        upload: ImageUpload,
    ) -> Result<UserAccount, AccountServiceError> {
        let mut account = self
            .users
            .fetch(&owner.user_id)?
            .ok_or(RepositoryError::NotFound)?;
        account.signature = Some(image_storage_key(
            "signature",
            &upload.file_name,
            upload.content_length,
        )?);
        self.users.update(account.clone())?;
        Ok(account)
    }
}

impl<U, C, T> TokenAuthenticator for AccountService<U, C, T>
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    T: TokenStore + 'static,
{
    fn resolve_token(&self, key: &str) -> Result<UserAccount, AuthError> {
        let user_id = self
            .tokens
            .resolve(key)
            .map_err(|err| AuthError::Unavailable(err.to_string()))?
            .ok_or(AuthError::UnknownToken)?;

        let account = self
            .users
            .fetch(&user_id)
            .map_err(|err| AuthError::Unavailable(err.to_string()))?
            .ok_or(AuthError::UnknownToken)?;

        if !account.is_active {
            return Err(AuthError::InactiveUser);
        }
        Ok(account)
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Validation(#[from] AccountValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("unable to authenticate with provided credentials")]
    InvalidCredentials,
}

/// Field-level validation failures for account payloads.
#[derive(Debug, thiserror::Error)]
pub enum AccountValidationError {
    #[error("'{email}' is not a valid email address")]
    InvalidEmail { email: String },
    #[error("password must not be empty")]
    EmptyPassword,
}
