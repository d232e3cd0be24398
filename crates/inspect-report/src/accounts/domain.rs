use serde::{Deserialize, Serialize};

/// Identifier for an inspector account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier for a company profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// Inspector account as stored by the user repository. The password digest
/// never leaves the service; API responses go through [`UserProfileView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: UserId,
    pub email: String,
    pub fname: String,
    pub lname: String,
    pub phone_number: u64,
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    #[serde(default, skip_serializing)]
    pub password_digest: String,
}

impl UserAccount {
    pub fn profile_view(&self) -> UserProfileView {
        UserProfileView {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            fname: self.fname.clone(),
            lname: self.lname.clone(),
            phone_number: self.phone_number,
            license: self.license.clone(),
            signature: self.signature.clone(),
        }
    }
}

/// Registration payload for a new inspector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistration {
    pub email: String,
    pub password: String,
    pub fname: String,
    pub lname: String,
    #[serde(default)]
    pub phone_number: u64,
    #[serde(default)]
    pub license: String,
}

/// Sanitized account representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileView {
    pub user_id: UserId,
    pub email: String,
    pub fname: String,
    pub lname: String,
    pub phone_number: u64,
    pub license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Company profile owned by a single inspector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub company_id: CompanyId,
    pub owner: String,
    pub owner_email: String,
    pub company_name: String,
    pub company_addr: String,
    pub phone_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub user_id: UserId,
}

impl Company {
    pub fn view(&self) -> CompanyView {
        CompanyView {
            owner: self.owner.clone(),
            owner_email: self.owner_email.clone(),
            company_name: self.company_name.clone(),
            company_addr: self.company_addr.clone(),
            phone_number: self.phone_number,
            logo: self.logo.clone(),
        }
    }
}

/// Create/update payload for a company profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySubmission {
    pub owner: String,
    pub owner_email: String,
    pub company_name: String,
    pub company_addr: String,
    #[serde(default)]
    pub phone_number: u64,
}

/// Company representation returned by the API (owning user is implicit).
#[derive(Debug, Clone, Serialize)]
pub struct CompanyView {
    pub owner: String,
    pub owner_email: String,
    pub company_name: String,
    pub company_addr: String,
    pub phone_number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Credentials exchanged for an auth token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub owner_email: String,
    pub password: String,
}

/// Opaque token bound to an inspector account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub key: String,
    pub user_id: UserId,
}

/// Metadata for an uploaded image: the client-declared file name and byte
/// length. The service records a storage key only, actual bytes live with
/// whichever blob store the deployment wires in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_length: u64,
}

/// Lowercase the domain part of an email address, mirroring how the original
/// system normalized addresses before uniqueness checks.
pub fn normalize_email(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_ascii_lowercase()),
        None => trimmed.to_string(),
    }
}
