use crate::accounts::UserId;

use super::domain::{InspectionReport, ReportId};

/// Storage abstraction for inspection reports. Deleting a report removes the
/// whole nested document; the sections have no life of their own.
pub trait ReportRepository: Send + Sync {
    fn insert(&self, report: InspectionReport) -> Result<InspectionReport, RepositoryError>;
    fn update(&self, report: InspectionReport) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<InspectionReport>, RepositoryError>;
    fn delete(&self, id: &ReportId) -> Result<(), RepositoryError>;
    fn list_for_owner(&self, owner: &UserId) -> Result<Vec<InspectionReport>, RepositoryError>;
}

/// Error enumeration for report-storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
