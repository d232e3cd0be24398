use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::accounts::UserId;

use super::domain::{InspectionReport, ReportDocument, ReportId, ReportPatch, ReportValidationError};
use super::repository::{ReportRepository, RepositoryError};

/// Service wrapping the report repository with validation and ownership
/// checks. A report owned by someone else is indistinguishable from a missing
/// one: both surface as `NotFound`.
pub struct InspectionReportService<R> {
    repository: Arc<R>,
}

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_report_id() -> ReportId {
    let id = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReportId(format!("rpt-{id:06}"))
}

impl<R> InspectionReportService<R>
where
    R: ReportRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new report for the authenticated owner.
    pub fn create(
        &self,
        owner: &UserId,
        document: ReportDocument,
    ) -> Result<InspectionReport, ReportServiceError> {
        document.validate()?;

        let report = InspectionReport {
            report_id: next_report_id(),
            user_id: owner.clone(),
            document,
        };

        let stored = self.repository.insert(report)?;
        tracing::info!(report = %stored.report_id.0, owner = %owner.0, "inspection report created");
        Ok(stored)
    }

    /// List the owner's reports, newest first.
    pub fn list(&self, owner: &UserId) -> Result<Vec<InspectionReport>, ReportServiceError> {
        let mut reports = self.repository.list_for_owner(owner)?;
        reports.sort_by(|a, b| b.report_id.cmp(&a.report_id));
        Ok(reports)
    }

    /// Fetch a single report, enforcing ownership.
    pub fn get(
        &self,
        owner: &UserId,
        id: &ReportId,
    ) -> Result<InspectionReport, ReportServiceError> {
        let report = self
            .repository
            .fetch(id)?
            .filter(|report| &report.user_id == owner)
            .ok_or(RepositoryError::NotFound)?;
        Ok(report)
    }

    /// Replace the whole document, keeping id and ownership.
    pub fn replace(
        &self,
        owner: &UserId,
        id: &ReportId,
        document: ReportDocument,
    ) -> Result<InspectionReport, ReportServiceError> {
        document.validate()?;
        let existing = self.get(owner, id)?;

        let report = InspectionReport {
            report_id: existing.report_id,
            user_id: existing.user_id,
            document,
        };
        self.repository.update(report.clone())?;
        Ok(report)
    }

    /// Apply a section-level patch; the merged document must still validate
    /// and the stored record is untouched when it does not.
    pub fn patch(
        &self,
        owner: &UserId,
        id: &ReportId,
        patch: ReportPatch,
    ) -> Result<InspectionReport, ReportServiceError> {
        let mut report = self.get(owner, id)?;
        patch.apply(&mut report.document);
        report.document.validate()?;

        self.repository.update(report.clone())?;
        Ok(report)
    }

    /// Delete a report and every section with it.
    pub fn delete(&self, owner: &UserId, id: &ReportId) -> Result<(), ReportServiceError> {
        self.get(owner, id)?;
        self.repository.delete(id)?;
        tracing::info!(report = %id.0, owner = %owner.0, "inspection report deleted");
        Ok(())
    }
}

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Validation(#[from] ReportValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
