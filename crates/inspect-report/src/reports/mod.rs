//! Inspection-report documents: fixed-schema sections aggregated behind one
//! parent record per inspection, managed through an authenticated CRUD API.

pub mod domain;
pub mod repository;
pub mod router;
pub mod sections;
pub mod service;

pub use domain::{
    InspectionReport, ReportDocument, ReportId, ReportPatch, ReportValidationError,
};
pub use repository::{ReportRepository, RepositoryError};
pub use router::report_router;
pub use service::{InspectionReportService, ReportServiceError};
