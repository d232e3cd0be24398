use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use inspect_report::accounts::{
    AuthToken, Company, CompanyRepository, RepositoryError as AccountRepositoryError, TokenStore,
    UserAccount, UserId, UserRepository,
};
use inspect_report::reports::{
    InspectionReport, ReportId, ReportRepository, RepositoryError as ReportRepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    accounts: Arc<Mutex<HashMap<String, UserAccount>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, AccountRepositoryError> {
        let mut guard = self.accounts.lock().expect("user repository mutex poisoned");
        if guard.contains_key(&account.email) {
            return Err(AccountRepositoryError::Conflict);
        }
        guard.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    fn update(&self, account: UserAccount) -> Result<(), AccountRepositoryError> {
        let mut guard = self.accounts.lock().expect("user repository mutex poisoned");
        if guard.contains_key(&account.email) {
            guard.insert(account.email.clone(), account);
            Ok(())
        } else {
            Err(AccountRepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, AccountRepositoryError> {
        let guard = self.accounts.lock().expect("user repository mutex poisoned");
        Ok(guard.values().find(|account| &account.user_id == id).cloned())
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<UserAccount>, AccountRepositoryError> {
        let guard = self.accounts.lock().expect("user repository mutex poisoned");
        Ok(guard.get(email).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCompanyRepository {
    companies: Arc<Mutex<HashMap<UserId, Company>>>,
}

impl CompanyRepository for InMemoryCompanyRepository {
    fn insert(&self, company: Company) -> Result<Company, AccountRepositoryError> {
        let mut guard = self
            .companies
            .lock()
            .expect("company repository mutex poisoned");
        if guard.contains_key(&company.user_id) {
            return Err(AccountRepositoryError::Conflict);
        }
        guard.insert(company.user_id.clone(), company.clone());
        Ok(company)
    }

    fn update(&self, company: Company) -> Result<(), AccountRepositoryError> {
        let mut guard = self
            .companies
            .lock()
            .expect("company repository mutex poisoned");
        if guard.contains_key(&company.user_id) {
            guard.insert(company.user_id.clone(), company);
            Ok(())
        } else {
            Err(AccountRepositoryError::NotFound)
        }
    }

    fn fetch_for_owner(&self, owner: &UserId) -> Result<Option<Company>, AccountRepositoryError> {
        let guard = self
            .companies
            .lock()
            .expect("company repository mutex poisoned");
        Ok(guard.get(owner).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTokenStore {
    tokens: Arc<Mutex<HashMap<String, UserId>>>,
}

impl TokenStore for InMemoryTokenStore {
    fn issue(&self, token: AuthToken) -> Result<(), AccountRepositoryError> {
        let mut guard = self.tokens.lock().expect("token store mutex poisoned");
        guard.insert(token.key, token.user_id);
        Ok(())
    }

    fn resolve(&self, key: &str) -> Result<Option<UserId>, AccountRepositoryError> {
        let guard = self.tokens.lock().expect("token store mutex poisoned");
        Ok(guard.get(key).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReportRepository {
    reports: Arc<Mutex<HashMap<ReportId, InspectionReport>>>,
}

impl ReportRepository for InMemoryReportRepository {
    fn insert(&self, report: InspectionReport) -> Result<InspectionReport, ReportRepositoryError> {
        let mut guard = self
            .reports
            .lock()
            .expect("report repository mutex poisoned");
        if guard.contains_key(&report.report_id) {
            return Err(ReportRepositoryError::Conflict);
        }
        guard.insert(report.report_id.clone(), report.clone());
        Ok(report)
    }

    fn update(&self, report: InspectionReport) -> Result<(), ReportRepositoryError> {
        let mut guard = self
            .reports
            .lock()
            .expect("report repository mutex poisoned");
        if guard.contains_key(&report.report_id) {
            guard.insert(report.report_id.clone(), report);
            Ok(())
        } else {
            Err(ReportRepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<InspectionReport>, ReportRepositoryError> {
        let guard = self
            .reports
            .lock()
            .expect("report repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &ReportId) -> Result<(), ReportRepositoryError> {
        let mut guard = self
            .reports
            .lock()
            .expect("report repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(ReportRepositoryError::NotFound)
    }

    fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<InspectionReport>, ReportRepositoryError> {
        let guard = self
            .reports
            .lock()
            .expect("report repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|report| &report.user_id == owner)
            .cloned()
            .collect())
    }
}
