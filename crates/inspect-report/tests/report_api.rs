//! End-to-end coverage for the report CRUD routes: registration and token
//! issuance through the account router, then authenticated document
//! management through the report router, all over `tower::oneshot`.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use inspect_report::accounts::{
        account_router, AccountService, AuthToken, Company, CompanyRepository,
        RepositoryError as AccountRepositoryError, TokenStore, UserAccount, UserId, UserRepository,
    };
    use inspect_report::reports::{
        report_router, InspectionReport, InspectionReportService, ReportId, ReportRepository,
        RepositoryError as ReportRepositoryError,
    };

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[derive(Default, Clone)]
    pub(super) struct MemoryUsers {
        accounts: Arc<Mutex<HashMap<String, UserAccount>>>,
    }

    impl UserRepository for MemoryUsers {
        fn insert(&self, account: UserAccount) -> Result<UserAccount, AccountRepositoryError> {
            let mut guard = self.accounts.lock().expect("lock");
            if guard.contains_key(&account.email) {
                return Err(AccountRepositoryError::Conflict);
            }
            guard.insert(account.email.clone(), account.clone());
            Ok(account)
        }

        fn update(&self, account: UserAccount) -> Result<(), AccountRepositoryError> {
            let mut guard = self.accounts.lock().expect("lock");
            guard.insert(account.email.clone(), account);
            Ok(())
        }

        fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, AccountRepositoryError> {
            let guard = self.accounts.lock().expect("lock");
            Ok(guard.values().find(|account| &account.user_id == id).cloned())
        }

        fn fetch_by_email(
            &self,
            email: &str,
        ) -> Result<Option<UserAccount>, AccountRepositoryError> {
            let guard = self.accounts.lock().expect("lock");
            Ok(guard.get(email).cloned())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryCompanies {
        companies: Arc<Mutex<HashMap<UserId, Company>>>,
    }

    impl CompanyRepository for MemoryCompanies {
        fn insert(&self, company: Company) -> Result<Company, AccountRepositoryError> {
            let mut guard = self.companies.lock().expect("lock");
            if guard.contains_key(&company.user_id) {
                return Err(AccountRepositoryError::Conflict);
            }
            guard.insert(company.user_id.clone(), company.clone());
            Ok(company)
        }

        fn update(&self, company: Company) -> Result<(), AccountRepositoryError> {
            let mut guard = self.companies.lock().expect("lock");
            guard.insert(company.user_id.clone(), company);
            Ok(())
        }

        fn fetch_for_owner(
            &self,
            owner: &UserId,
        ) -> Result<Option<Company>, AccountRepositoryError> {
            let guard = self.companies.lock().expect("lock");
            Ok(guard.get(owner).cloned())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryTokens {
        tokens: Arc<Mutex<HashMap<String, UserId>>>,
    }

    impl TokenStore for MemoryTokens {
        fn issue(&self, token: AuthToken) -> Result<(), AccountRepositoryError> {
            self.tokens
                .lock()
                .expect("lock")
                .insert(token.key, token.user_id);
            Ok(())
        }

        fn resolve(&self, key: &str) -> Result<Option<UserId>, AccountRepositoryError> {
            Ok(self.tokens.lock().expect("lock").get(key).cloned())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryReports {
        reports: Arc<Mutex<HashMap<ReportId, InspectionReport>>>,
    }

    impl ReportRepository for MemoryReports {
        fn insert(
            &self,
            report: InspectionReport,
        ) -> Result<InspectionReport, ReportRepositoryError> {
            let mut guard = self.reports.lock().expect("lock");
            if guard.contains_key(&report.report_id) {
                return Err(ReportRepositoryError::Conflict);
            }
            guard.insert(report.report_id.clone(), report.clone());
            Ok(report)
        }

        fn update(&self, report: InspectionReport) -> Result<(), ReportRepositoryError> {
            let mut guard = self.reports.lock().expect("lock");
            guard.insert(report.report_id.clone(), report);
            Ok(())
        }

        fn fetch(&self, id: &ReportId) -> Result<Option<InspectionReport>, ReportRepositoryError> {
            let guard = self.reports.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn delete(&self, id: &ReportId) -> Result<(), ReportRepositoryError> {
            self.reports
                .lock()
                .expect("lock")
                .remove(id)
                .map(|_| ())
                .ok_or(ReportRepositoryError::NotFound)
        }

        fn list_for_owner(
            &self,
            owner: &UserId,
        ) -> Result<Vec<InspectionReport>, ReportRepositoryError> {
            let guard = self.reports.lock().expect("lock");
            Ok(guard
                .values()
                .filter(|report| &report.user_id == owner)
                .cloned()
                .collect())
        }
    }

    pub(super) fn build_router() -> axum::Router {
        let accounts = Arc::new(AccountService::new(
            Arc::new(MemoryUsers::default()),
            Arc::new(MemoryCompanies::default()),
            Arc::new(MemoryTokens::default()),
        ));
        let reports = Arc::new(InspectionReportService::new(Arc::new(
            MemoryReports::default(),
        )));
        account_router(accounts.clone()).merge(report_router(reports, accounts))
    }

    /// A valid two-bedroom document with no garage or basement.
    pub(super) fn sample_document() -> Value {
        json!({
            "report_details": {
                "title": "414 Maple St ranch",
                "r_id": "R-0414",
                "date": "2023-09-18",
                "customer_fname": "Sam",
                "customer_lname": "Hart",
                "bedroom_count": 2,
                "bathroom_count": 1,
                "garage_type": "none",
                "basement_type": false
            },
            "overview": { "scope": "Full residential inspection" },
            "summary": { "general_maintenance": "Touch up exterior caulk" },
            "receipt_invoice": {
                "company": "Hawkeye Home Inspections",
                "date": "2023-09-18",
                "inspector_fname": "Ada",
                "inspector_lname": "Doe",
                "client_fname": "Sam",
                "client_lname": "Hart",
                "payment_type": "check",
                "total_fee": "375.00"
            },
            "grounds": {},
            "roof": { "condition": "Serviceable" },
            "exterior": {},
            "kitchen": {},
            "laundry": {},
            "bathroom": {},
            "bedrooms": [ { "bedroom": "East bedroom" }, { "bedroom": "West bedroom" } ],
            "interior": {},
            "plumbing": {},
            "waterheater": {},
            "heatingsystem": {},
            "furnace": [ {} ],
            "boiler": {},
            "electricalcoolingsystems": {},
            "main_panel": [ {} ],
            "sub_panel": [ {} ],
            "evap_coil": [ {} ],
            "living_room": [ {} ],
            "dining_room": [ {} ]
        })
    }

    pub(super) async fn send_json(
        router: &axum::Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Token {token}"));
        }
        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(value).expect("serialize")))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, payload)
    }

    pub(super) async fn register_and_token(router: &axum::Router, email: &str) -> String {
        let registration = json!({
            "email": email,
            "password": "testpass123",
            "fname": "Ada",
            "lname": "Doe",
            "phone_number": 5155550100u64,
            "license": "IA-1204"
        });
        let (status, _) = send_json(router, "POST", "/api/v1/users", None, Some(&registration)).await;
        assert_eq!(status, StatusCode::CREATED);

        let credentials = json!({ "owner_email": email, "password": "testpass123" });
        let (status, payload) = send_json(
            router,
            "POST",
            "/api/v1/company/token",
            None,
            Some(&credentials),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        payload
            .get("token")
            .and_then(Value::as_str)
            .expect("token in response")
            .to_string()
    }
}

mod listing {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::Value;

    #[tokio::test]
    async fn auth_is_required() {
        let router = build_router();
        let (status, payload) = send_json(&router, "GET", "/api/v1/reports", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(payload.get("error").is_some());
    }

    #[tokio::test]
    async fn created_reports_appear_newest_first() {
        let router = build_router();
        let token = register_and_token(&router, "lister@example.com").await;

        let mut first = sample_document();
        first["report_details"]["r_id"] = Value::String("R-0001".to_string());
        let (status, _) =
            send_json(&router, "POST", "/api/v1/reports", Some(&token), Some(&first)).await;
        assert_eq!(status, StatusCode::CREATED);

        let mut second = sample_document();
        second["report_details"]["r_id"] = Value::String("R-0002".to_string());
        let (status, newest) =
            send_json(&router, "POST", "/api/v1/reports", Some(&token), Some(&second)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, listing) =
            send_json(&router, "GET", "/api/v1/reports", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let reports = listing.as_array().expect("listing array");
        assert_eq!(reports.len(), 2);
        assert_eq!(
            reports[0].get("report_id"),
            newest.get("report_id"),
            "latest report leads the listing"
        );
    }

    #[tokio::test]
    async fn listing_is_limited_to_owner() {
        let router = build_router();
        let mine = register_and_token(&router, "mine@example.com").await;
        let other = register_and_token(&router, "other@example.com").await;

        let document = sample_document();
        let (status, _) =
            send_json(&router, "POST", "/api/v1/reports", Some(&mine), Some(&document)).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send_json(
            &router,
            "POST",
            "/api/v1/reports",
            Some(&other),
            Some(&document),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, listing) = send_json(&router, "GET", "/api/v1/reports", Some(&mine), None).await;
        assert_eq!(listing.as_array().expect("array").len(), 1);
    }
}

mod crud {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn missing_token_rejected_before_body_parsing() {
        let router = build_router();
        // no Authorization header and no body at all: the token check must
        // answer 401 rather than a body-deserialization rejection
        let (status, payload) = send_json(&router, "POST", "/api/v1/reports", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(payload.get("error").is_some());
    }

    #[tokio::test]
    async fn create_returns_full_document() {
        let router = build_router();
        let token = register_and_token(&router, "create@example.com").await;

        let (status, payload) = send_json(
            &router,
            "POST",
            "/api/v1/reports",
            Some(&token),
            Some(&sample_document()),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(payload.get("report_id").is_some());
        assert_eq!(
            payload
                .pointer("/report_details/title")
                .and_then(Value::as_str),
            Some("414 Maple St ranch")
        );
        assert_eq!(
            payload.get("furnace").and_then(Value::as_array).map(Vec::len),
            Some(1)
        );
    }

    #[tokio::test]
    async fn invalid_document_is_rejected() {
        let router = build_router();
        let token = register_and_token(&router, "invalid@example.com").await;

        let mut document = sample_document();
        document["report_details"]["garage_type"] = Value::String("Detached".to_string());

        let (status, payload) = send_json(
            &router,
            "POST",
            "/api/v1/reports",
            Some(&token),
            Some(&document),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("garage"));
    }

    #[tokio::test]
    async fn retrieve_replace_delete_cycle() {
        let router = build_router();
        let token = register_and_token(&router, "cycle@example.com").await;

        let (_, created) = send_json(
            &router,
            "POST",
            "/api/v1/reports",
            Some(&token),
            Some(&sample_document()),
        )
        .await;
        let report_id = created
            .get("report_id")
            .and_then(Value::as_str)
            .expect("report id")
            .to_string();
        let uri = format!("/api/v1/reports/{report_id}");

        let (status, fetched) = send_json(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched.get("report_id"), created.get("report_id"));

        let mut replacement = sample_document();
        replacement["summary"]["major_concerns"] =
            Value::String("Foundation settlement at SW corner".to_string());
        let (status, replaced) =
            send_json(&router, "PUT", &uri, Some(&token), Some(&replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            replaced
                .pointer("/summary/major_concerns")
                .and_then(Value::as_str),
            Some("Foundation settlement at SW corner")
        );

        let (status, _) = send_json(&router, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send_json(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_updates_single_section() {
        let router = build_router();
        let token = register_and_token(&router, "patch@example.com").await;

        let (_, created) = send_json(
            &router,
            "POST",
            "/api/v1/reports",
            Some(&token),
            Some(&sample_document()),
        )
        .await;
        let uri = format!(
            "/api/v1/reports/{}",
            created.get("report_id").and_then(Value::as_str).expect("id")
        );

        let patch = json!({ "roof": { "condition": "Hail damage on south slope" } });
        let (status, patched) = send_json(&router, "PATCH", &uri, Some(&token), Some(&patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            patched.pointer("/roof/condition").and_then(Value::as_str),
            Some("Hail damage on south slope")
        );
        // untouched sections survive the patch
        assert_eq!(
            patched
                .pointer("/report_details/title")
                .and_then(Value::as_str),
            Some("414 Maple St ranch")
        );
    }

    #[tokio::test]
    async fn invalid_patch_leaves_report_unchanged() {
        let router = build_router();
        let token = register_and_token(&router, "badpatch@example.com").await;

        let (_, created) = send_json(
            &router,
            "POST",
            "/api/v1/reports",
            Some(&token),
            Some(&sample_document()),
        )
        .await;
        let uri = format!(
            "/api/v1/reports/{}",
            created.get("report_id").and_then(Value::as_str).expect("id")
        );

        // drops to one bedroom section while the header still declares two
        let patch = json!({ "bedrooms": [ { "bedroom": "only one left" } ] });
        let (status, _) = send_json(&router, "PATCH", &uri, Some(&token), Some(&patch)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, fetched) = send_json(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(
            fetched
                .get("bedrooms")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(2)
        );
    }

    #[tokio::test]
    async fn other_users_reports_read_as_missing() {
        let router = build_router();
        let owner = register_and_token(&router, "owner@example.com").await;
        let intruder = register_and_token(&router, "intruder@example.com").await;

        let (_, created) = send_json(
            &router,
            "POST",
            "/api/v1/reports",
            Some(&owner),
            Some(&sample_document()),
        )
        .await;
        let uri = format!(
            "/api/v1/reports/{}",
            created.get("report_id").and_then(Value::as_str).expect("id")
        );

        let (status, _) = send_json(&router, "GET", &uri, Some(&intruder), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(
            &router,
            "PUT",
            &uri,
            Some(&intruder),
            Some(&sample_document()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let patch = json!({ "roof": { "condition": "tampered" } });
        let (status, _) = send_json(&router, "PATCH", &uri, Some(&intruder), Some(&patch)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(&router, "DELETE", &uri, Some(&intruder), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // still there for the rightful owner
        let (status, _) = send_json(&router, "GET", &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
