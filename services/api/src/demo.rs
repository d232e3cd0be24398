use crate::infra::{
    InMemoryCompanyRepository, InMemoryReportRepository, InMemoryTokenStore, InMemoryUserRepository,
};
use chrono::Local;
use clap::Args;
use inspect_report::accounts::{AccountService, CompanySubmission, UserRegistration};
use inspect_report::error::AppError;
use inspect_report::reports::{InspectionReportService, ReportDocument};
use serde_json::json;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Email for the demo inspector account
    #[arg(long, default_value = "inspector@example.com")]
    pub(crate) email: String,
    /// Company name attached to the demo inspector
    #[arg(long, default_value = "Demo Inspections LLC")]
    pub(crate) company_name: String,
}

/// Drive the account and report services end to end against the in-memory
/// adapters and print what a client would see.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryCompanyRepository::default()),
        Arc::new(InMemoryTokenStore::default()),
    ));
    let reports = InspectionReportService::new(Arc::new(InMemoryReportRepository::default()));

    let account = accounts.register_user(UserRegistration {
        email: args.email.clone(),
        password: "demo-pass-123".to_string(),
        fname: "Demo".to_string(),
        lname: "Inspector".to_string(),
        phone_number: 5_155_550_100,
        license: "DEMO-0001".to_string(),
    })?;
    let token = accounts.issue_token(&args.email, "demo-pass-123")?;

    let company = accounts.create_company(
        &account,
        CompanySubmission {
            owner: format!("{} {}", account.fname, account.lname),
            owner_email: account.email.clone(),
            company_name: args.company_name,
            company_addr: "100 Main St, Des Moines IA".to_string(),
            phone_number: 5_155_550_100,
        },
    )?;

    let document: ReportDocument = serde_json::from_value(sample_document_json())?;
    let report = reports.create(&account.user_id, document)?;
    let listing = reports.list(&account.user_id)?;

    println!("registered {} ({})", account.email, account.user_id.0);
    println!("token: {}", token.key);
    println!(
        "company: {}",
        serde_json::to_string_pretty(&company.view())?
    );
    println!("reports on file: {}", listing.len());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// A realistic three-bedroom inspection document dated today. Shared with the
/// infra tests so in-memory adapters are exercised with a full payload.
pub(crate) fn sample_document_json() -> serde_json::Value {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    json!({
        "report_details": {
            "title": "1208 Grand Ave split-level",
            "r_id": "R-1208",
            "date": today,
            "customer_fname": "Jordan",
            "customer_lname": "Avery",
            "bedroom_count": 3,
            "bathroom_count": 2,
            "garage_type": "Attached",
            "basement_type": true
        },
        "overview": {
            "scope": "Full residential inspection",
            "state_of_occupancy": "Occupied",
            "weather": "Clear, 72F",
            "recent_rain": "None in the last week",
            "ground_cover": "Dry",
            "approx_age": "Built 1978"
        },
        "summary": {
            "major_concerns": "Active leak under kitchen sink",
            "general_maintenance": "Seal driveway cracks"
        },
        "receipt_invoice": {
            "company": "Demo Inspections LLC",
            "date": today,
            "inspector_fname": "Demo",
            "inspector_lname": "Inspector",
            "client_fname": "Jordan",
            "client_lname": "Avery",
            "payment_type": "card",
            "total_fee": "425.00"
        },
        "grounds": { "service_walks": "Settled at north entry" },
        "roof": { "style": "Gable, asphalt shingle", "condition": "Serviceable" },
        "exterior": { "siding": "Vinyl, fair condition" },
        "garage": {
            "type": "Attached",
            "automatic_opener": "Operable",
            "safety_reverse": "Responds to resistance"
        },
        "kitchen": { "plumbing": "Leak at trap under sink" },
        "laundry": { "laundry": "Hookups present and capped" },
        "bathroom": { "bathroom": "Caulk worn at tub surround" },
        "bedrooms": [
            { "bedroom": "NW bedroom serviceable" },
            { "bedroom": "NE bedroom serviceable" },
            { "bedroom": "Basement bedroom lacks egress window" }
        ],
        "interior": { "smoke_carbon_det": "Present on each level" },
        "basement": { "foundation": "Poured concrete, minor shrinkage cracks" },
        "plumbing": { "water_service": "Copper, 3/4 inch" },
        "waterheater": { "water_heater": "40 gal gas, 2015" },
        "heatingsystem": { "other_systems": "None observed" },
        "furnace": [ { "furnace_unit": "Gas forced air, serviceable" } ],
        "boiler": { "boiler_unit": "Not present" },
        "electricalcoolingsystems": { "notes": "200A service, central AC" },
        "main_panel": [ { "main_panel": "200A breaker panel, labeled" } ],
        "sub_panel": [ { "sub_panel": "60A garage subpanel" } ],
        "evap_coil": [ { "evap_coil": "Clean, no corrosion" } ],
        "living_room": [ { "living_room": "Serviceable" } ],
        "dining_room": [ { "dining_room": "Serviceable" } ]
    })
}
