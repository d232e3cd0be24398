use serde::{Deserialize, Serialize};

use crate::accounts::UserId;

use super::sections::{
    Basement, Bathroom, Bedroom, Boiler, CrawlSpace, DiningRoom, ElectricalCoolingSystems,
    EvaporatorCoil, Exterior, ExteriorAcUnit, Furnace, GarageCarport, Grounds, HeatingSystem,
    Interior, Kitchen, Laundry, LivingRoom, MainPanel, Overview, Photos, Plumbing, ReceiptInvoice,
    ReportDetails, Roof, SubPanel, Summary, WaterHeater,
};

/// Identifier for a stored inspection report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// The nested report payload: one header plus every section. This is both the
/// create/replace request body and the bulk of the stored record.
///
/// Cardinality mirrors the report schema: most sections appear exactly once,
/// garage/basement/crawlspace/exterior AC/photos are optional, and rooms or
/// units that a house can have several of are lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub report_details: ReportDetails,
    pub overview: Overview,
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Photos>,
    pub receipt_invoice: ReceiptInvoice,
    pub grounds: Grounds,
    pub roof: Roof,
    pub exterior: Exterior,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_ac: Option<ExteriorAcUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garage: Option<GarageCarport>,
    pub kitchen: Kitchen,
    pub laundry: Laundry,
    pub bathroom: Bathroom,
    pub bedrooms: Vec<Bedroom>,
    pub interior: Interior,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basement: Option<Basement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawlspace: Option<CrawlSpace>,
    pub plumbing: Plumbing,
    #[serde(rename = "waterheater")]
    pub water_heater: WaterHeater,
    #[serde(rename = "heatingsystem")]
    pub heating_system: HeatingSystem,
    #[serde(rename = "furnace")]
    pub furnaces: Vec<Furnace>,
    pub boiler: Boiler,
    #[serde(rename = "electricalcoolingsystems")]
    pub electrical_cooling: ElectricalCoolingSystems,
    #[serde(rename = "main_panel")]
    pub main_panels: Vec<MainPanel>,
    #[serde(rename = "sub_panel")]
    pub sub_panels: Vec<SubPanel>,
    #[serde(rename = "evap_coil")]
    pub evaporator_coils: Vec<EvaporatorCoil>,
    #[serde(rename = "living_room")]
    pub living_rooms: Vec<LivingRoom>,
    #[serde(rename = "dining_room")]
    pub dining_rooms: Vec<DiningRoom>,
}

impl ReportDocument {
    /// Cross-field validation applied on create and on every update.
    pub fn validate(&self) -> Result<(), ReportValidationError> {
        let details = &self.report_details;
        if details.title.trim().is_empty() {
            return Err(ReportValidationError::EmptyTitle);
        }
        if details.r_id.trim().is_empty() {
            return Err(ReportValidationError::EmptyReferenceId);
        }

        if details.bedroom_count as usize != self.bedrooms.len() {
            return Err(ReportValidationError::BedroomCountMismatch {
                declared: details.bedroom_count,
                provided: self.bedrooms.len(),
            });
        }

        match (details.basement_type, self.basement.is_some()) {
            (true, false) => return Err(ReportValidationError::MissingBasement),
            (false, true) => return Err(ReportValidationError::UnexpectedBasement),
            _ => {}
        }

        let garage_declared = declares_garage(&details.garage_type);
        match (garage_declared, self.garage.is_some()) {
            (true, false) => {
                return Err(ReportValidationError::MissingGarage {
                    garage_type: details.garage_type.clone(),
                })
            }
            (false, true) => return Err(ReportValidationError::UnexpectedGarage),
            _ => {}
        }

        for (section, len) in [
            ("bedroom", self.bedrooms.len()),
            ("furnace", self.furnaces.len()),
            ("main panel", self.main_panels.len()),
            ("sub panel", self.sub_panels.len()),
            ("evaporator coil", self.evaporator_coils.len()),
            ("living room", self.living_rooms.len()),
            ("dining room", self.dining_rooms.len()),
        ] {
            if len == 0 {
                return Err(ReportValidationError::EmptyList { section });
            }
        }

        Ok(())
    }
}

/// A stored report: the document plus identity and ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub report_id: ReportId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub document: ReportDocument,
}

/// Partial update at section granularity: any present section replaces the
/// stored one wholesale. Optional sections cannot be removed through a patch,
/// only replaced; removal goes through a full `PUT`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportPatch {
    pub report_details: Option<ReportDetails>,
    pub overview: Option<Overview>,
    pub summary: Option<Summary>,
    pub photos: Option<Photos>,
    pub receipt_invoice: Option<ReceiptInvoice>,
    pub grounds: Option<Grounds>,
    pub roof: Option<Roof>,
    pub exterior: Option<Exterior>,
    pub exterior_ac: Option<ExteriorAcUnit>,
    pub garage: Option<GarageCarport>,
    pub kitchen: Option<Kitchen>,
    pub laundry: Option<Laundry>,
    pub bathroom: Option<Bathroom>,
    pub bedrooms: Option<Vec<Bedroom>>,
    pub interior: Option<Interior>,
    pub basement: Option<Basement>,
    pub crawlspace: Option<CrawlSpace>,
    pub plumbing: Option<Plumbing>,
    #[serde(rename = "waterheater")]
    pub water_heater: Option<WaterHeater>,
    #[serde(rename = "heatingsystem")]
    pub heating_system: Option<HeatingSystem>,
    #[serde(rename = "furnace")]
    pub furnaces: Option<Vec<Furnace>>,
    pub boiler: Option<Boiler>,
    #[serde(rename = "electricalcoolingsystems")]
    pub electrical_cooling: Option<ElectricalCoolingSystems>,
    #[serde(rename = "main_panel")]
    pub main_panels: Option<Vec<MainPanel>>,
    #[serde(rename = "sub_panel")]
    pub sub_panels: Option<Vec<SubPanel>>,
    #[serde(rename = "evap_coil")]
    pub evaporator_coils: Option<Vec<EvaporatorCoil>>,
    #[serde(rename = "living_room")]
    pub living_rooms: Option<Vec<LivingRoom>>,
    #[serde(rename = "dining_room")]
    pub dining_rooms: Option<Vec<DiningRoom>>,
}

impl ReportPatch {
    pub fn apply(self, document: &mut ReportDocument) {
        if let Some(value) = self.report_details {
            document.report_details = value;
        }
        if let Some(value) = self.overview {
            document.overview = value;
        }
        if let Some(value) = self.summary {
            document.summary = value;
        }
        if let Some(value) = self.photos {
            document.photos = Some(value);
        }
        if let Some(value) = self.receipt_invoice {
            document.receipt_invoice = value;
        }
        if let Some(value) = self.grounds {
            document.grounds = value;
        }
        if let Some(value) = self.roof {
            document.roof = value;
        }
        if let Some(value) = self.exterior {
            document.exterior = value;
        }
        if let Some(value) = self.exterior_ac {
            document.exterior_ac = Some(value);
        }
        if let Some(value) = self.garage {
            document.garage = Some(value);
        }
        if let Some(value) = self.kitchen {
            document.kitchen = value;
        }
        if let Some(value) = self.laundry {
            document.laundry = value;
        }
        if let Some(value) = self.bathroom {
            document.bathroom = value;
        }
        if let Some(value) = self.bedrooms {
            document.bedrooms = value;
        }
        if let Some(value) = self.interior {
            document.interior = value;
        }
        if let Some(value) = self.basement {
            document.basement = Some(value);
        }
        if let Some(value) = self.crawlspace {
            document.crawlspace = Some(value);
        }
        if let Some(value) = self.plumbing {
            document.plumbing = value;
        }
        if let Some(value) = self.water_heater {
            document.water_heater = value;
        }
        if let Some(value) = self.heating_system {
            document.heating_system = value;
        }
        if let Some(value) = self.furnaces {
            document.furnaces = value;
        }
        if let Some(value) = self.boiler {
            document.boiler = value;
        }
        if let Some(value) = self.electrical_cooling {
            document.electrical_cooling = value;
        }
        if let Some(value) = self.main_panels {
            document.main_panels = value;
        }
        if let Some(value) = self.sub_panels {
            document.sub_panels = value;
        }
        if let Some(value) = self.evaporator_coils {
            document.evaporator_coils = value;
        }
        if let Some(value) = self.living_rooms {
            document.living_rooms = value;
        }
        if let Some(value) = self.dining_rooms {
            document.dining_rooms = value;
        }
    }
}

fn declares_garage(garage_type: &str) -> bool {
    let trimmed = garage_type.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("none")
}

/// Document-level validation failures, returned as 422 responses.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportValidationError {
    #[error("report title must not be empty")]
    EmptyTitle,
    #[error("report r_id must not be empty")]
    EmptyReferenceId,
    #[error("{declared} bedrooms declared but {provided} bedroom sections provided")]
    BedroomCountMismatch { declared: u32, provided: usize },
    #[error("basement_type is set but no basement section was provided")]
    MissingBasement,
    #[error("a basement section was provided but basement_type is not set")]
    UnexpectedBasement,
    #[error("garage_type '{garage_type}' requires a garage section")]
    MissingGarage { garage_type: String },
    #[error("a garage section was provided but garage_type is 'none'")]
    UnexpectedGarage,
    #[error("at least one {section} section is required")]
    EmptyList { section: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::sections::*;
    use chrono::NaiveDate;

    pub(crate) fn sample_document() -> ReportDocument {
        ReportDocument {
            report_details: ReportDetails {
                title: "Sample report title".to_string(),
                r_id: "R-1001".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 9, 18).expect("valid date"),
                customer_fname: "Samplefname".to_string(),
                customer_lname: "Samplelname".to_string(),
                bedroom_count: 2,
                bathroom_count: 2,
                garage_type: "none".to_string(),
                basement_type: false,
            },
            overview: Overview::default(),
            summary: Summary::default(),
            photos: None,
            receipt_invoice: ReceiptInvoice {
                company: "Inspectly LLC".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 9, 18).expect("valid date"),
                inspector_fname: "Ada".to_string(),
                inspector_lname: "Doe".to_string(),
                client_fname: "Samplefname".to_string(),
                client_lname: "Samplelname".to_string(),
                payment_type: "card".to_string(),
                total_fee: "425.00".to_string(),
            },
            grounds: Grounds::default(),
            roof: Roof::default(),
            exterior: Exterior::default(),
            exterior_ac: None,
            garage: None,
            kitchen: Kitchen::default(),
            laundry: Laundry::default(),
            bathroom: Bathroom::default(),
            bedrooms: vec![Bedroom::default(), Bedroom::default()],
            interior: Interior::default(),
            basement: None,
            crawlspace: None,
            plumbing: Plumbing::default(),
            water_heater: WaterHeater::default(),
            heating_system: HeatingSystem::default(),
            furnaces: vec![Furnace::default()],
            boiler: Boiler::default(),
            electrical_cooling: ElectricalCoolingSystems::default(),
            main_panels: vec![MainPanel::default()],
            sub_panels: vec![SubPanel::default()],
            evaporator_coils: vec![EvaporatorCoil::default()],
            living_rooms: vec![LivingRoom::default()],
            dining_rooms: vec![DiningRoom::default()],
        }
    }

    #[test]
    fn sample_document_is_valid() {
        sample_document().validate().expect("sample validates");
    }

    #[test]
    fn bedroom_count_must_match_sections() {
        let mut document = sample_document();
        document.report_details.bedroom_count = 3;
        assert_eq!(
            document.validate(),
            Err(ReportValidationError::BedroomCountMismatch {
                declared: 3,
                provided: 2,
            })
        );
    }

    #[test]
    fn basement_flag_requires_section() {
        let mut document = sample_document();
        document.report_details.basement_type = true;
        assert_eq!(document.validate(), Err(ReportValidationError::MissingBasement));

        document.basement = Some(Basement::default());
        document.validate().expect("flag plus section validates");

        document.report_details.basement_type = false;
        assert_eq!(
            document.validate(),
            Err(ReportValidationError::UnexpectedBasement)
        );
    }

    #[test]
    fn garage_type_requires_section() {
        let mut document = sample_document();
        document.report_details.garage_type = "Detached".to_string();
        assert_eq!(
            document.validate(),
            Err(ReportValidationError::MissingGarage {
                garage_type: "Detached".to_string(),
            })
        );

        document.garage = Some(GarageCarport::default());
        document.validate().expect("garage section validates");
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut document = sample_document();
        document.report_details.title = "   ".to_string();
        assert_eq!(document.validate(), Err(ReportValidationError::EmptyTitle));
    }

    #[test]
    fn repeated_sections_must_be_present() {
        let mut document = sample_document();
        document.furnaces.clear();
        assert_eq!(
            document.validate(),
            Err(ReportValidationError::EmptyList { section: "furnace" })
        );
    }

    #[test]
    fn patch_replaces_sections_wholesale() {
        let mut document = sample_document();
        let patch: ReportPatch = serde_json::from_value(serde_json::json!({
            "roof": { "condition": "hail damage on south slope" },
            "furnace": [ { "furnace_unit": "2009 Lennox, serviceable" } ],
        }))
        .expect("patch parses");

        patch.apply(&mut document);
        assert_eq!(document.roof.condition, "hail damage on south slope");
        assert_eq!(document.roof.style, "");
        assert_eq!(document.furnaces.len(), 1);
        assert_eq!(document.furnaces[0].furnace_unit, "2009 Lennox, serviceable");
        document.validate().expect("patched document still valid");
    }

    #[test]
    fn wire_names_match_report_schema() {
        let report = InspectionReport {
            report_id: ReportId("rpt-000001".to_string()),
            user_id: crate::accounts::UserId("usr-000001".to_string()),
            document: sample_document(),
        };
        let json = serde_json::to_value(&report).expect("report serializes");
        assert!(json.get("report_details").is_some());
        assert!(json.get("waterheater").is_some());
        assert!(json.get("heatingsystem").is_some());
        assert!(json.get("electricalcoolingsystems").is_some());
        assert!(json.get("furnace").is_some());
        assert!(json.get("evap_coil").is_some());
        // optional sections are omitted rather than null
        assert!(json.get("basement").is_none());
        assert!(json.get("garage").is_none());
    }
}
