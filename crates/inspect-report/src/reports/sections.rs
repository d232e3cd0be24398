//! Fixed-schema sections of an inspection report.
//!
//! Every section is a flat record of free-text condition fields; the document
//! in [`super::domain`] decides which sections are required, optional, or
//! repeated. Field names follow the wire format of the report API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Report header: who the inspection was for and the headline facts used to
/// cross-check the section lists (bedroom count, basement flag, garage type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    pub title: String,
    pub r_id: String,
    pub date: NaiveDate,
    pub customer_fname: String,
    pub customer_lname: String,
    pub bedroom_count: u32,
    pub bathroom_count: u32,
    pub garage_type: String,
    pub basement_type: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub scope: String,
    pub state_of_occupancy: String,
    pub weather: String,
    pub recent_rain: String,
    pub ground_cover: String,
    pub approx_age: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub items_not_operating: String,
    pub major_concerns: String,
    pub safety_hazards: String,
    pub further_review: String,
    pub monitor: String,
    pub general_maintenance: String,
    pub needing_repair: String,
}

/// Storage keys for photos taken per inspection area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photos {
    pub grounds_photos: Vec<String>,
    pub roof_photos: Vec<String>,
    pub exterior_photos: Vec<String>,
    pub garage_photos: Vec<String>,
    pub kitchen_photos: Vec<String>,
    pub laundry_photos: Vec<String>,
    pub bathroom_photos: Vec<String>,
    pub bedroom_photos: Vec<String>,
    pub interior_photos: Vec<String>,
    pub basement_photos: Vec<String>,
    pub crawl_photos: Vec<String>,
    pub plumbing_photos: Vec<String>,
    pub heating_photos: Vec<String>,
    pub living_room_photos: Vec<String>,
    pub dining_room_photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptInvoice {
    pub company: String,
    pub date: NaiveDate,
    pub inspector_fname: String,
    pub inspector_lname: String,
    pub client_fname: String,
    pub client_lname: String,
    pub payment_type: String,
    pub total_fee: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grounds {
    pub service_walks: String,
    pub drive_parking: String,
    pub stoop_steps: String,
    pub patio: String,
    pub deck_balcony: String,
    pub covers: String,
    pub fence_wall: String,
    pub landscaping: String,
    pub retaining_wall: String,
    pub hose_bibs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roof {
    pub general: String,
    pub style: String,
    pub ventilation: String,
    pub flashing: String,
    pub valleys: String,
    pub condition: String,
    pub skylights: String,
    pub plumbing_vents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exterior {
    pub chimney: String,
    pub gutters: String,
    pub siding: String,
    pub trim: String,
    pub soffit: String,
    pub fascia: String,
    pub flashing: String,
    pub caulking: String,
    pub windows: String,
    pub storm_windows: String,
    pub slab_on_foundation: String,
    pub service_entry: String,
    pub wall_construction: String,
    pub exterior_doors: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExteriorAcUnit {
    pub exterior_ac: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarageCarport {
    #[serde(rename = "type")]
    pub kind: String,
    pub automatic_opener: String,
    pub safety_reverse: String,
    pub roofing: String,
    pub gutters: String,
    pub siding: String,
    pub trim: String,
    pub floor: String,
    pub sillplate: String,
    pub overhead_doors: String,
    pub service_door: String,
    pub electrical: String,
    pub walls_ceiling: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kitchen {
    pub countertops: String,
    pub cabinets: String,
    pub plumbing: String,
    pub walls_ceiling: String,
    pub heating_cooling: String,
    pub floor: String,
    pub appliances: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Laundry {
    pub laundry: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bathroom {
    pub bathroom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bedroom {
    pub bedroom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interior {
    pub fireplace: String,
    pub stairs_steps: String,
    pub smoke_carbon_det: String,
    pub attic: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basement {
    pub stairs: String,
    pub foundation: String,
    pub floor: String,
    pub seismic_bolts: String,
    pub drainage: String,
    pub girders_beams: String,
    pub columns: String,
    pub joists: String,
    pub subfloor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlSpace {
    pub crawlspace: String,
    pub access: String,
    pub foundation: String,
    pub floor: String,
    pub seismic_bolts: String,
    pub drainage: String,
    pub ventilation: String,
    pub girders_beams: String,
    pub joists: String,
    pub subfloor: String,
    pub insulation: String,
    pub vapor_barriers: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plumbing {
    pub water_service: String,
    pub fuel_shutoff: String,
    pub well_pump: String,
    pub sanitary_pump: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterHeater {
    pub water_heater: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatingSystem {
    pub other_systems: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Furnace {
    pub furnace_unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boiler {
    pub boiler_unit: String,
}

/// Grouping record for the electrical/cooling sub-sections; the original
/// exposes no data columns of its own beyond free-form notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricalCoolingSystems {
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainPanel {
    pub main_panel: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubPanel {
    pub sub_panel: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaporatorCoil {
    pub evap_coil: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivingRoom {
    pub living_room: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiningRoom {
    pub dining_room: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garage_kind_uses_wire_name_type() {
        let garage = GarageCarport {
            kind: "Detached".to_string(),
            ..GarageCarport::default()
        };
        let json = serde_json::to_value(&garage).expect("garage serializes");
        assert_eq!(json.get("type").and_then(|v| v.as_str()), Some("Detached"));
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn sections_tolerate_sparse_payloads() {
        let roof: Roof = serde_json::from_str(r#"{"condition":"worn shingles"}"#)
            .expect("partial roof parses");
        assert_eq!(roof.condition, "worn shingles");
        assert_eq!(roof.style, "");
    }

    #[test]
    fn report_details_parses_iso_dates() {
        let details: ReportDetails = serde_json::from_value(serde_json::json!({
            "title": "Sample report title",
            "r_id": "R-1001",
            "date": "2023-09-18",
            "customer_fname": "Samplefname",
            "customer_lname": "Samplelname",
            "bedroom_count": 3,
            "bathroom_count": 2,
            "garage_type": "Detached",
            "basement_type": true
        }))
        .expect("details parse");
        assert_eq!(
            details.date,
            NaiveDate::from_ymd_opt(2023, 9, 18).expect("valid date")
        );
    }
}
