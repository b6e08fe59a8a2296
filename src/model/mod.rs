//! # Report Input
//!
//! The immutable data bundle a report is rendered from. It is produced by
//! the lookup and calculator layers upstream; the renderer only reads it.
//!
//! Every field is optional and independently so. A section whose data is
//! absent is omitted, and a scalar that is absent renders as a placeholder,
//! so a completely empty `{}` is a valid report (cover page + disclaimer).
//!
//! The JSON shape is camelCase and unknown fields are ignored, which lets
//! upstream add fields without breaking older renderers.

use serde::{Deserialize, Serialize};

/// A complete report ready for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    pub vehicle: Option<Vehicle>,
    /// MOT test records, in any order. The renderer sorts them newest first.
    pub mot_tests: Vec<MotTest>,
    pub health_score: Option<HealthScore>,
    pub mot_readiness: Option<MotReadiness>,
    /// `None` means recalls were not checked; `Some(vec![])` means none found.
    pub recalls: Option<Vec<Recall>>,
    pub emissions_zones: Option<EmissionsCompliance>,
    pub valuation: Option<Valuation>,
    pub running_costs: Option<RunningCosts>,
    pub negotiation: Option<Negotiation>,
    pub road_tax: Option<RoadTax>,
    pub safety_rating: Option<SafetyRating>,
    pub rarity: Option<Rarity>,
    pub colour_popularity: Option<ColourPopularity>,
    pub tyres: Option<TyreSpec>,
    pub dimensions: Option<Dimensions>,
    /// Report generation date (ISO `YYYY-MM-DD`), shown on the cover.
    pub generated_on: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vehicle {
    pub registration: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub colour: Option<String>,
    pub fuel_type: Option<String>,
    pub year_of_manufacture: Option<u32>,
    /// Engine capacity in cc.
    pub engine_capacity: Option<u32>,
    /// CO2 in g/km.
    pub co2_emissions: Option<u32>,
    pub euro_status: Option<String>,
    pub first_registered: Option<String>,
    pub body_type: Option<String>,
    pub transmission: Option<String>,
    pub tax_status: Option<String>,
    pub tax_due_date: Option<String>,
    pub mot_status: Option<String>,
    pub mot_expiry_date: Option<String>,
    pub marked_for_export: Option<bool>,
    pub date_of_last_v5c: Option<String>,
}

impl Vehicle {
    /// "Ford Focus", "Ford", or `None`.
    pub fn title(&self) -> Option<String> {
        match (&self.make, &self.model) {
            (Some(make), Some(model)) => Some(format!("{} {}", make, model)),
            (Some(make), None) => Some(make.clone()),
            (None, Some(model)) => Some(model.clone()),
            (None, None) => None,
        }
    }
}

/// Parsed case-insensitively. Anything unrecognised, such as `ABANDONED`,
/// becomes `Unknown` and renders as the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TestResult {
    Pass,
    Fail,
    Unknown,
}

impl From<String> for TestResult {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            // Passed after rectification at the station.
            "PASS" | "PASSED" | "PRS" => TestResult::Pass,
            "FAIL" | "FAILED" => TestResult::Fail,
            _ => TestResult::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotTest {
    /// ISO date (`YYYY-MM-DD`, optionally with a time part).
    pub completed_date: Option<String>,
    pub test_result: Option<TestResult>,
    pub odometer_value: Option<u32>,
    /// "mi" or "km". Miles are assumed when absent.
    pub odometer_unit: Option<String>,
    pub test_number: Option<String>,
    pub expiry_date: Option<String>,
    pub items: Vec<MotItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    Advisory,
    Defect,
    Comment,
    #[default]
    Unknown,
}

/// An MOT remark. Missing text or type never fails the report: the item
/// is kept with an empty text or an `Unknown` kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawMotItem")]
pub struct MotItem {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub dangerous: bool,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawMotItem {
    text: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    dangerous: Option<bool>,
}

impl From<RawMotItem> for MotItem {
    fn from(raw: RawMotItem) -> Self {
        let kind = raw.kind.unwrap_or_default();
        let (kind, dangerous) = match kind.trim().to_ascii_uppercase().as_str() {
            "ADVISORY" => (ItemKind::Advisory, false),
            "DANGEROUS" => (ItemKind::Defect, true),
            // PRS: a defect repaired while the test was in progress.
            "DEFECT" | "MAJOR" | "MINOR" | "FAIL" | "PRS" => (ItemKind::Defect, false),
            "COMMENT" | "USER ENTERED" => (ItemKind::Comment, false),
            _ => (ItemKind::Unknown, false),
        };
        MotItem {
            text: raw.text.unwrap_or_default(),
            kind,
            dangerous: dangerous || raw.dangerous.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthScore {
    /// 0 - 100.
    pub score: Option<u8>,
    pub grade: Option<String>,
    pub summary: Option<String>,
    pub categories: Vec<ScoreCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreCategory {
    pub name: String,
    pub score: Option<u8>,
    /// Defaults to 100 when absent.
    pub max: Option<u8>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficLight {
    #[serde(alias = "green", alias = "GREEN", alias = "low")]
    Green,
    #[serde(alias = "amber", alias = "AMBER", alias = "medium")]
    Amber,
    #[serde(alias = "red", alias = "RED", alias = "high")]
    Red,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotReadiness {
    pub status: Option<TrafficLight>,
    pub score: Option<u8>,
    pub summary: Option<String>,
    pub risks: Vec<RiskItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskItem {
    pub category: String,
    pub description: Option<String>,
    pub likelihood: Option<TrafficLight>,
    pub cost_min: Option<f64>,
    pub cost_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recall {
    pub title: Option<String>,
    pub description: Option<String>,
    pub remedy: Option<String>,
    pub date: Option<String>,
    pub reference: Option<String>,
    /// `Some(false)` when the recall work is recorded as done.
    pub outstanding: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(alias = "compliant", alias = "COMPLIANT")]
    Compliant,
    #[serde(alias = "nonCompliant", alias = "non_compliant", alias = "NON_COMPLIANT")]
    NonCompliant,
    #[serde(alias = "exempt", alias = "EXEMPT")]
    Exempt,
    #[serde(alias = "unknown", alias = "UNKNOWN")]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmissionsCompliance {
    pub status: Option<ComplianceStatus>,
    pub summary: Option<String>,
    pub zones: Vec<ZoneCharge>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneCharge {
    pub name: String,
    pub compliant: Option<bool>,
    pub daily_charge: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Valuation {
    pub trade: Option<f64>,
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
    /// "high", "medium", "low" or free text.
    pub confidence: Option<String>,
    pub market: Option<MarketSummary>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketSummary {
    pub listings: Option<u32>,
    pub average_price: Option<f64>,
    pub average_mileage: Option<u32>,
    pub average_days_to_sell: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunningCosts {
    pub annual_total: Option<f64>,
    pub items: Vec<CostItem>,
    pub assumptions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostItem {
    pub label: String,
    pub annual: Option<f64>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Negotiation {
    pub opening_offer: Option<f64>,
    pub target_price: Option<f64>,
    pub walk_away: Option<f64>,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoadTax {
    pub band: Option<String>,
    pub annual: Option<f64>,
    pub six_month: Option<f64>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafetyRating {
    /// 0 - 5.
    pub stars: Option<u8>,
    pub year_tested: Option<u32>,
    pub adult_occupant: Option<u8>,
    pub child_occupant: Option<u8>,
    pub pedestrian: Option<u8>,
    pub safety_assist: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rarity {
    pub registered_count: Option<u32>,
    pub on_road: Option<u32>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColourPopularity {
    pub colour: Option<String>,
    pub share_percent: Option<f64>,
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TyreSpec {
    pub front: Option<String>,
    pub rear: Option<String>,
    pub pressure_front: Option<String>,
    pub pressure_rear: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dimensions {
    pub length_mm: Option<u32>,
    pub width_mm: Option<u32>,
    pub height_mm: Option<u32>,
    pub wheelbase_mm: Option<u32>,
    pub kerb_weight_kg: Option<u32>,
    pub boot_litres: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_a_valid_report() {
        let report: Report = serde_json::from_str("{}").unwrap();
        assert!(report.vehicle.is_none());
        assert!(report.mot_tests.is_empty());
        assert!(report.recalls.is_none());
    }

    #[test]
    fn camel_case_and_aliases() {
        let json = r#"{
            "vehicle": { "registration": "AB12 CDE", "make": "FORD", "fuelType": "PETROL" },
            "motTests": [{
                "completedDate": "2023-04-01",
                "testResult": "PASSED",
                "odometerValue": 54000,
                "items": [{ "text": "Tyre worn", "type": "ADVISORY" }]
            }],
            "somethingNew": 1
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        let vehicle = report.vehicle.unwrap();
        assert_eq!(vehicle.fuel_type.as_deref(), Some("PETROL"));
        assert_eq!(report.mot_tests[0].test_result, Some(TestResult::Pass));
        assert_eq!(report.mot_tests[0].items[0].kind, ItemKind::Advisory);
    }

    fn parse_item(json: &str) -> MotItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn item_without_type_is_unknown() {
        let item = parse_item(r#"{ "text": "Tyre worn" }"#);
        assert_eq!(item.kind, ItemKind::Unknown);
        assert_eq!(item.text, "Tyre worn");
    }

    #[test]
    fn item_without_text_is_kept() {
        let item = parse_item(r#"{ "type": "ADVISORY" }"#);
        assert_eq!(item.kind, ItemKind::Advisory);
        assert!(item.text.is_empty());
    }

    #[test]
    fn dangerous_type_is_a_dangerous_defect() {
        let item = parse_item(r#"{ "text": "Brake hose leaking", "type": "DANGEROUS" }"#);
        assert_eq!(item.kind, ItemKind::Defect);
        assert!(item.dangerous);
    }

    #[test]
    fn prs_item_is_a_defect() {
        let item = parse_item(r#"{ "text": "Headlamp aim", "type": "PRS" }"#);
        assert_eq!(item.kind, ItemKind::Defect);
        assert!(!item.dangerous);
    }

    #[test]
    fn unrecognised_test_result_is_unknown() {
        let test: MotTest = serde_json::from_str(r#"{ "testResult": "ABANDONED" }"#).unwrap();
        assert_eq!(test.test_result, Some(TestResult::Unknown));
        let test: MotTest = serde_json::from_str(r#"{ "testResult": "failed" }"#).unwrap();
        assert_eq!(test.test_result, Some(TestResult::Fail));
    }

    #[test]
    fn vehicle_title() {
        let v = Vehicle {
            make: Some("Ford".into()),
            model: Some("Focus".into()),
            ..Default::default()
        };
        assert_eq!(v.title().as_deref(), Some("Ford Focus"));
        assert_eq!(Vehicle::default().title(), None);
    }
}
