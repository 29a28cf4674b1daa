//! Integration tests for the TreeShop pricing engine HTTP API.
//!
//! This suite drives every endpoint through the router:
//! - Work scoring with and without AFISS factors
//! - Estimates from service templates and from loadouts
//! - Margin pricing
//! - Equipment, labor and loadout costing
//! - Locking line items and reconciling them against time entries
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use treeshop_engine::api::{AppState, create_router};
use treeshop_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/treeshop").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal string field from a response body.
fn field(value: &Value) -> Decimal {
    decimal(value.as_str().unwrap_or_else(|| panic!("not a string: {}", value)))
}

fn assert_approx(actual: Decimal, expected: &str) {
    let expected = decimal(expected);
    assert!(
        (actual - expected).abs() < decimal("0.01"),
        "expected ~{}, got {}",
        expected,
        actual
    );
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn mulching_work(acres: &str) -> Value {
    json!({
        "service_type": "forestry_mulching",
        "acres": acres,
        "dbh_package": "large"
    })
}

fn stump(diameter: &str, hardwood: bool) -> Value {
    json!({
        "diameter": diameter,
        "height_above": "1",
        "depth_below": "1",
        "hardwood": hardwood
    })
}

fn time_entry(category: &str, hours: &str, labor: &str, equipment: &str) -> Value {
    json!({
        "employee_id": "emp_001",
        "work_date": "2026-03-02",
        "category": category,
        "hours": hours,
        "labor_cost_per_hour": labor,
        "equipment_cost_per_hour": equipment
    })
}

fn mulcher_inputs() -> Value {
    json!({
        "purchase_price": "350000",
        "useful_life_years": "7",
        "finance_rate": "0.06",
        "insurance_cost": "8000",
        "registration_cost": "1000",
        "fuel_consumption_gph": "6",
        "fuel_price_per_gallon": "4",
        "maintenance_cost_annual": "15000",
        "repair_cost_annual": "10000",
        "annual_hours": "1000"
    })
}

// =============================================================================
// Work Score
// =============================================================================

#[tokio::test]
async fn test_stump_grinding_score() {
    let body = json!({
        "work": {"service_type": "stump_grinding", "stumps": [stump("18", false)]}
    });

    let (status, result) = post(create_router_for_test(), "/score", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["score"]["adjusted_score"]), decimal("648"));
    assert_eq!(field(&result["score"]["complexity_multiplier"]), Decimal::ONE);
}

#[tokio::test]
async fn test_hardwood_stump_score() {
    let body = json!({
        "work": {"service_type": "stump_grinding", "stumps": [stump("18", true)]}
    });

    let (status, result) = post(create_router_for_test(), "/score", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["score"]["adjusted_score"]), decimal("745.2"));
}

#[tokio::test]
async fn test_mulching_score_with_inline_afiss() {
    let mut work = mulching_work("2");
    work["afiss_multiplier"] = json!("1.2");

    let (status, result) = post(create_router_for_test(), "/score", json!({"work": work})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["score"]["base_score"]), decimal("16"));
    assert_eq!(field(&result["score"]["adjusted_score"]), decimal("19.2"));
    assert!(result.get("afiss").is_none());
}

#[tokio::test]
async fn test_selected_factors_replace_inline_afiss() {
    let mut work = mulching_work("2");
    work["afiss_multiplier"] = json!("3");
    let body = json!({"work": work, "afiss_factor_ids": ["steep_slope", "wet_ground"]});

    let (status, result) = post(create_router_for_test(), "/score", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["afiss"]["multiplier"]), decimal("1.35"));
    assert_eq!(field(&result["score"]["adjusted_score"]), decimal("21.6"));
}

#[tokio::test]
async fn test_small_acreage_is_not_proposable() {
    let (status, result) =
        post(create_router_for_test(), "/score", json!({"work": mulching_work("0.25")})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["proposable"], false);
    assert_eq!(result["score"]["minimums_met"], false);
}

#[tokio::test]
async fn test_tree_removal_score() {
    let body = json!({
        "work": {
            "service_type": "tree_removal",
            "trees": [{"height": "60", "dbh": "24", "canopy_radius": "15"}]
        }
    });

    let (status, result) = post(create_router_for_test(), "/score", body).await;

    // 60 ft x 15 ft x 2 x 24 in / 12
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["score"]["adjusted_score"]), decimal("3600"));
}

// =============================================================================
// Estimates
// =============================================================================

#[tokio::test]
async fn test_mulching_estimate_from_template() {
    let body = json!({
        "work": mulching_work("2"),
        "afiss_factor_ids": ["steep_slope"]
    });

    let (status, result) = post(create_router_for_test(), "/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["service_type"], "forestry_mulching");
    assert_eq!(field(&result["score"]["adjusted_score"]), decimal("19.2"));
    assert_approx(field(&result["time_estimate"]["production_hours"]), "14.77");
    assert_eq!(field(&result["pricing"]["cost_per_hour"]), decimal("246.43"));
    assert_eq!(field(&result["pricing"]["target_margin_percent"]), decimal("50"));

    let cost = field(&result["pricing"]["total_cost"]);
    let price = field(&result["pricing"]["total_price"]);
    assert_approx(price, &(cost * Decimal::TWO).to_string());
    assert!(result["calculation_id"].is_string());
}

#[tokio::test]
async fn test_estimate_applies_service_minimum() {
    let body = json!({
        "work": {"service_type": "stump_grinding", "stumps": [stump("10", false)]}
    });

    let (status, result) = post(create_router_for_test(), "/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["time_estimate"]["minimum_applied"], true);
    assert_eq!(field(&result["time_estimate"]["total_estimated_hours"]), decimal("2"));
    // 2h at $180 and 50% margin
    assert_eq!(field(&result["pricing"]["total_price"]), decimal("720"));
}

#[tokio::test]
async fn test_estimate_with_loadout_and_margin_override() {
    let body = json!({
        "work": {
            "service_type": "tree_removal",
            "trees": [{"height": "60", "dbh": "24", "canopy_radius": "15"}]
        },
        "target_margin_percent": "40",
        "loadout": {
            "id": "lo_001",
            "name": "Removal crew",
            "service_type": "tree_removal",
            "production_rate_pph": "180",
            "employees": [{
                "id": "emp_001",
                "name": "Climber",
                "compensation": {"base_hourly_rate": "20", "tier": 4}
            }]
        }
    });

    let (status, result) = post(create_router_for_test(), "/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    // 3600 / 180 = 20h + 2h buffer at $68/hr
    assert_eq!(field(&result["time_estimate"]["total_estimated_hours"]), decimal("22"));
    assert_eq!(field(&result["pricing"]["cost_per_hour"]), decimal("68"));
    assert_eq!(field(&result["pricing"]["total_cost"]), decimal("1496"));
    assert_approx(field(&result["pricing"]["total_price"]), "2493.33");

    let rule_ids: Vec<&str> = result["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert!(rule_ids.contains(&"labor_cost"));
}

#[tokio::test]
async fn test_estimate_flags_extreme_afiss() {
    let body = json!({
        "work": {"service_type": "land_clearing", "acres": "5", "density": "heavy"},
        "afiss_factor_ids": [
            "power_lines_touching", "crane_required", "rigging_heavy", "no_truck_access",
            "storm_damage", "building_within_10ft", "dead_or_hazard_tree", "steep_slope",
            "climbing_only", "roadway_traffic"
        ]
    });

    let (status, result) = post(create_router_for_test(), "/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["score"]["complexity_multiplier"]), decimal("3.4"));
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(
        warnings.iter().any(|w| w["code"] == "afiss_above_threshold"),
        "expected AFISS warning: {:?}",
        warnings
    );
}

#[tokio::test]
async fn test_estimate_without_extreme_afiss_has_no_warning() {
    let body = json!({
        "work": {"service_type": "land_clearing", "acres": "5", "density": "heavy"},
        "afiss_factor_ids": ["power_lines_touching", "crane_required"]
    });

    let (status, result) = post(create_router_for_test(), "/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

// =============================================================================
// Pricing and Costing
// =============================================================================

#[tokio::test]
async fn test_price_uses_margin_not_markup() {
    let body = json!({"cost": "246.43", "target_margin_percent": "50"});

    let (status, result) = post(create_router_for_test(), "/price", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["price"]), decimal("492.86"));
    assert_ne!(field(&result["price"]), decimal("369.645"));
    assert_eq!(field(&result["margin_percent"]), decimal("50"));
}

#[tokio::test]
async fn test_price_rejects_margin_of_100() {
    let body = json!({"cost": "100", "target_margin_percent": "100"});

    let (status, result) = post(create_router_for_test(), "/price", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_equipment_cost() {
    let (status, result) = post(create_router_for_test(), "/equipment-cost", mulcher_inputs()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["ownership_per_hour"]), decimal("80"));
    assert_eq!(field(&result["operating_per_hour"]), decimal("49"));
    assert_eq!(field(&result["total_per_hour"]), decimal("129"));
    assert_eq!(field(&result["components"]["fuel"]), decimal("24"));
}

#[tokio::test]
async fn test_equipment_cost_rejects_zero_hours() {
    let mut inputs = mulcher_inputs();
    inputs["annual_hours"] = json!("0");

    let (status, result) = post(create_router_for_test(), "/equipment-cost", inputs).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(result["message"].as_str().unwrap().contains("annual_hours"));
}

#[tokio::test]
async fn test_labor_cost_with_premiums() {
    let body = json!({
        "base_hourly_rate": "25",
        "tier": 3,
        "leadership": "L2",
        "equipment_certifications": ["E3"],
        "driver_classes": ["D2"],
        "certifications": ["ISA", "FIRST_AID"]
    });

    let (status, result) = post(create_router_for_test(), "/labor-cost", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result["total_hourly_compensation"]), decimal("54.5"));
    assert_eq!(field(&result["true_cost_per_hour"]), decimal("92.65"));
}

#[tokio::test]
async fn test_loadout_cost_and_billing_ladder() {
    let body = json!({
        "id": "lo_002",
        "name": "Mulching crew",
        "service_type": "forestry_mulching",
        "production_rate_pph": "1.3",
        "equipment": [{"id": "eq_001", "name": "Mulcher", "cost_inputs": mulcher_inputs()}],
        "employees": [{
            "id": "emp_001",
            "name": "Operator",
            "compensation": {"base_hourly_rate": "20", "tier": 1}
        }]
    });

    let (status, result) = post(create_router_for_test(), "/loadout-cost", body).await;

    assert_eq!(status, StatusCode::OK);
    // 129 equipment + 34 labor
    assert_eq!(field(&result["total_cost_per_hour"]), decimal("163"));
    let rates = result["billing_rates"].as_array().unwrap();
    assert_eq!(rates.len(), 5);
    assert_eq!(field(&rates[2]["rate"]), decimal("326"));
}

// =============================================================================
// Line Items and Reconciliation
// =============================================================================

#[tokio::test]
async fn test_lock_then_reconcile() {
    let lock_body = json!({
        "work": {
            "service_type": "tree_removal",
            "trees": [{"height": "60", "dbh": "24", "canopy_radius": "15"}]
        },
        "drive_time_minutes": "30"
    });

    let (status, line_item) = post(create_router_for_test(), "/line-items", lock_body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(line_item["id"].is_string());
    // 3600 / 500 = 7.2h + 1h transport + 0.72h buffer at $285
    assert_eq!(
        field(&line_item["time_estimate"]["total_estimated_hours"]),
        decimal("8.92")
    );
    assert_eq!(field(&line_item["pricing"]["total_cost"]), decimal("2542.2"));
    let client_price = field(&line_item["pricing"]["total_price"]);
    assert_eq!(client_price, decimal("5084.4"));

    let reconcile_body = json!({
        "line_item": line_item,
        "time_entries": [
            time_entry("production", "6", "100", "120"),
            time_entry("site_support", "1", "100", "0"),
            time_entry("general_support", "1", "80", "0")
        ]
    });

    let (status, result) = post(create_router_for_test(), "/reconcile", reconcile_body).await;

    assert_eq!(status, StatusCode::OK);
    let summary = &result["summary"];
    assert_eq!(field(&summary["client_price"]), client_price);
    assert_eq!(field(&summary["actual_pph"]), decimal("600"));
    assert_eq!(field(&summary["pph_variance"]), decimal("100"));
    // 780 labor + 720 equipment
    assert_eq!(field(&summary["actual_total_cost"]), decimal("1500"));
    assert_eq!(field(&summary["actual_profit"]), decimal("3584.4"));
    assert_eq!(field(&summary["actual_total_hours"]), decimal("8"));
    assert_eq!(result["outcomes"]["pph"], "favorable");
    assert_eq!(result["outcomes"]["hours"], "favorable");
    assert_eq!(result["outcomes"]["cost"], "favorable");
    assert_eq!(result["outcomes"]["profit"], "favorable");
    assert_eq!(result["outcomes"]["margin"], "favorable");
}

#[tokio::test]
async fn test_reconcile_without_production_hours() {
    let lock_body = json!({"work": mulching_work("2")});
    let (_, line_item) = post(create_router_for_test(), "/line-items", lock_body).await;

    let body = json!({
        "line_item": line_item,
        "time_entries": [time_entry("site_support", "2", "50", "0")]
    });

    let (status, result) = post(create_router_for_test(), "/reconcile", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["summary"]["actual_pph"].is_null());
    assert!(result["outcomes"]["pph"].is_null());
}

#[tokio::test]
async fn test_lock_below_minimum_acres_rejected() {
    let (status, result) =
        post(create_router_for_test(), "/line-items", json!({"work": mulching_work("0.2")})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_INPUT");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_service_type_returns_400() {
    let body = json!({"work": {"service_type": "hedge_trimming", "acres": "1"}});

    let (status, result) = post(create_router_for_test(), "/score", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_negative_time_entry_hours_returns_400() {
    let (_, line_item) =
        post(create_router_for_test(), "/line-items", json!({"work": mulching_work("2")})).await;

    let body = json!({
        "line_item": line_item,
        "time_entries": [time_entry("production", "-3", "50", "0")]
    });

    let (status, _) = post(create_router_for_test(), "/reconcile", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_stump_returns_calculation_error() {
    let body = json!({
        "work": {"service_type": "stump_grinding", "stumps": [stump("1000000000000000", false)]}
    });

    let (status, result) = post(create_router_for_test(), "/score", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(result["code"], "CALCULATION_ERROR");
}
