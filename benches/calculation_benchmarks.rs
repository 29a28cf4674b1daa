//! Performance benchmarks for the TreeShop pricing engine.
//!
//! Covers the pure calculators and the full `/estimate` endpoint:
//! - Work score for one job of each service type
//! - Time estimate from a score
//! - Loadout cost for a crew of growing size
//! - Full estimate through the router, with and without a loadout
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::str::FromStr;

use treeshop_engine::api::{AppState, create_router};
use treeshop_engine::calculation::{
    TimeEstimateInput, calculate_loadout_cost, estimate_time, score,
};
use treeshop_engine::config::ConfigLoader;
use treeshop_engine::models::{Loadout, ServiceType, WorkVolumeInput};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a state with the default organization's configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/treeshop").expect("Failed to load config");
    AppState::new(config)
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// One representative job per service type.
fn sample_jobs() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        (
            "stump_grinding",
            serde_json::json!({
                "service_type": "stump_grinding",
                "stumps": (0..12).map(|i| serde_json::json!({
                    "diameter": format!("{}", 12 + i),
                    "height_above": "1",
                    "depth_below": "1",
                    "hardwood": i % 2 == 0,
                    "root_flare": i % 3 == 0
                })).collect::<Vec<_>>()
            }),
        ),
        (
            "forestry_mulching",
            serde_json::json!({"service_type": "forestry_mulching", "acres": "3.5", "dbh_package": "large"}),
        ),
        (
            "land_clearing",
            serde_json::json!({"service_type": "land_clearing", "acres": "12", "density": "heavy"}),
        ),
        (
            "tree_removal",
            serde_json::json!({
                "service_type": "tree_removal",
                "trees": [
                    {"height": "60", "dbh": "24", "canopy_radius": "15"},
                    {"height": "45", "dbh": "18", "canopy_radius": "12"}
                ]
            }),
        ),
        (
            "tree_trimming",
            serde_json::json!({
                "service_type": "tree_trimming",
                "intensity": "medium",
                "trees": [{"height": "50", "dbh": "20", "canopy_radius": "18"}]
            }),
        ),
    ]
}

/// Builds a loadout with one mulcher and `crew_size` employees.
fn create_loadout(crew_size: usize) -> Loadout {
    let employees: Vec<serde_json::Value> = (0..crew_size)
        .map(|i| {
            serde_json::json!({
                "id": format!("emp_{:03}", i + 1),
                "name": format!("Crew member {}", i + 1),
                "compensation": {
                    "base_hourly_rate": "22.50",
                    "tier": (i % 5) + 1,
                    "leadership": if i == 0 { Some("L2") } else { None },
                    "equipment_certifications": ["E2"],
                    "certifications": if i % 2 == 0 { vec!["ISA"] } else { vec![] }
                }
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({
        "id": "lo_bench",
        "name": "Bench crew",
        "service_type": "forestry_mulching",
        "production_rate_pph": "1.3",
        "equipment": [{
            "id": "eq_001",
            "name": "Mulcher",
            "cost_inputs": {
                "purchase_price": "350000",
                "useful_life_years": "7",
                "finance_rate": "0.06",
                "insurance_cost": "8000",
                "fuel_consumption_gph": "6",
                "fuel_price_per_gallon": "4",
                "maintenance_cost_annual": "15000",
                "annual_hours": "1000"
            }
        }],
        "employees": employees
    }))
    .expect("Failed to create loadout")
}

/// Benchmark: Work score per service type.
fn bench_work_score(c: &mut Criterion) {
    let state = create_test_state();
    let settings = state.config().settings().scoring.clone();

    let mut group = c.benchmark_group("work_score");
    for (name, job) in sample_jobs() {
        let work: WorkVolumeInput = serde_json::from_value(job).expect("Failed to parse job");
        group.bench_with_input(BenchmarkId::from_parameter(name), &work, |b, work| {
            b.iter(|| black_box(score(black_box(work), &settings)))
        });
    }
    group.finish();
}

/// Benchmark: Time estimate from an adjusted score.
fn bench_time_estimate(c: &mut Criterion) {
    let state = create_test_state();
    let settings = state.config().settings().time.clone();
    let input = TimeEstimateInput {
        service_type: ServiceType::ForestryMulching,
        adjusted_score: decimal("19.2"),
        production_rate_pph: decimal("1.3"),
        drive_time_minutes: decimal("45"),
        transport_rate: decimal("0.5"),
    };

    c.bench_function("time_estimate", |b| {
        b.iter(|| black_box(estimate_time(black_box(&input), &settings)))
    });
}

/// Benchmark: Loadout cost as the crew grows.
fn bench_loadout_cost(c: &mut Criterion) {
    let state = create_test_state();
    let settings = state.config().settings().clone();

    let mut group = c.benchmark_group("loadout_cost");
    for crew_size in [1, 3, 6, 12].iter() {
        let loadout = create_loadout(*crew_size);
        group.throughput(Throughput::Elements(*crew_size as u64));
        group.bench_with_input(BenchmarkId::new("crew", crew_size), &loadout, |b, loadout| {
            b.iter(|| black_box(calculate_loadout_cost(black_box(loadout), &settings)))
        });
    }
    group.finish();
}

/// Benchmark: Full estimate through the router.
fn bench_estimate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    let template_body = serde_json::json!({
        "work": {"service_type": "forestry_mulching", "acres": "3.5", "dbh_package": "large"},
        "afiss_factor_ids": ["steep_slope", "wet_ground"],
        "drive_time_minutes": "45"
    });
    let loadout_body = serde_json::json!({
        "work": {"service_type": "forestry_mulching", "acres": "3.5", "dbh_package": "large"},
        "afiss_factor_ids": ["steep_slope", "wet_ground"],
        "drive_time_minutes": "45",
        "loadout": create_loadout(4)
    });

    let mut group = c.benchmark_group("estimate_endpoint");
    for (name, body) in [("template", template_body), ("loadout", loadout_body)] {
        let body = body.to_string();
        group.bench_function(name, |b| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/estimate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_work_score,
    bench_time_estimate,
    bench_loadout_cost,
    bench_estimate_endpoint,
);
criterion_main!(benches);
