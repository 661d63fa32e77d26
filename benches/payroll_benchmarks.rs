//! Performance benchmarks for the payroll engine.
//!
//! Measures the pure calculator across catalog sizes and the full
//! generate-payslip path through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rust_decimal::Decimal;
use uuid::Uuid;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::calculation::calculate_payroll;
use payroll_engine::config::EngineConfig;
use payroll_engine::identity::InMemoryIdentityProvider;
use payroll_engine::models::{DeductionKind, DeductionRule};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds a catalog of alternating fixed and percentage rules.
fn create_catalog(rule_count: usize) -> Vec<DeductionRule> {
    (0..rule_count)
        .map(|i| DeductionRule {
            id: Uuid::new_v4(),
            name: format!("Rule {:03}", i),
            kind: if i % 2 == 0 {
                DeductionKind::Fixed
            } else {
                DeductionKind::Percentage
            },
            amount: if i % 2 == 0 {
                Decimal::from_str("25.00").unwrap()
            } else {
                Decimal::from_str("1.5").unwrap()
            },
        })
        .collect()
}

/// Benchmark: the pure calculator across catalog sizes.
fn bench_calculator_scaling(c: &mut Criterion) {
    let base_salary = Decimal::from_str("5000").unwrap();

    let mut group = c.benchmark_group("calculator");

    for rule_count in [0, 2, 8, 32, 128].iter() {
        let rules = create_catalog(*rule_count);

        group.throughput(Throughput::Elements(*rule_count as u64));
        group.bench_with_input(
            BenchmarkId::new("rules", rule_count),
            rule_count,
            |b, _| {
                b.iter(|| {
                    let breakdown = calculate_payroll(black_box(base_salary), black_box(&rules));
                    black_box(breakdown)
                })
            },
        );
    }

    group.finish();
}

fn bench_config() -> EngineConfig {
    serde_yaml::from_str(
        r#"
server:
  bind_addr: "127.0.0.1:0"
seed:
  admin:
    name: "System Administrator"
    email: "admin@example.com"
    password: "change-me"
  departments:
    - Engineering
  deductions:
    - name: "Health Insurance"
      type: Fixed
      amount: "150.00"
    - name: "401(k) Contribution"
      type: Percentage
      amount: "5"
    - name: "Dental Insurance"
      type: Fixed
      amount: "25.00"
    - name: "Income Tax"
      type: Percentage
      amount: "10"
"#,
    )
    .expect("Failed to parse benchmark config")
}

/// Benchmark: payslip generation through the full HTTP stack.
///
/// Each iteration uses a fresh period so the uniqueness check never
/// short-circuits the write path.
fn bench_generate_payslip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let (router, admin_id, employee_id) = rt.block_on(async {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let state = AppState::bootstrap(&bench_config(), identity)
            .await
            .expect("Failed to bootstrap state");
        let admin_id = state.store.employees.list().await[0].id;
        let router = create_router(state);

        let body = serde_json::json!({
            "name": "Jordan Ames",
            "email": "jordan@example.com",
            "password": "pw",
            "department": "Engineering",
            "designation": "Engineer",
            "base_salary": "5000",
            "joining_date": "2024-03-01",
            "contract_type": "Full-time",
            "role": "employee"
        });
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/employees")
                    .header("x-actor-id", admin_id.to_string())
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let employee: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let employee_id = Uuid::parse_str(employee["id"].as_str().unwrap()).unwrap();

        (router, admin_id, employee_id)
    });

    let months = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let mut period = 0usize;

    c.bench_function("generate_payslip", |b| {
        b.to_async(&rt).iter(|| {
            let month = months[period % 12];
            let year = 2000 + (period / 12) as i32;
            period += 1;
            let body = serde_json::json!({
                "employee_id": employee_id,
                "month": month,
                "year": year
            })
            .to_string();
            let router = router.clone();
            async move {
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/payslips")
                            .header("x-actor-id", admin_id.to_string())
                            .header("Content-Type", "application/json")
                            .body(Body::from(body))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            }
        })
    });
}

criterion_group!(benches, bench_calculator_scaling, bench_generate_payslip);
criterion_main!(benches);
