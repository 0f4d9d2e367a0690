//! Worked examples with hand-computed expected values.
//!
//! Standard store: 50,000 visitors, 2.5% CVR, $80 AOV, $10,000 ad spend.

use roi_core::{
    projection::generate_projection,
    qualification::{qualification_tier, QualificationTier},
    roi::compute_roi,
    scenario::Scenario,
    state::{compute_current_state, compute_improved_state, InputMetrics},
};

fn standard_store() -> InputMetrics {
    InputMetrics {
        monthly_visitors: 50_000.0,
        current_cvr: 2.5,
        aov: 80.0,
        ad_spend: 10_000.0,
    }
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn current_state_for_standard_store() {
    let s = compute_current_state(&standard_store());

    assert_close(s.cvr, 2.5, "cvr");
    assert_close(s.orders, 1_250.0, "orders");      // 50,000 × 2.5%
    assert_close(s.revenue, 100_000.0, "revenue");  // 1,250 × $80
    assert_close(s.roas, 10.0, "roas");             // $100,000 / $10,000
    assert_close(s.cpa, 8.0, "cpa");                // $10,000 / 1,250
    assert_close(s.rps, 2.0, "rps");                // $100,000 / 50,000
}

#[test]
fn expected_scenario_improved_state() {
    let s = compute_improved_state(&standard_store(), Scenario::Expected);

    assert_close(s.cvr, 3.125, "cvr");
    assert_close(s.orders, 1_562.5, "orders");
    assert_close(s.revenue, 125_000.0, "revenue");
    assert_close(s.roas, 12.5, "roas");
    assert_close(s.cpa, 6.4, "cpa");
    assert_close(s.rps, 2.5, "rps");
}

#[test]
fn conservative_and_optimistic_improved_revenue() {
    let store = standard_store();
    assert_close(
        compute_improved_state(&store, Scenario::Conservative).revenue,
        115_000.0,
        "conservative revenue",
    );
    assert_close(
        compute_improved_state(&store, Scenario::Optimistic).revenue,
        140_000.0,
        "optimistic revenue",
    );
}

#[test]
fn improved_track_ramps_in_over_three_months() {
    let projection = generate_projection(&standard_store(), Scenario::Expected, 0.0, 6);

    assert_eq!(projection.len(), 6);
    assert_close(projection[0].improved, 106_250.0, "month 1 (25% of +25%)");
    assert_close(projection[1].improved, 115_000.0, "month 2 (60% of +25%)");
    assert_close(projection[2].improved, 125_000.0, "month 3 (full ramp)");

    let full = compute_improved_state(&standard_store(), Scenario::Expected);
    assert_eq!(projection[2].improved, full.revenue);
}

#[test]
fn payback_inside_first_month() {
    let projection = generate_projection(&standard_store(), Scenario::Expected, 0.0, 6);
    assert_close(projection[0].improved - projection[0].current, 6_250.0, "month 1 additional");

    let roi = compute_roi(3_000.0, 6, 128_750.0, &projection);
    assert_close(roi.payback_months, 0.48, "payback"); // 3,000 / 6,250
}

#[test]
fn zero_ad_spend_guards_ratios() {
    let store = InputMetrics { ad_spend: 0.0, ..standard_store() };
    let s = compute_current_state(&store);

    assert_eq!(s.roas, 0.0);
    assert_eq!(s.cpa, 0.0);
    assert_close(s.revenue, 100_000.0, "revenue unaffected");
}

#[test]
fn qualification_boundary() {
    assert_eq!(qualification_tier(79_999.0), QualificationTier::OneTime);
    assert_eq!(qualification_tier(80_000.0), QualificationTier::Recurring);
    assert_eq!(qualification_tier(100_000.0), QualificationTier::Recurring);
}
