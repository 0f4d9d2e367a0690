//! Same inputs, same bits.
//!
//! The engine holds no state between calls. Two evaluations of identical
//! inputs must serialize to identical reports, and interleaving unrelated
//! calls must not disturb either.

use roi_core::{
    calculator::{evaluate, CalculatorInputs},
    projection::simulate_scaled,
    scenario::Scenario,
    state::InputMetrics,
};

fn inputs(scenario: Scenario, reinvestment_percent: f64) -> CalculatorInputs {
    CalculatorInputs {
        metrics: InputMetrics {
            monthly_visitors: 120_000.0,
            current_cvr: 1.8,
            aov: 65.0,
            ad_spend: 25_000.0,
        },
        scenario,
        reinvestment_percent,
        monthly_investment: 4_000.0,
        projection_months: 12,
    }
}

#[test]
fn identical_inputs_produce_identical_reports() {
    let _ = env_logger::builder().is_test(true).try_init();

    let a = serde_json::to_string(&evaluate(&inputs(Scenario::Optimistic, 75.0))).unwrap();

    // Unrelated work in between must not leak into the next call.
    for scenario in Scenario::ALL {
        evaluate(&inputs(scenario, 10.0));
    }

    let b = serde_json::to_string(&evaluate(&inputs(Scenario::Optimistic, 75.0))).unwrap();
    assert_eq!(a, b, "Report diverged between identical runs");
}

#[test]
fn scaled_summary_is_bit_for_bit_reproducible() {
    let metrics = inputs(Scenario::Expected, 50.0).metrics;
    let first = simulate_scaled(&metrics, Scenario::Expected, 50.0, 12);
    let second = simulate_scaled(&metrics, Scenario::Expected, 50.0, 12);

    assert_eq!(first.total_revenue.to_bits(), second.total_revenue.to_bits());
    assert_eq!(
        first.total_additional_revenue.to_bits(),
        second.total_additional_revenue.to_bits()
    );
    assert_eq!(first.total_ad_spent.to_bits(), second.total_ad_spent.to_bits());
    assert_eq!(first.state.cpa.to_bits(), second.state.cpa.to_bits());
}

#[test]
fn parallel_callers_agree() {
    let expected = evaluate(&inputs(Scenario::Conservative, 40.0));

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| evaluate(&inputs(Scenario::Conservative, 40.0))))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
