//! Calculator façade — every figure a presentation layer shows, in one call.
//!
//! Consumers hand over plain numbers in a single currency unit and get back
//! a `CalculatorReport`. Formatting, currency symbols and localisation stay
//! with the consumer.

use crate::{
    projection::{generate_projection, simulate_scaled, ProjectionDataPoint, ScaledMetrics},
    qualification::{qualification_tier, QualificationTier},
    roi::{compute_roi, RoiMetrics},
    scenario::Scenario,
    state::{compute_current_state, compute_improved_state, InputMetrics, StateMetrics},
    types::{Money, Month},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    #[serde(flatten)]
    pub metrics: InputMetrics,
    pub scenario: Scenario,
    /// Share of additional revenue put back into ad spend, 0–100.
    pub reinvestment_percent: f64,
    /// Monthly cost of the optimization service.
    pub monthly_investment: Money,
    pub projection_months: Month,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorReport {
    pub inputs: CalculatorInputs,
    pub current_state: StateMetrics,
    pub improved_state: StateMetrics,
    pub scaled_state: ScaledMetrics,
    pub projection: Vec<ProjectionDataPoint>,
    pub roi: RoiMetrics,
    pub qualification_tier: QualificationTier,
    // ── Aggregates ─────────────────────────────────
    /// Improved minus current revenue once fully ramped in.
    pub additional_monthly_revenue: Money,
    /// Σ(improved − current) over the series, ramp-up included.
    pub total_additional_revenue: Money,
    pub total_current_revenue: Money,
    /// Full improved revenue × months, ignoring the ramp.
    pub total_improved_revenue: Money,
    /// Scaled-track total revenue minus the unimproved baseline total.
    pub incremental_revenue: Money,
}

/// Run the whole engine for one set of inputs.
pub fn evaluate(inputs: &CalculatorInputs) -> CalculatorReport {
    let metrics = &inputs.metrics;
    let months = inputs.projection_months;

    let current_state = compute_current_state(metrics);
    let improved_state = compute_improved_state(metrics, inputs.scenario);
    let scaled_state =
        simulate_scaled(metrics, inputs.scenario, inputs.reinvestment_percent, months);
    let projection =
        generate_projection(metrics, inputs.scenario, inputs.reinvestment_percent, months);

    // ROI credits only the CRO-driven lift, not reinvestment-driven growth.
    let total_additional_revenue: Money =
        projection.iter().map(|p| p.improved - p.current).sum();
    let roi = compute_roi(
        inputs.monthly_investment,
        months,
        total_additional_revenue,
        &projection,
    );

    let horizon = f64::from(months);
    let total_current_revenue = current_state.revenue * horizon;
    let total_improved_revenue = improved_state.revenue * horizon;
    let incremental_revenue = scaled_state.total_revenue - total_current_revenue;

    log::debug!(
        "evaluate {} over {months}mo: additional=${total_additional_revenue:.0} \
         roi={:.2}x payback={:.2}mo scaled_total=${:.0}",
        inputs.scenario,
        roi.roi_multiple,
        roi.payback_months,
        scaled_state.total_revenue,
    );

    CalculatorReport {
        inputs: *inputs,
        current_state,
        improved_state,
        scaled_state,
        projection,
        roi,
        qualification_tier: qualification_tier(metrics.monthly_visitors),
        additional_monthly_revenue: improved_state.revenue - current_state.revenue,
        total_additional_revenue,
        total_current_revenue,
        total_improved_revenue,
        incremental_revenue,
    }
}
