//! State calculator — point-in-time metrics from a store snapshot.
//!
//! Current state = multiplier 1.0. Improved state = the scenario's
//! multiplier at full ramp-up. No error cases: every ratio is guarded and
//! a zero denominator yields 0.

use crate::{
    scenario::Scenario,
    types::{ratio_or_zero, Money},
};
use serde::{Deserialize, Serialize};

/// Caller-supplied store metrics for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputMetrics {
    pub monthly_visitors: f64,
    /// Conversion rate as a percentage: 2.5 means 2.5%.
    pub current_cvr: f64,
    pub aov: Money,
    pub ad_spend: Money,
}

impl InputMetrics {
    /// Baseline monthly revenue with no improvement applied.
    pub fn baseline_revenue(&self) -> Money {
        self.monthly_visitors * (self.current_cvr / 100.0) * self.aov
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateMetrics {
    pub cvr: f64,
    pub orders: f64,
    pub revenue: Money,
    /// Revenue ÷ ad spend.
    pub roas: f64,
    /// Ad spend ÷ orders.
    pub cpa: Money,
    /// Revenue ÷ visitors.
    pub rps: Money,
}

/// Metrics for `metrics` with its CVR scaled by `cvr_multiplier`.
pub fn compute_state(metrics: &InputMetrics, cvr_multiplier: f64) -> StateMetrics {
    let cvr = metrics.current_cvr * cvr_multiplier;
    let orders = metrics.monthly_visitors * (cvr / 100.0);
    let revenue = orders * metrics.aov;

    StateMetrics {
        cvr,
        orders,
        revenue,
        roas: ratio_or_zero(revenue, metrics.ad_spend),
        cpa: ratio_or_zero(metrics.ad_spend, orders),
        rps: ratio_or_zero(revenue, metrics.monthly_visitors),
    }
}

pub fn compute_current_state(metrics: &InputMetrics) -> StateMetrics {
    compute_state(metrics, 1.0)
}

/// Metrics once `scenario` is fully in effect.
pub fn compute_improved_state(metrics: &InputMetrics, scenario: Scenario) -> StateMetrics {
    apply_scenario(metrics, scenario)
}

pub fn apply_scenario(metrics: &InputMetrics, scenario: Scenario) -> StateMetrics {
    compute_state(metrics, scenario.multiplier())
}
