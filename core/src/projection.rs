//! Month-by-month projection — the heart of the engine.
//!
//! Three parallel revenue tracks per month:
//!   - current:  the unimproved baseline, constant every month
//!   - improved: CRO only (ramped scenario lift + linear ongoing bonus),
//!               traffic held at the baseline
//!   - scaled:   ramped scenario lift (NO ongoing bonus) with a share of
//!               the additional revenue reinvested into next month's ad spend
//!
//! STEP ORDER (fixed, every month):
//!   1. implementation factor for the month
//!   2. improved-track CVR and revenue
//!   3. ad-spend ratio → visitor ratio (sqrt, diminishing returns)
//!   4. CVR degradation for the extra visitors
//!   5. scaled-track revenue and additional revenue vs baseline
//!   6. reinvestment into the ad spend carried to the next month
//!
//! `generate_projection` and `simulate_scaled` both consume the same
//! `Simulator`, so the chart series and the horizon summary never diverge.

use crate::{
    ramp::{implementation_factor, FULL_RAMP_MONTH},
    scenario::Scenario,
    state::{InputMetrics, StateMetrics},
    types::{ratio_or_zero, Money, Month},
};
use serde::{Deserialize, Serialize};

/// Exponent of the CVR penalty on extra traffic: 0 = none, 0.5 = aggressive.
pub const CVR_DEGRADATION_FACTOR: f64 = 0.3;

/// Linear CVR lift per month of ongoing optimization after full ramp-up.
pub const MONTHLY_CVR_IMPROVEMENT: f64 = 0.01;

/// One simulated month, as seen by both entry points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthStep {
    pub month: Month,
    pub implementation_factor: f64,
    pub baseline_revenue: Money,
    // ── Improved track ─────────────────────────────
    pub improved_cvr: f64,
    pub improved_revenue: Money,
    // ── Scaled track ───────────────────────────────
    /// Ad spend that drove this month's traffic.
    pub ad_spend: Money,
    pub visitor_ratio: f64,
    /// Ramped CVR before degradation.
    pub ramped_cvr: f64,
    pub scaled_cvr: f64,
    pub scaled_orders: f64,
    pub scaled_revenue: Money,
    pub additional_revenue: Money,
    pub reinvestment: Money,
}

/// Final-month state plus totals over the simulated horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledMetrics {
    #[serde(flatten)]
    pub state: StateMetrics,
    pub total_revenue: Money,
    pub total_additional_revenue: Money,
    pub total_ad_spent: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDataPoint {
    pub month: Month,
    pub current: Money,
    pub improved: Money,
    pub scaled: Money,
    pub current_cumulative: Money,
    pub improved_cumulative: Money,
    pub scaled_cumulative: Money,
}

/// Linear ongoing-optimization bonus for the improved track.
/// Zero until the improvement is fully ramped in.
pub fn ongoing_improvement(month: Month) -> f64 {
    let past_ramp = i64::from(month) - FULL_RAMP_MONTH;
    if past_ramp > 0 {
        MONTHLY_CVR_IMPROVEMENT * past_ramp as f64
    } else {
        0.0
    }
}

/// Stepwise simulator. Carries the reinvested ad spend between months.
#[derive(Debug, Clone)]
pub struct Simulator {
    metrics:              InputMetrics,
    scenario:             Scenario,
    reinvestment_percent: f64,
    months:               Month,
    month:                Month,
    current_ad_spend:     Money,
}

impl Simulator {
    pub fn new(
        metrics: &InputMetrics,
        scenario: Scenario,
        reinvestment_percent: f64,
        months: Month,
    ) -> Self {
        Self {
            metrics: *metrics,
            scenario,
            reinvestment_percent,
            months,
            month: 0,
            current_ad_spend: metrics.ad_spend,
        }
    }

    /// Ad spend that will drive the next month.
    pub fn current_ad_spend(&self) -> Money {
        self.current_ad_spend
    }

    /// Advance one month. This is the core recurrence.
    pub fn step(&mut self) -> MonthStep {
        self.month += 1;
        let month = self.month;
        let m = &self.metrics;

        let impl_factor = implementation_factor(i64::from(month));
        let base_improvement = self.scenario.improvement() * impl_factor;
        let baseline_revenue = m.baseline_revenue();

        // Improved: CRO only, traffic unchanged.
        let improved_cvr =
            m.current_cvr * (1.0 + base_improvement + ongoing_improvement(month));
        let improved_revenue = m.monthly_visitors * (improved_cvr / 100.0) * m.aov;

        // Scaled: no spend baseline means no scaling distortion.
        let ad_spend_ratio = if m.ad_spend > 0.0 {
            (self.current_ad_spend / m.ad_spend).max(0.0)
        } else {
            1.0
        };
        let visitor_ratio = ad_spend_ratio.sqrt();
        let scaled_visitors = m.monthly_visitors * visitor_ratio;

        let cvr_degradation = if visitor_ratio > 0.0 {
            visitor_ratio.powf(-CVR_DEGRADATION_FACTOR)
        } else {
            0.0
        };
        let ramped_cvr = m.current_cvr * (1.0 + base_improvement);
        let scaled_cvr = ramped_cvr * cvr_degradation;

        let scaled_orders = scaled_visitors * (scaled_cvr / 100.0);
        let scaled_revenue = scaled_orders * m.aov;
        let additional_revenue = scaled_revenue - baseline_revenue;

        // Without a spend baseline there is nothing to scale, so nothing is
        // reinvested either.
        let ad_spend = self.current_ad_spend;
        let reinvestment = if m.ad_spend > 0.0 {
            additional_revenue * (self.reinvestment_percent / 100.0)
        } else {
            0.0
        };
        self.current_ad_spend += reinvestment;

        log::debug!(
            "month={month} {}: impl={impl_factor:.2} spend={ad_spend:.0} visitors_x={visitor_ratio:.3} \
             improved={improved_revenue:.0} scaled={scaled_revenue:.0} reinvest={reinvestment:.0}",
            self.scenario,
        );

        MonthStep {
            month,
            implementation_factor: impl_factor,
            baseline_revenue,
            improved_cvr,
            improved_revenue,
            ad_spend,
            visitor_ratio,
            ramped_cvr,
            scaled_cvr,
            scaled_orders,
            scaled_revenue,
            additional_revenue,
            reinvestment,
        }
    }
}

impl Iterator for Simulator {
    type Item = MonthStep;

    fn next(&mut self) -> Option<MonthStep> {
        (self.month < self.months).then(|| self.step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.months.saturating_sub(self.month) as usize;
        (left, Some(left))
    }
}

/// Per-month series for charting; index 0 is month 1.
pub fn generate_projection(
    metrics: &InputMetrics,
    scenario: Scenario,
    reinvestment_percent: f64,
    months: Month,
) -> Vec<ProjectionDataPoint> {
    let mut current_cumulative = 0.0;
    let mut improved_cumulative = 0.0;
    let mut scaled_cumulative = 0.0;

    Simulator::new(metrics, scenario, reinvestment_percent, months)
        .map(|step| {
            current_cumulative += step.baseline_revenue;
            improved_cumulative += step.improved_revenue;
            scaled_cumulative += step.scaled_revenue;

            ProjectionDataPoint {
                month: step.month,
                current: step.baseline_revenue,
                improved: step.improved_revenue,
                scaled: step.scaled_revenue,
                current_cumulative,
                improved_cumulative,
                scaled_cumulative,
            }
        })
        .collect()
}

/// Scaled-track summary: the final month's state plus horizon totals.
pub fn simulate_scaled(
    metrics: &InputMetrics,
    scenario: Scenario,
    reinvestment_percent: f64,
    months: Month,
) -> ScaledMetrics {
    let mut sim = Simulator::new(metrics, scenario, reinvestment_percent, months);

    let mut total_revenue = 0.0;
    let mut total_additional_revenue = 0.0;
    let mut total_ad_spent = 0.0;
    let mut last: Option<MonthStep> = None;

    for step in sim.by_ref() {
        total_revenue += step.scaled_revenue;
        total_additional_revenue += step.additional_revenue;
        total_ad_spent += step.ad_spend;
        last = Some(step);
    }

    let (cvr, orders, revenue) = match last {
        Some(step) => (step.ramped_cvr, step.scaled_orders, step.scaled_revenue),
        None => (metrics.current_cvr, 0.0, 0.0),
    };

    ScaledMetrics {
        state: StateMetrics {
            cvr,
            orders,
            revenue,
            roas: ratio_or_zero(total_revenue, total_ad_spent),
            cpa: ratio_or_zero(sim.current_ad_spend(), orders),
            rps: ratio_or_zero(revenue, metrics.monthly_visitors),
        },
        total_revenue,
        total_additional_revenue,
        total_ad_spent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InputMetrics {
        InputMetrics {
            monthly_visitors: 50_000.0,
            current_cvr: 2.5,
            aov: 80.0,
            ad_spend: 10_000.0,
        }
    }

    #[test]
    fn ongoing_bonus_starts_after_full_ramp() {
        assert_eq!(ongoing_improvement(1), 0.0);
        assert_eq!(ongoing_improvement(3), 0.0);
        assert!((ongoing_improvement(4) - 0.01).abs() < 1e-12);
        assert!((ongoing_improvement(12) - 0.09).abs() < 1e-12);
    }

    #[test]
    fn simulator_yields_exactly_the_horizon() {
        let sim = Simulator::new(&store(), Scenario::Expected, 50.0, 6);
        assert_eq!(sim.size_hint(), (6, Some(6)));
        let months: Vec<Month> = sim.map(|s| s.month).collect();
        assert_eq!(months, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn no_reinvestment_keeps_spend_flat() {
        let mut sim = Simulator::new(&store(), Scenario::Optimistic, 0.0, 12);
        for step in sim.by_ref() {
            assert_eq!(step.ad_spend, 10_000.0);
            assert_eq!(step.visitor_ratio, 1.0);
        }
        assert_eq!(sim.current_ad_spend(), 10_000.0);
    }

    #[test]
    fn reinvestment_carries_into_next_month() {
        let mut sim = Simulator::new(&store(), Scenario::Expected, 50.0, 2);
        let first = sim.step();
        let second = sim.step();
        assert!((second.ad_spend - (10_000.0 + first.reinvestment)).abs() < 1e-9);
        assert!(second.visitor_ratio > 1.0);
    }

    #[test]
    fn zero_baseline_spend_reinvests_nothing() {
        let store = InputMetrics { ad_spend: 0.0, ..store() };
        let mut sim = Simulator::new(&store, Scenario::Optimistic, 100.0, 12);
        for step in sim.by_ref() {
            assert!(step.additional_revenue > 0.0);
            assert_eq!(step.reinvestment, 0.0);
            assert_eq!(step.visitor_ratio, 1.0);
        }
        assert_eq!(sim.current_ad_spend(), 0.0);
    }

    #[test]
    fn zero_months_is_empty() {
        assert!(generate_projection(&store(), Scenario::Expected, 50.0, 0).is_empty());
        let scaled = simulate_scaled(&store(), Scenario::Expected, 50.0, 0);
        assert_eq!(scaled.state.cvr, 2.5);
        assert_eq!(scaled.total_revenue, 0.0);
        assert_eq!(scaled.state.roas, 0.0);
    }
}
