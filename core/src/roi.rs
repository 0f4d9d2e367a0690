//! ROI and payback for a recurring optimization investment.
//!
//! Payback is curve-aware: it walks the projection series month by month,
//! so the slow implementation ramp delays payback instead of being averaged
//! away.

use crate::{
    projection::ProjectionDataPoint,
    types::{ratio_or_zero, Money, Month},
};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiMetrics {
    pub total_investment: Money,
    pub total_additional_revenue: Money,
    pub roi_multiple: f64,
    pub roi_percent: f64,
    /// Elapsed months until cumulative additional revenue covers the
    /// investment paid to date. `f64::INFINITY` when it never does within
    /// the series; serialized as `null` in that case.
    #[serde(serialize_with = "serialize_payback", deserialize_with = "deserialize_payback")]
    pub payback_months: f64,
}

impl RoiMetrics {
    pub fn pays_back(&self) -> bool {
        self.payback_months.is_finite()
    }
}

pub fn compute_roi(
    monthly_investment: Money,
    months: Month,
    total_additional_revenue: Money,
    projection: &[ProjectionDataPoint],
) -> RoiMetrics {
    let total_investment = monthly_investment * f64::from(months);
    let roi_multiple = ratio_or_zero(total_additional_revenue, total_investment);

    RoiMetrics {
        total_investment,
        total_additional_revenue,
        roi_multiple,
        roi_percent: roi_multiple * 100.0,
        payback_months: payback_months(monthly_investment, total_investment, projection),
    }
}

/// First point where Σ(improved − current) covers the fees paid so far,
/// interpolated within that month. Month 1 covers (0, 1].
///
/// Fees accrue `monthly_investment` per month up to `total_investment`.
/// Only a month with positive additional revenue can pay back, so a flat
/// or declining series never does, whatever the investment.
pub fn payback_months(
    monthly_investment: Money,
    total_investment: Money,
    projection: &[ProjectionDataPoint],
) -> f64 {
    let mut accumulated = 0.0;

    for (index, point) in projection.iter().enumerate() {
        let month_additional = point.improved - point.current;
        let before = accumulated;
        accumulated += month_additional;

        let paid = (monthly_investment * (index + 1) as f64).min(total_investment);
        if month_additional > 0.0 && accumulated >= paid {
            let fraction = ((paid - before) / month_additional).max(0.0);
            return index as f64 + fraction;
        }
    }

    f64::INFINITY
}

/// Percentage change from `original` to `updated`.
/// A zero original reports 100 for any gain and 0 otherwise.
pub fn percent_change(original: f64, updated: f64) -> f64 {
    if original == 0.0 {
        return if updated > 0.0 { 100.0 } else { 0.0 };
    }
    (updated - original) / original * 100.0
}

fn serialize_payback<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

fn deserialize_payback<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::INFINITY))
}
