//! Implementation curve — how fast a CVR improvement phases in.
//!
//!   month ≤ 0 → 0.00
//!   month 1   → 0.25
//!   month 2   → 0.60
//!   month ≥ 3 → 1.00
//!
//! Monotonically non-decreasing and capped at 1.0.

/// Ramp-up fractions for the months before full effect, indexed from month 1.
pub const IMPLEMENTATION_CURVE: [f64; 2] = [0.25, 0.60];

/// First month at which the improvement is fully in effect.
pub const FULL_RAMP_MONTH: i64 = 3;

/// Fraction of the scenario improvement active in `month`.
/// Total over all integers.
pub fn implementation_factor(month: i64) -> f64 {
    if month <= 0 {
        return 0.0;
    }
    if month >= FULL_RAMP_MONTH {
        return 1.0;
    }
    IMPLEMENTATION_CURVE[(month - 1) as usize]
}
