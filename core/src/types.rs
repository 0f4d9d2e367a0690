//! Shared primitive types used across the entire engine.

/// A simulated month. Months are 1-indexed; month 1 is the first month
/// after the optimization work starts.
pub type Month = u32;

/// A monetary amount in whatever single currency unit the caller chose.
/// The engine never mixes units within one call.
pub type Money = f64;

/// Divide, returning 0 when either side would make the result NaN or
/// infinite. All ratio metrics go through this.
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_yields_zero() {
        assert_eq!(ratio_or_zero(10.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(0.0, 0.0), 0.0);
    }

    #[test]
    fn positive_denominator_divides() {
        assert_eq!(ratio_or_zero(10.0, 4.0), 2.5);
    }
}
