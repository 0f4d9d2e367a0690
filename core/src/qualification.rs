//! Service tier qualification by traffic volume.

use serde::{Deserialize, Serialize};

/// Monthly visitors at or above which a store qualifies for the recurring tier.
pub const QUALIFICATION_THRESHOLD: f64 = 80_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum QualificationTier {
    Recurring,
    OneTime,
}

impl QualificationTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recurring => "recurring",
            Self::OneTime   => "oneTime",
        }
    }
}

pub fn qualification_tier(monthly_visitors: f64) -> QualificationTier {
    if monthly_visitors >= QUALIFICATION_THRESHOLD {
        QualificationTier::Recurring
    } else {
        QualificationTier::OneTime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive_on_the_high_side() {
        assert_eq!(qualification_tier(79_999.0), QualificationTier::OneTime);
        assert_eq!(qualification_tier(80_000.0), QualificationTier::Recurring);
        assert_eq!(qualification_tier(0.0), QualificationTier::OneTime);
    }

    #[test]
    fn serialized_names() {
        assert_eq!(serde_json::to_string(&QualificationTier::OneTime).unwrap(), "\"oneTime\"");
        assert_eq!(QualificationTier::Recurring.as_str(), "recurring");
    }
}
