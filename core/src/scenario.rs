//! Improvement scenarios and their CVR multipliers.
//!
//! RULE: the multiplier table is fixed at build time. Adding a scenario
//! means adding a variant here; every `match` below must stay exhaustive.

use crate::error::RoiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Conservative, // +15% CVR
    #[default]
    Expected,     // +25% CVR
    Optimistic,   // +40% CVR
}

impl Scenario {
    /// Every scenario, in display order.
    pub const ALL: [Scenario; 3] = [Self::Conservative, Self::Expected, Self::Optimistic];

    /// CVR multiplier applied once the improvement is fully ramped in.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Conservative => 1.15,
            Self::Expected     => 1.25,
            Self::Optimistic   => 1.40,
        }
    }

    /// Fractional lift at full ramp-up (0.25 for `Expected`).
    pub fn improvement(&self) -> f64 {
        self.multiplier() - 1.0
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Expected     => "expected",
            Self::Optimistic   => "optimistic",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = RoiError;

    /// Unknown keys are a caller bug, never silently defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RoiError::UnknownScenario { key: s.to_string() })
    }
}
