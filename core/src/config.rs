//! Calculator configuration — input ranges, defaults, currencies.
//!
//! RULE: nothing here changes engine arithmetic. The engine constants
//! (scenario table, implementation curve, degradation factor) live next to
//! the code that uses them. This file only describes what a caller should
//! offer as inputs and how it should present results.
//!
//! Monetary ranges and defaults are stored in USD and converted with the
//! selected currency's exchange rate.

use crate::{
    calculator::CalculatorInputs,
    error::{RoiError, RoiResult},
    scenario::Scenario,
    state::InputMetrics,
    types::{Money, Month},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64, step: f64, default: f64) -> Self {
        Self { min, max, step, default }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Same range with every bound multiplied by `rate`, rounded like
    /// displayed amounts.
    pub fn scaled(&self, rate: f64) -> Self {
        Self {
            min: (self.min * rate).round(),
            max: (self.max * rate).round(),
            step: (self.step * rate).round(),
            default: (self.default * rate).round(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    pub monthly_visitors: InputRange,
    pub current_cvr: InputRange,
    /// USD.
    pub aov: InputRange,
    /// USD.
    pub ad_spend: InputRange,
    pub reinvestment_percent: InputRange,
    /// USD.
    pub monthly_investment: InputRange,
    pub projection_months: InputRange,
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            monthly_visitors:     InputRange::new(1_000.0, 10_000_000.0, 1_000.0, 50_000.0),
            current_cvr:          InputRange::new(0.1, 15.0, 0.1, 2.5),
            aov:                  InputRange::new(10.0, 5_000.0, 5.0, 80.0),
            ad_spend:             InputRange::new(0.0, 1_000_000.0, 100.0, 10_000.0),
            reinvestment_percent: InputRange::new(0.0, 100.0, 5.0, 50.0),
            monthly_investment:   InputRange::new(500.0, 50_000.0, 100.0, 4_000.0),
            projection_months:    InputRange::new(6.0, 12.0, 1.0, 6.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub code: String,
    pub symbol: String,
    pub locale: String,
    /// Units of this currency per USD.
    pub exchange_rate: f64,
}

impl CurrencyConfig {
    fn new(code: &str, symbol: &str, locale: &str, exchange_rate: f64) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            locale: locale.into(),
            exchange_rate,
        }
    }

    /// Convert a USD amount into this currency, rounded to whole units.
    pub fn convert_from_usd(&self, usd: Money) -> Money {
        (usd * self.exchange_rate).round()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub input_ranges: InputRanges,
    pub currencies: Vec<CurrencyConfig>,
    pub default_currency: String,
    pub default_scenario: Scenario,
    /// ROI multiples above this (or non-finite) signal inconsistent inputs,
    /// typically a currency mismatch, and are shown as unknown.
    pub max_realistic_roi: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            input_ranges: InputRanges::default(),
            currencies: vec![
                CurrencyConfig::new("USD", "$", "en-US", 1.0),
                CurrencyConfig::new("MXN", "$", "es-MX", 17.0),
                CurrencyConfig::new("COP", "$", "es-CO", 4_000.0),
                CurrencyConfig::new("ARS", "$", "es-AR", 900.0),
                CurrencyConfig::new("CLP", "$", "es-CL", 900.0),
                CurrencyConfig::new("PEN", "S/", "es-PE", 3.7),
                CurrencyConfig::new("BRL", "R$", "pt-BR", 5.0),
            ],
            default_currency: "USD".into(),
            default_scenario: Scenario::Expected,
            max_realistic_roi: 500.0,
        }
    }
}

/// An input outside its advisory range. The engine still computes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeWarning {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside the expected range [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}

impl CalculatorConfig {
    /// Load from a JSON file. Missing sections fall back to the built-in
    /// defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(Self::from_json(&content)?)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(content: &str) -> RoiResult<Self> {
        let config: CalculatorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RoiResult<()> {
        let r = &self.input_ranges;
        let named = [
            ("monthly_visitors", r.monthly_visitors),
            ("current_cvr", r.current_cvr),
            ("aov", r.aov),
            ("ad_spend", r.ad_spend),
            ("reinvestment_percent", r.reinvestment_percent),
            ("monthly_investment", r.monthly_investment),
            ("projection_months", r.projection_months),
        ];
        for (field, range) in named {
            if range.min.is_nan() || range.max.is_nan() || range.min > range.max {
                return Err(invalid(format!("{field}: min {} > max {}", range.min, range.max)));
            }
            if !range.contains(range.default) {
                return Err(invalid(format!(
                    "{field}: default {} outside [{}, {}]",
                    range.default, range.min, range.max
                )));
            }
        }

        if self.currencies.is_empty() {
            return Err(invalid("no currencies configured".into()));
        }
        let bad_rate = self
            .currencies
            .iter()
            .find(|c| !c.exchange_rate.is_finite() || c.exchange_rate <= 0.0);
        if let Some(c) = bad_rate {
            return Err(invalid(format!(
                "currency {} has non-positive exchange rate {}",
                c.code, c.exchange_rate
            )));
        }
        self.currency(&self.default_currency)?;

        if self.max_realistic_roi.is_nan() || self.max_realistic_roi <= 0.0 {
            return Err(invalid(format!(
                "max_realistic_roi must be positive, got {}",
                self.max_realistic_roi
            )));
        }
        Ok(())
    }

    pub fn currency(&self, code: &str) -> RoiResult<&CurrencyConfig> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| RoiError::UnknownCurrency { code: code.to_string() })
    }

    pub fn default_currency(&self) -> RoiResult<&CurrencyConfig> {
        self.currency(&self.default_currency)
    }

    /// Default calculator inputs, monetary values converted into `currency`.
    pub fn default_inputs(&self, currency: &CurrencyConfig) -> CalculatorInputs {
        let r = &self.input_ranges;
        CalculatorInputs {
            metrics: InputMetrics {
                monthly_visitors: r.monthly_visitors.default,
                current_cvr: r.current_cvr.default,
                aov: currency.convert_from_usd(r.aov.default),
                ad_spend: currency.convert_from_usd(r.ad_spend.default),
            },
            scenario: self.default_scenario,
            reinvestment_percent: r.reinvestment_percent.default,
            monthly_investment: currency.convert_from_usd(r.monthly_investment.default),
            projection_months: r.projection_months.default.round() as Month,
        }
    }

    /// Inputs outside their advisory ranges, monetary bounds in `currency`.
    pub fn range_warnings(
        &self,
        inputs: &CalculatorInputs,
        currency: &CurrencyConfig,
    ) -> Vec<RangeWarning> {
        let r = &self.input_ranges;
        let rate = currency.exchange_rate;
        let checks = [
            ("monthly_visitors", inputs.metrics.monthly_visitors, r.monthly_visitors),
            ("current_cvr", inputs.metrics.current_cvr, r.current_cvr),
            ("aov", inputs.metrics.aov, r.aov.scaled(rate)),
            ("ad_spend", inputs.metrics.ad_spend, r.ad_spend.scaled(rate)),
            ("reinvestment_percent", inputs.reinvestment_percent, r.reinvestment_percent),
            ("monthly_investment", inputs.monthly_investment, r.monthly_investment.scaled(rate)),
            ("projection_months", f64::from(inputs.projection_months), r.projection_months),
        ];

        checks
            .into_iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(field, value, range)| RangeWarning {
                field,
                value,
                min: range.min,
                max: range.max,
            })
            .collect()
    }

    /// Whether an ROI multiple is believable enough to display.
    pub fn roi_is_plausible(&self, roi_multiple: f64) -> bool {
        roi_multiple.is_finite() && roi_multiple <= self.max_realistic_roi
    }
}

fn invalid(reason: String) -> RoiError {
    RoiError::InvalidConfig { reason }
}
