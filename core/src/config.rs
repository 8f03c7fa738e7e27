//! Calculator configuration: validation limits and display settings.
//!
//! Loaded from a JSON file (see `data/calculator.json`). Missing keys
//! fall back to the defaults below, which match the shipped file.

use serde::{Deserialize, Serialize};

/// Ceiling for `max_rate_percent`, in whole percent.
pub const RATE_PERCENT_LIMIT: f64 = 100.0;

/// Ceiling for `max_term_years`.
pub const TERM_YEARS_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Smallest accepted loan amount, inclusive.
    pub min_amount: f64,
    /// Largest accepted annual rate in whole percent, inclusive.
    /// A rate of zero is always rejected.
    pub max_rate_percent: f64,
    /// Longest accepted term in years, inclusive.
    pub max_term_years: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_amount: 50_000.0,
            max_rate_percent: 100.0,
            max_term_years: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub validation: ValidationRules,
    pub display: DisplayConfig,
}

impl CalculatorConfig {
    /// Load from a JSON file.
    /// In tests, use CalculatorConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Bad config {path}: {e}"))?;
        log::debug!("Loaded calculator config from {path}");
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> anyhow::Result<()> {
        let rules = &self.validation;
        if !rules.min_amount.is_finite() || rules.min_amount < 0.0 {
            anyhow::bail!("min_amount must be a non-negative number, got {}", rules.min_amount);
        }
        if !(rules.max_rate_percent > 0.0 && rules.max_rate_percent <= RATE_PERCENT_LIMIT) {
            anyhow::bail!(
                "max_rate_percent must be in (0, {RATE_PERCENT_LIMIT}], got {}",
                rules.max_rate_percent
            );
        }
        if rules.max_term_years == 0 || rules.max_term_years > TERM_YEARS_LIMIT {
            anyhow::bail!(
                "max_term_years must be in 1..={TERM_YEARS_LIMIT}, got {}",
                rules.max_term_years
            );
        }
        Ok(())
    }
}
