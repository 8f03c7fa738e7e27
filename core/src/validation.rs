//! Input validation for the three loan fields.
//!
//! Checks run top to bottom: amount, rate, term. `validate` stops at the
//! first failure so the user sees one message at a time; `validate_all`
//! reports every failure in the same order.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{
    calculator::LoanInput,
    config::{CalculatorConfig, ValidationRules},
    format::{format_percent, format_whole_currency},
};

/// The three form fields, as typed. JSON callers may send numbers;
/// they are kept as their text form and parsed like typed input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLoanInput {
    #[serde(default, deserialize_with = "text_or_number")]
    pub amount: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub rate: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub term: String,
}

impl RawLoanInput {
    pub fn new(
        amount: impl Into<String>,
        rate: impl Into<String>,
        term: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            rate: rate.into(),
            term: term.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    Rate,
    Term,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Rate => "rate",
            Field::Term => "term",
        }
    }

    /// Label shown next to the input on the form.
    pub fn label(self) -> &'static str {
        match self {
            Field::Amount => "Loan Amount",
            Field::Rate => "Interest Rate",
            Field::Term => "Loan Length",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    NotNumeric,
    BelowMinimum,
    OutOfRange,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} is not numeric", .0.name())]
    NotNumeric(Field),

    #[error("{} is below the minimum", .0.name())]
    BelowMinimum(Field),

    #[error("{} is out of range", .0.name())]
    OutOfRange(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match *self {
            Self::NotNumeric(f) | Self::BelowMinimum(f) | Self::OutOfRange(f) => f,
        }
    }

    pub fn reason(&self) -> Reason {
        match self {
            Self::NotNumeric(_) => Reason::NotNumeric,
            Self::BelowMinimum(_) => Reason::BelowMinimum,
            Self::OutOfRange(_) => Reason::OutOfRange,
        }
    }

    /// The message shown to the user for this failure, with limits taken
    /// from `config`.
    pub fn user_message(&self, config: &CalculatorConfig) -> String {
        let rules = &config.validation;
        let label = self.field().label();
        match *self {
            Self::NotNumeric(Field::Amount) => format!("{label} must be only numeric characters"),
            Self::NotNumeric(Field::Rate) => format!("{label} must be a number"),
            Self::NotNumeric(Field::Term) => format!("{label} must be a whole number"),
            Self::BelowMinimum(Field::Amount) => format!(
                "{label} must be at least {}",
                format_whole_currency(rules.min_amount, &config.display.currency_symbol)
            ),
            Self::OutOfRange(Field::Rate) => format!(
                "{label} must be greater than 0% and less than or equal to {}",
                format_percent(rules.max_rate_percent)
            ),
            Self::OutOfRange(Field::Term) => format!(
                "{label} must be greater than 0 and less than or equal to {} years",
                rules.max_term_years
            ),
            // Not produced by the checks below; amount has no upper
            // bound and rate/term have no separate minimum.
            Self::OutOfRange(Field::Amount)
            | Self::BelowMinimum(Field::Rate)
            | Self::BelowMinimum(Field::Term) => format!("{label} is out of range"),
        }
    }
}

/// Validate raw form input, stopping at the first failed rule.
pub fn validate(raw: &RawLoanInput, rules: &ValidationRules) -> Result<LoanInput, ValidationError> {
    let amount = check_amount(&raw.amount, rules)?;
    let annual_rate_percent = check_rate(&raw.rate, rules)?;
    let term_years = check_term(&raw.term, rules)?;
    Ok(LoanInput {
        amount,
        annual_rate_percent,
        term_years,
    })
}

/// Every failed rule, in form order. Empty means `validate` succeeds.
pub fn validate_all(raw: &RawLoanInput, rules: &ValidationRules) -> Vec<ValidationError> {
    [
        check_amount(&raw.amount, rules).err(),
        check_rate(&raw.rate, rules).err(),
        check_term(&raw.term, rules).err(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn check_amount(text: &str, rules: &ValidationRules) -> Result<f64, ValidationError> {
    let amount = parse_number(text).ok_or(ValidationError::NotNumeric(Field::Amount))?;
    if amount < rules.min_amount {
        return Err(ValidationError::BelowMinimum(Field::Amount));
    }
    Ok(amount)
}

fn check_rate(text: &str, rules: &ValidationRules) -> Result<f64, ValidationError> {
    let rate = parse_number(text).ok_or(ValidationError::NotNumeric(Field::Rate))?;
    if rate <= 0.0 || rate > rules.max_rate_percent {
        return Err(ValidationError::OutOfRange(Field::Rate));
    }
    Ok(rate)
}

fn check_term(text: &str, rules: &ValidationRules) -> Result<u32, ValidationError> {
    let term = parse_number(text)
        .filter(|t| t.fract() == 0.0)
        .ok_or(ValidationError::NotNumeric(Field::Term))?;
    if term <= 0.0 || term > f64::from(rules.max_term_years) {
        return Err(ValidationError::OutOfRange(Field::Term));
    }
    // In (0, max_term_years] and whole, so the cast is exact.
    Ok(term as u32)
}

/// Trimmed text as a finite number. Blank text, NaN and infinities are
/// not numeric.
fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected text or a number, got {other}"
        ))),
    }
}
