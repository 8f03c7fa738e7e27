//! Monthly payment calculation for a fixed-rate amortizing loan.
//!
//!   i       = (annual_rate_percent / 100) / 12
//!   n       = term_years * 12
//!   payment = amount * (i * (1+i)^n) / ((1+i)^n - 1)
//!
//! Evaluated as `amount * i / (1 - (1+i)^-n)`. For rates up to 100% the
//! factor is below 1, so any finite amount gives a finite payment.
//!
//! A zero rate makes the denominator vanish; it is special-cased to
//! `amount / n`.

use serde::{Deserialize, Serialize};

use crate::{
    config::DisplayConfig,
    format::{format_currency, format_percent, format_term},
    types::Money,
};

/// Monthly rates below this are treated as interest-free.
const ZERO_RATE_EPSILON: f64 = 1e-12;

/// Validated loan terms. Build through `validation::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub amount: Money,
    /// Whole percent: 5.0 means 5%.
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl LoanInput {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    pub fn payment_count(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }
}

/// One finished calculation. Display strings are produced once, here,
/// and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub input: LoanInput,
    pub monthly_payment: Money,
    pub formatted_amount: String,
    pub formatted_rate: String,
    pub formatted_term: String,
    pub formatted_payment: String,
}

pub fn compute_monthly_payment(input: &LoanInput) -> Money {
    let i = input.monthly_rate();
    let n = input.payment_count();
    if i.abs() < ZERO_RATE_EPSILON {
        return input.amount / f64::from(n);
    }
    let discount = (1.0 + i).powf(-f64::from(n));
    input.amount * (i / (1.0 - discount))
}

pub fn format(input: &LoanInput, payment: Money, display: &DisplayConfig) -> CalculationResult {
    let symbol = display.currency_symbol.as_str();
    CalculationResult {
        input: *input,
        monthly_payment: payment,
        formatted_amount: format_currency(input.amount, symbol),
        formatted_rate: format_percent(input.annual_rate_percent),
        formatted_term: format_term(input.term_years),
        formatted_payment: format_currency(payment, symbol),
    }
}

/// Compute and format in one step.
pub fn calculate(input: &LoanInput, display: &DisplayConfig) -> CalculationResult {
    format(input, compute_monthly_payment(input), display)
}
