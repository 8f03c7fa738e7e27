//! The calculation engine: what a "Calculate" press does.
//!
//! ORDER (fixed):
//!   1. Validate the raw form input. A failure stops here: no write.
//!   2. Compute and format the monthly payment.
//!   3. Ensure the schema, then append the record to history.
//!
//! A save failure does not discard the result. The caller gets the
//! computed result plus the save outcome and decides what to show.

use std::sync::mpsc::Receiver;

use crate::{
    calculator::{calculate, CalculationResult},
    config::CalculatorConfig,
    error::MortgageResult,
    event::HistoryEvent,
    store::{HistoryRecord, HistoryStore},
    validation::{validate, RawLoanInput, ValidationError},
};

/// Shown to the user when a calculation could not be written to history.
pub const SAVE_FAILED_MESSAGE: &str = "Error while saving calculation";

/// Outcome of a submission that passed validation.
#[derive(Debug)]
pub struct Submission {
    pub result: CalculationResult,
    pub saved: MortgageResult<HistoryRecord>,
}

impl Submission {
    pub fn record(&self) -> Option<&HistoryRecord> {
        self.saved.as_ref().ok()
    }

    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }
}

pub struct MortgageEngine {
    config: CalculatorConfig,
    store: HistoryStore,
}

impl MortgageEngine {
    pub fn new(config: CalculatorConfig, store: HistoryStore) -> Self {
        Self { config, store }
    }

    /// Build an engine whose store is ready to read.
    /// Call this on app start instead of new().
    pub fn build(config: CalculatorConfig, store: HistoryStore) -> MortgageResult<Self> {
        store.ensure_schema()?;
        Ok(Self::new(config, store))
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn submit(&self, raw: &RawLoanInput) -> Result<Submission, ValidationError> {
        let input = validate(raw, &self.config.validation).inspect_err(|e| {
            log::info!("calculation rejected: {e}");
        })?;

        let result = calculate(&input, &self.config.display);
        log::debug!(
            "calculated {} for {} at {} over {}",
            result.formatted_payment,
            result.formatted_amount,
            result.formatted_rate,
            result.formatted_term
        );

        let saved = self.save(&result);
        if let Err(e) = &saved {
            log::warn!("history: failed to save calculation: {e}");
        }
        Ok(Submission { result, saved })
    }

    fn save(&self, result: &CalculationResult) -> MortgageResult<HistoryRecord> {
        self.store.ensure_schema()?;
        self.store.append(result.input.amount, result.monthly_payment)
    }

    /// All history, newest first.
    pub fn history(&self) -> MortgageResult<Vec<HistoryRecord>> {
        self.store.list_all()
    }

    pub fn subscribe(&self) -> Receiver<HistoryEvent> {
        self.store.subscribe()
    }
}
