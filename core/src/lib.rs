//! Mortgage payment calculator core.
//!
//! Validates loan input, computes the monthly payment of a fixed-rate
//! amortizing loan, and keeps an append-only history of calculations in
//! a local SQLite database.

pub mod calculator;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod format;
pub mod store;
pub mod types;
pub mod validation;
