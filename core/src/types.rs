//! Shared primitive types used across the calculator core.

/// Store-assigned identifier of a history record. Grows with every insert.
pub type RecordId = i64;

/// An amount of money in display currency units.
pub type Money = f64;
