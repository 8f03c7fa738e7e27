//! "Store changed" notifications.
//!
//! Views that show history subscribe to the store and re-query when an
//! event arrives, instead of polling or being forced to re-render.

use serde::{Deserialize, Serialize};

use crate::store::HistoryRecord;

/// Variants are added over time, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEvent {
    RecordAppended { record: HistoryRecord },
}
