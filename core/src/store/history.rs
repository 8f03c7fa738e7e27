use chrono::NaiveDate;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use super::HistoryStore;
use crate::{
    error::{MortgageError, MortgageResult},
    event::HistoryEvent,
    types::{Money, RecordId},
};

/// calcDate is stored as ISO-8601 text.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted snapshot of one past calculation. Read-only once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: RecordId,
    pub loan_amount: Money,
    pub result: Money,
    pub calc_date: NaiveDate,
}

/// A row as SQLite hands it back; the columns are nullable.
struct StoredRow {
    id: RecordId,
    loan_amount: Option<f64>,
    result: Option<f64>,
    calc_date: Option<String>,
}

impl StoredRow {
    fn into_record(self) -> MortgageResult<HistoryRecord> {
        let id = self.id;
        let invalid = |detail: String| MortgageError::InvalidRecord { id, detail };

        let loan_amount = self
            .loan_amount
            .ok_or_else(|| invalid("loanAmount is NULL".into()))?;
        let result = self.result.ok_or_else(|| invalid("result is NULL".into()))?;
        let text = self
            .calc_date
            .ok_or_else(|| invalid("calcDate is NULL".into()))?;
        let calc_date = NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map_err(|e| invalid(format!("calcDate {text:?}: {e}")))?;

        Ok(HistoryRecord {
            id,
            loan_amount,
            result,
            calc_date,
        })
    }
}

impl HistoryStore {
    // ── Calculations ──────────────────────────────────────────────

    /// Insert one record dated today and tell subscribers about it.
    pub fn append(&self, loan_amount: Money, result: Money) -> MortgageResult<HistoryRecord> {
        let calc_date = self.clock.today();
        self.conn.execute(
            "INSERT INTO calculations (loanAmount, result, calcDate) VALUES (?1, ?2, ?3)",
            params![loan_amount, result, calc_date.format(DATE_FORMAT).to_string()],
        )?;
        let record = HistoryRecord {
            id: self.conn.last_insert_rowid(),
            loan_amount,
            result,
            calc_date,
        };
        log::debug!(
            "history: appended record {} (amount={loan_amount}, result={result})",
            record.id
        );

        self.notify(HistoryEvent::RecordAppended {
            record: record.clone(),
        });
        Ok(record)
    }

    /// All records, newest first.
    pub fn list_all(&self) -> MortgageResult<Vec<HistoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, loanAmount, result, calcDate
             FROM calculations
             ORDER BY id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredRow {
                    id: row.get(0)?,
                    loan_amount: row.get(1)?,
                    result: row.get(2)?,
                    calc_date: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(StoredRow::into_record).collect()
    }

    pub fn count(&self) -> MortgageResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM calculations", [], |row| row.get(0))?;
        Ok(n)
    }
}
