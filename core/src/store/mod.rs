//! SQLite persistence for calculation history.
//!
//! RULE: Only the store talks to the database.
//! The engine calls store methods — it never executes SQL directly.
//!
//! A store is an explicitly constructed value owned by whoever builds the
//! engine. There is no process-wide handle.

mod history;

pub use history::HistoryRecord;

use std::{
    cell::RefCell,
    sync::mpsc::{self, Receiver, Sender},
};

use rusqlite::Connection;

use crate::{
    clock::{Clock, SystemClock},
    error::MortgageResult,
    event::HistoryEvent,
};

pub struct HistoryStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
    clock: Box<dyn Clock>,
    listeners: RefCell<Vec<Sender<HistoryEvent>>>,
}

impl HistoryStore {
    /// Open (or create) the history database at `path`.
    pub fn open(path: &str) -> MortgageResult<Self> {
        let conn = Connection::open(path)?;
        let mode: String =
            conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        log::debug!("Opened history store {path} (journal_mode={mode})");
        Ok(Self::from_connection(conn, Some(path.to_string())))
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> MortgageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn, None))
    }

    fn from_connection(conn: Connection, path: Option<String>) -> Self {
        Self {
            conn,
            path,
            clock: Box::new(SystemClock),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Replace the date source used to stamp new records.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Create the calculations table if absent. Safe to call on every start.
    pub fn ensure_schema(&self) -> MortgageResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_calculations.sql"))?;
        Ok(())
    }

    /// Register for change notifications. Dropping the receiver
    /// unsubscribes on the next append.
    pub fn subscribe(&self) -> Receiver<HistoryEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.borrow_mut().push(tx);
        rx
    }

    fn notify(&self, event: HistoryEvent) {
        self.listeners
            .borrow_mut()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
