//! End-to-end: raw form input through validation, calculation and history.

use chrono::NaiveDate;
use mortgage_core::{
    clock::FixedClock,
    config::CalculatorConfig,
    engine::MortgageEngine,
    event::HistoryEvent,
    store::HistoryStore,
    validation::{Field, RawLoanInput, ValidationError},
};

fn build() -> MortgageEngine {
    let store = HistoryStore::in_memory()
        .expect("in-memory store")
        .with_clock(FixedClock::new(NaiveDate::from_ymd_opt(2023, 3, 12).unwrap()));
    MortgageEngine::build(CalculatorConfig::default(), store).expect("build engine")
}

#[test]
fn successful_submission_is_saved() {
    let engine = build();
    let submission = engine
        .submit(&RawLoanInput::new("300000", "6", "30"))
        .unwrap();

    assert_eq!(submission.result.formatted_payment, "$1,798.65");
    assert!(submission.is_saved());

    let record = submission.record().unwrap().clone();
    assert_eq!(record.loan_amount, 300_000.0);
    assert_eq!(record.result, submission.result.monthly_payment);

    assert_eq!(engine.history().unwrap(), vec![record]);
}

#[test]
fn rejected_submission_writes_nothing() {
    let engine = build();
    let rx = engine.subscribe();

    let err = engine
        .submit(&RawLoanInput::new("40000", "5", "30"))
        .unwrap_err();
    assert_eq!(err, ValidationError::BelowMinimum(Field::Amount));

    assert!(engine.history().unwrap().is_empty());
    assert!(rx.try_recv().is_err(), "no write, no notification");
}

#[test]
fn history_is_newest_first_across_submissions() {
    let engine = build();
    for amount in ["100000", "200000", "300000"] {
        engine.submit(&RawLoanInput::new(amount, "5", "30")).unwrap();
    }

    let amounts: Vec<f64> = engine
        .history()
        .unwrap()
        .iter()
        .map(|r| r.loan_amount)
        .collect();
    assert_eq!(amounts, vec![300_000.0, 200_000.0, 100_000.0]);
}

#[test]
fn subscriber_is_told_to_refetch() {
    let engine = build();
    let rx = engine.subscribe();

    let submission = engine
        .submit(&RawLoanInput::new("150000", "4", "15"))
        .unwrap();

    let events: Vec<HistoryEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![HistoryEvent::RecordAppended {
            record: submission.record().unwrap().clone()
        }]
    );
}

/// A table that refuses inserts: the result is still returned, the save
/// failure is reported alongside it.
#[test]
fn save_failure_keeps_the_result() {
    let path = std::env::temp_dir().join(format!("mortgage-save-fail-{}.db", std::process::id()));
    let path = path.to_str().unwrap().to_string();
    let _ = std::fs::remove_file(&path);

    let raw = rusqlite::Connection::open(&path).unwrap();
    raw.execute_batch(
        "CREATE TABLE calculations (
             id INTEGER PRIMARY KEY,
             loanAmount REAL CHECK (loanAmount < 0),
             result REAL,
             calcDate TEXT
         );",
    )
    .unwrap();
    drop(raw);

    let store = HistoryStore::open(&path).unwrap();
    let engine = MortgageEngine::build(CalculatorConfig::default(), store).unwrap();

    let submission = engine
        .submit(&RawLoanInput::new("300000", "6", "30"))
        .unwrap();
    assert_eq!(submission.result.formatted_payment, "$1,798.65");
    assert!(!submission.is_saved());
    let err = submission.saved.as_ref().unwrap_err();
    assert!(err.is_persistence(), "expected a database error, got {err}");
    assert!(engine.history().unwrap().is_empty());

    drop(engine);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{path}{suffix}"));
    }
}

#[test]
fn zero_rate_is_rejected_before_calculation() {
    let engine = build();
    let err = engine
        .submit(&RawLoanInput::new("120000", "0", "10"))
        .unwrap_err();
    assert_eq!(err, ValidationError::OutOfRange(Field::Rate));
}
