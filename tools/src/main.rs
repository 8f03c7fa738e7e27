//! mortgage-runner: headless driver for the mortgage calculator.
//!
//! Stands in for the input and results screens.
//!
//! Usage:
//!   mortgage-runner --amount 300000 --rate 6 --term 30 --db history.db
//!   mortgage-runner --history --db history.db
//!   mortgage-runner --ipc-mode --db history.db --config data/calculator.json

use anyhow::Result;
use mortgage_core::{
    calculator::CalculationResult,
    config::CalculatorConfig,
    engine::{MortgageEngine, SAVE_FAILED_MESSAGE},
    event::HistoryEvent,
    format::format_currency,
    store::{HistoryRecord, HistoryStore},
    validation::RawLoanInput,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Calculate(RawLoanInput),
    History,
    Quit,
}

/// What the results screen shows.
#[derive(serde::Serialize)]
struct ScreenState {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    save_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history_error: Option<String>,
    history: Vec<HistoryRow>,
}

/// One line of the history list, formatted for display.
#[derive(serde::Serialize)]
struct HistoryRow {
    id: i64,
    date: String,
    amount: String,
    result: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let history_only = args.iter().any(|a| a == "--history");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");

    let config = match flag_value(&args, "--config") {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    let store = if db == ":memory:" {
        HistoryStore::in_memory()?
    } else {
        HistoryStore::open(db)?
    };
    let engine = MortgageEngine::build(config, store)?;

    if ipc_mode {
        run_ipc_loop(&engine)
    } else if history_only {
        print_history(&engine, &engine.history()?)
    } else {
        let raw = RawLoanInput::new(
            flag_value(&args, "--amount").unwrap_or_default(),
            flag_value(&args, "--rate").unwrap_or_default(),
            flag_value(&args, "--term").unwrap_or_default(),
        );
        run_once(&engine, &raw)
    }
}

fn run_once(engine: &MortgageEngine, raw: &RawLoanInput) -> Result<()> {
    let submission = match engine.submit(raw) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.user_message(engine.config()));
            std::process::exit(2);
        }
    };

    let r = &submission.result;
    println!("=== RESULTS ===");
    println!("  Loan Amount:            {}", r.formatted_amount);
    println!("  Interest Rate:          {}", r.formatted_rate);
    println!("  Length of Loan:         {}", r.formatted_term);
    println!("  Monthly Payment Amount: {}", r.formatted_payment);
    if !submission.is_saved() {
        println!("  ({SAVE_FAILED_MESSAGE})");
    }
    println!();
    match engine.history() {
        Ok(records) => print_history(engine, &records),
        Err(e) => {
            log::warn!("history: failed to load: {e}");
            println!("  ({HISTORY_FAILED_MESSAGE})");
            Ok(())
        }
    }
}

/// Shown when the history list cannot be read back from the store.
const HISTORY_FAILED_MESSAGE: &str = "Error while loading history";

/// Line-delimited JSON on stdin/stdout.
fn run_ipc_loop(engine: &MortgageEngine) -> Result<()> {
    let mut session = IpcSession::new(engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match session.handle_line(&buffer)? {
            Some(reply) => writeln!(stdout, "{reply}")?,
            None => break,
        }
        stdout.flush()?;
    }
    Ok(())
}

/// One IPC conversation. The history list is cached and re-read only when
/// the store reports a change. A failed read keeps the last good list,
/// reports `history_error`, and is retried on the next command.
struct IpcSession<'a> {
    engine: &'a MortgageEngine,
    changes: Receiver<HistoryEvent>,
    history: Vec<HistoryRecord>,
    stale: bool,
}

impl<'a> IpcSession<'a> {
    fn new(engine: &'a MortgageEngine) -> Self {
        Self {
            engine,
            changes: engine.subscribe(),
            history: Vec::new(),
            stale: true,
        }
    }

    /// Reply for one input line, or None on `quit`.
    fn handle_line(&mut self, line: &str) -> Result<Option<String>> {
        let cmd: IpcCommand = match serde_json::from_str(line) {
            Ok(c) => c,
            Err(e) => return Ok(Some(error_reply(&e.to_string()))),
        };

        let (result, save_error) = match cmd {
            IpcCommand::Quit => return Ok(None),
            IpcCommand::History => (None, None),
            IpcCommand::Calculate(raw) => match self.engine.submit(&raw) {
                Ok(submission) => {
                    let save_error = submission
                        .saved
                        .is_err()
                        .then(|| SAVE_FAILED_MESSAGE.to_string());
                    (Some(submission.result), save_error)
                }
                Err(e) => {
                    return Ok(Some(error_reply(&e.user_message(self.engine.config()))));
                }
            },
        };

        let state = ScreenState {
            result,
            save_error,
            history_error: self.refresh_history(),
            history: history_rows(self.engine, &self.history),
        };
        Ok(Some(serde_json::to_string(&state)?))
    }

    fn refresh_history(&mut self) -> Option<String> {
        if self.changes.try_iter().count() > 0 {
            self.stale = true;
        }
        if !self.stale {
            return None;
        }
        match self.engine.history() {
            Ok(records) => {
                self.history = records;
                self.stale = false;
                None
            }
            Err(e) => {
                log::warn!("history: failed to load: {e}");
                Some(HISTORY_FAILED_MESSAGE.to_string())
            }
        }
    }
}

fn error_reply(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn history_rows(engine: &MortgageEngine, records: &[HistoryRecord]) -> Vec<HistoryRow> {
    let symbol = &engine.config().display.currency_symbol;
    records
        .iter()
        .map(|r| HistoryRow {
            id: r.id,
            date: r.calc_date.format("%-m/%-d/%Y").to_string(),
            amount: format_currency(r.loan_amount, symbol),
            result: format_currency(r.result, symbol),
        })
        .collect()
}

fn print_history(engine: &MortgageEngine, records: &[HistoryRecord]) -> Result<()> {
    println!("=== CALCULATION HISTORY ({}) ===", engine.store().count()?);
    if records.is_empty() {
        println!("  (no history)");
        return Ok(());
    }
    println!("  {:<12} {:>16} {:>14}", "Date", "Amount", "Result");
    for row in history_rows(engine, records) {
        println!("  {:<12} {:>16} {:>14}", row.date, row.amount, row.result);
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
