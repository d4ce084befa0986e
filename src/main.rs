//! Credit Ledger CLI
//!
//! Records credit and debit requests from a CSV file against limit-bounded
//! accounts.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv > accounts.csv
//! cargo run -- --accounts accounts.csv --strategy sync requests.csv
//! cargo run -- --report statements requests.csv > statements.json
//! RUST_LOG=info cargo run -- --log-format json --batch-size 2000 requests.csv
//! ```
//!
//! The report goes to stdout, logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success (rejected requests do not change the exit code)
//! - 1: Error (file not found, invalid accounts file, write failure, etc.)

use credit_ledger::cli::{self, CliArgs, ReportFormat, StrategyType};
use credit_ledger::io::{read_accounts_csv, write_accounts_csv, write_statements_json};
use credit_ledger::types::{Account, LedgerError};
use credit_ledger::{logging, strategy, LedgerEngine};
use std::process;
use tracing::error;

fn run(args: &CliArgs) -> Result<(), LedgerError> {
    let accounts = match &args.accounts {
        Some(path) => read_accounts_csv(path)?,
        None => Account::defaults(),
    };
    let engine = LedgerEngine::with_accounts(accounts)?;

    let config = match args.strategy {
        StrategyType::Async => Some(args.to_batch_config()),
        StrategyType::Sync => None,
    };
    let strategy = strategy::create_strategy(args.strategy, config);
    strategy.process(&engine, &args.input_file)?;

    let mut output = std::io::stdout().lock();
    match args.report {
        ReportFormat::Accounts => write_accounts_csv(&engine.accounts(), &mut output),
        ReportFormat::Statements => write_statements_json(&engine.statements(), &mut output),
    }
}

fn main() {
    let args = cli::parse_args();
    logging::init(args.log_format);

    if let Err(e) = run(&args) {
        error!(error = %e, "Fatal error");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
