//! End-to-end integration tests
//!
//! These tests validate the complete pipeline using CSV test fixtures. Each
//! test:
//! 1. Provisions accounts from accounts.csv, or the defaults when absent
//! 2. Processes input.csv with the selected strategy
//! 3. Writes the accounts report
//! 4. Compares it with expected.csv
//!
//! Each fixture runs once with the synchronous strategy and once with the
//! async strategy.

#[cfg(test)]
mod tests {
    use credit_ledger::cli::StrategyType;
    use credit_ledger::io::{read_accounts_csv, write_accounts_csv, write_statements_json};
    use credit_ledger::strategy::{create_strategy, BatchConfig, ProcessingSummary};
    use credit_ledger::types::{Account, Direction};
    use credit_ledger::LedgerEngine;
    use rstest::rstest;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;

    fn engine_for(fixture_dir: &str) -> LedgerEngine {
        let accounts_path = format!("{}/accounts.csv", fixture_dir);
        let accounts = if Path::new(&accounts_path).exists() {
            read_accounts_csv(Path::new(&accounts_path))
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", accounts_path, e))
        } else {
            Account::defaults()
        };
        LedgerEngine::with_accounts(accounts).expect("Failed to provision accounts")
    }

    fn process_fixture(
        fixture_name: &str,
        strategy_type: StrategyType,
    ) -> (LedgerEngine, ProcessingSummary) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let engine = engine_for(&fixture_dir);
        // A small batch size makes the async run span several batches
        let strategy = create_strategy(strategy_type, Some(BatchConfig::new(2, 4)));
        let summary = strategy
            .process(&engine, Path::new(&input_path))
            .unwrap_or_else(|e| panic!("Failed to process requests: {}", e));

        (engine, summary)
    }

    /// Run a fixture and compare the accounts report with expected.csv
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType) -> ProcessingSummary {
        let expected_path = format!("tests/fixtures/{}/expected.csv", fixture_name);
        let (engine, summary) = process_fixture(fixture_name, strategy_type);

        let mut output = Vec::new();
        write_accounts_csv(&engine.accounts(), &mut output).expect("Failed to write report");
        let actual_output = String::from_utf8(output).expect("Report is not UTF-8");

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );

        summary
    }

    #[rstest]
    #[case("happy_path", 5, 0)]
    #[case("insufficient_limit", 3, 4)]
    #[case("invalid_input", 2, 6)]
    #[case("unknown_account", 1, 3)]
    #[case("custom_accounts", 3, 3)]
    #[case("malformed_data", 2, 6)]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] accepted: usize,
        #[case] rejected: usize,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let summary = run_test_fixture(fixture, strategy);

        assert_eq!(
            summary,
            ProcessingSummary { accepted, rejected },
            "Summary mismatch for fixture: {} (strategy: {:?})",
            fixture,
            strategy
        );
    }

    #[rstest]
    fn test_statement_lists_newest_first(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let (engine, _) = process_fixture("happy_path", strategy);

        let statement = engine.statement(1).unwrap();
        assert_eq!(statement.balance, 750);
        assert_eq!(statement.limit, 100_000);
        let descriptions: Vec<_> = statement
            .transactions
            .iter()
            .map(|entry| entry.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["coffee", "salary"]);
        assert_eq!(statement.transactions[0].direction, Direction::Debit);
        assert!(statement.transactions[0].committed_at >= statement.transactions[1].committed_at);
    }

    #[test]
    fn test_statements_report_is_json_array_sorted_by_account() {
        let (engine, _) = process_fixture("custom_accounts", StrategyType::Sync);

        let mut output = Vec::new();
        write_statements_json(&engine.statements(), &mut output).unwrap();
        let report: Value = serde_json::from_slice(&output).unwrap();

        let report = report.as_array().expect("Report is not an array");
        assert_eq!(report.len(), 2);
        assert_eq!(report[0]["account_id"], 7);
        assert_eq!(report[0]["balance"], -500);
        assert_eq!(report[1]["account_id"], 8);
        assert_eq!(report[1]["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(report[1]["transactions"][0]["direction"], "debit");
        assert_eq!(report[1]["transactions"][1]["direction"], "credit");
    }
}
