use crate::config::{BankConfig, LogConfig};
use crate::demo::DemoConfig;
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Walk through the card bank scenario: accounts, cards, and guarded balance operations
#[derive(Parser, Debug)]
#[command(name = "card-bank")]
#[command(about = "Run the card bank walkthrough", long_about = None)]
pub struct CliArgs {
    /// Simulated processing time of each balance operation, in milliseconds
    #[arg(
        long = "delay-ms",
        value_name = "MILLIS",
        default_value_t = 2000,
        help = "Simulated processing time per balance operation (default: 2000)"
    )]
    pub delay_ms: u64,

    /// Cumulative withdrawal amount above which a warning is emitted
    #[arg(
        long = "withdraw-notify-limit",
        value_name = "AMOUNT",
        default_value = "50",
        help = "Withdrawal total that triggers a warning (default: 50)"
    )]
    pub withdraw_notify_limit: Decimal,

    /// Number of cards registered on the demo account
    #[arg(
        long = "cards",
        value_name = "COUNT",
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(2..=5),
        help = "Cards to register on the demo account (2-5, default: 3)"
    )]
    pub cards: u8,

    /// Default log filter (RUST_LOG takes precedence)
    #[arg(long = "log-level", value_name = "FILTER", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long = "json-logs")]
    pub json_logs: bool,

    /// Also append logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write accounts.csv and cards.csv into this directory when done
    #[arg(long = "snapshot-dir", value_name = "DIR")]
    pub snapshot_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Create a BankConfig from CLI arguments
    pub fn to_bank_config(&self) -> BankConfig {
        BankConfig::from_millis(self.delay_ms)
    }

    /// Create a LogConfig from CLI arguments
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            json: self.json_logs,
            file: self.log_file.clone(),
        }
    }

    /// Create the demo scenario parameters from CLI arguments
    pub fn to_demo_config(&self) -> DemoConfig {
        DemoConfig {
            withdraw_notify_limit: self.withdraw_notify_limit,
            cards: self.cards as usize,
            ..DemoConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();

        assert_eq!(parsed.delay_ms, 2000);
        assert_eq!(parsed.withdraw_notify_limit, dec!(50));
        assert_eq!(parsed.cards, 3);
        assert_eq!(parsed.to_bank_config(), BankConfig::default());
        assert_eq!(parsed.to_log_config(), LogConfig::default());
        assert!(parsed.snapshot_dir.is_none());
    }

    #[rstest]
    #[case::delay(&["program", "--delay-ms", "10"], Duration::from_millis(10))]
    #[case::zero_delay(&["program", "--delay-ms", "0"], Duration::ZERO)]
    fn test_bank_config_conversion(#[case] args: &[&str], #[case] expected: Duration) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_bank_config().processing_delay, expected);
    }

    #[test]
    fn test_log_config_conversion() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--log-level",
            "debug",
            "--json-logs",
            "--log-file",
            "bank.log",
        ])
        .unwrap();

        let config = parsed.to_log_config();

        assert_eq!(config.level, "debug");
        assert!(config.json);
        assert_eq!(config.file, Some(PathBuf::from("bank.log")));
    }

    #[test]
    fn test_demo_config_conversion() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--withdraw-notify-limit",
            "100.5",
            "--cards",
            "2",
        ])
        .unwrap();

        let config = parsed.to_demo_config();

        assert_eq!(config.withdraw_notify_limit, dec!(100.5));
        assert_eq!(config.cards, 2);
    }

    #[rstest]
    #[case::negative_delay(&["program", "--delay-ms", "-1"])]
    #[case::bad_limit(&["program", "--withdraw-notify-limit", "lots"])]
    #[case::bad_cards(&["program", "--cards", "three"])]
    #[case::too_few_cards(&["program", "--cards", "1"])]
    #[case::too_many_cards(&["program", "--cards", "6"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
