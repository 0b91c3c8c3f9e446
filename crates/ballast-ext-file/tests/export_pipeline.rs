//! End-to-end: positions export on disk through normalization to an engine report.

use std::io::Write;

use ballast_config::LoadedTargets;
use ballast_core::{evaluate_portfolio, PositionAction, UNASSIGNED_BUCKET};
use ballast_ext_file::{load_holdings, load_thesis, FileError};
use rust_decimal_macros::dec;

const EXPORT: &str = "\u{feff}Positions for All Accounts
Downloaded 10/18/2026

Symbol,Quantity,Last,$ Chg,% Chg,Bid,Ask,Volume,$ Avg Cost,$ Day G/L,% Day G/L,$ Total G/L,% Total G/L,Value,Basis,Day Range,52W Range,Earnings Date,Div Amt,Div Ex-Date
VTI,200,$210.00,+$1.10,+0.52%,$209.90,$210.10,\"3,100,000\",$180.00,+$220.00,+0.52%,\"+$6,000.00\",+16.67%,\"$42,000.00\",\"$36,000.00\",--,--,--,$3.50,--
SPAXX**,,,,,,,,,,,,,\"$8,000.00\",,,,,,
AAPL,50,$230.00,,,,,,,,,,,\"$11,500.00\",,,,,,
NVDA,100,$140.00,,,,,,,,,,,--,,,,,,
FDRXX**,,,,,,,,,,,,,\"$4,000.00\",,,,,,
GME,100,$20.00,,,,,,,,,,,\"$2,000.00\",,,,,,
BRKB,50,$440.00,,,,,,,,,,,\"$22,000.00\",,,,,,
Pending Activity,,,,,,,,,,,,,\"-$1,500.00\",,,,,,

Totals,,,,,,,,,,,,,\"$103,500.00\",,,,,,
\"Both are Fidelity Investments companies and members SIPC, NYSE.\"
The data and information in this spreadsheet is provided to you solely for your use
";

const TARGETS: &str = r#"{
    "strategy_name": "Core and Conviction",
    "buckets": {
        "Core": { "target_total_pct": [55, 70], "positions": { "VTI": [40, 45], "BRK.B": [15, 25] } },
        "Conviction": { "target_total_pct": [20, 30], "positions": { "AAPL": [7, 10], "NVDA": [8, 12] } },
        "Cash": { "target_total_pct": [5, 15], "positions": { "CASH": [5, 15] } }
    },
    "hard_caps": { "single_position_pct": 12 },
    "alias_map": { "BRKB": "BRK.B" },
    "cash_symbols": ["SPAXX**", "FDRXX**"]
}"#;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_export_to_report() {
    let csv = write_temp(".csv", EXPORT);
    let loaded = LoadedTargets::from_json_str(TARGETS).unwrap();

    let holdings = load_holdings(csv.path(), &loaded.normalizer).unwrap();
    let symbols: Vec<_> = holdings.holdings().iter().map(|h| h.symbol.as_str()).collect();
    // The pending debit has no position of its own and is dropped.
    assert_eq!(symbols, vec!["VTI", "CASH", "AAPL", "NVDA", "GME", "BRK.B"]);
    assert_eq!(holdings.get("CASH").unwrap().market_value, dec!(12000));
    assert_eq!(holdings.get("NVDA").unwrap().market_value, dec!(14000));
    assert_eq!(holdings.total_market_value().unwrap(), dec!(103500));

    let report = evaluate_portfolio(&holdings, &loaded.targets).unwrap();
    assert_eq!(report.strategy_name, "Core and Conviction");

    // 14,000 / 103,500 = 13.53%, above the 12% cap.
    let nvda = report.holding("NVDA").unwrap();
    assert!(nvda.cap_breach);
    assert_eq!(nvda.action, PositionAction::Trim);

    let gme = report.holding("GME").unwrap();
    assert_eq!(gme.bucket, UNASSIGNED_BUCKET);
    assert_eq!(gme.action, PositionAction::Review);

    assert_eq!(report.actions.first().unwrap().symbol(), "NVDA");
    assert_eq!(report.actions.last().unwrap().symbol(), "GME");
}

#[test]
fn test_export_without_header() {
    let csv = write_temp(".csv", "Account Summary\nBalance,100\n");
    let err = load_holdings(csv.path(), &Default::default()).unwrap_err();
    assert!(matches!(err, FileError::HeaderNotFound));
}

#[test]
fn test_missing_export() {
    let err = load_holdings("/definitely/not/here.csv", &Default::default()).unwrap_err();
    assert!(matches!(err, FileError::Io { .. }));
}

#[test]
fn test_thesis_coverage_against_report() {
    let csv = write_temp(".csv", EXPORT);
    let thesis = write_temp(".md", "# Theses\n\n## NVDA\nData center demand.\n");
    let loaded = LoadedTargets::from_json_str(TARGETS).unwrap();

    let holdings = load_holdings(csv.path(), &loaded.normalizer).unwrap();
    let report = evaluate_portfolio(&holdings, &loaded.targets).unwrap();
    let coverage = load_thesis(thesis.path()).unwrap().coverage(&report.holdings);

    let checked: Vec<_> = coverage.rows.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(checked, vec!["NVDA", "AAPL", "GME"]);
    assert_eq!(coverage.missing, vec!["AAPL", "GME"]);
}
