//! Terminal tables.

use colored::Colorize;
use tabled::Tabled;

use ballast_core::types::format_pct;
use ballast_core::{ActionItem, AllocationReport, BucketSummary, EvaluatedHolding};
use ballast_ext_file::ThesisCoverage;

use super::{action_label, format_money, target_label, ADVISORY_NOTE, WITHIN_TARGETS};
use crate::output::{table_string, KeyValue};

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Actual %")]
    actual: String,
    #[tabled(rename = "Target %")]
    target: String,
    #[tabled(rename = "Cap %")]
    cap: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&BucketSummary> for BucketRow {
    fn from(b: &BucketSummary) -> Self {
        Self {
            bucket: b.bucket.clone(),
            actual: format_pct(b.actual_pct),
            target: target_label(b.target),
            cap: b.cap_pct.map_or_else(|| "—".to_string(), format_pct),
            status: b.status.label().to_string(),
        }
    }
}

#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Actual %")]
    actual: String,
    #[tabled(rename = "Target %")]
    target: String,
    #[tabled(rename = "Action")]
    action: String,
}

impl From<&EvaluatedHolding> for HoldingRow {
    fn from(h: &EvaluatedHolding) -> Self {
        Self {
            symbol: h.symbol.clone(),
            bucket: h.bucket.clone(),
            value: format_money(h.market_value),
            actual: format_pct(h.weight_pct),
            target: target_label(h.target),
            action: action_label(h).to_string(),
        }
    }
}

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Tier")]
    tier: u8,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Recommendation")]
    description: String,
}

fn action_rows(actions: &[ActionItem]) -> Vec<ActionRow> {
    actions
        .iter()
        .enumerate()
        .map(|(i, a)| ActionRow {
            rank: i + 1,
            tier: a.severity.tier(),
            kind: a.severity.label().to_string(),
            description: a.description.clone(),
        })
        .collect()
}

#[derive(Tabled)]
struct CoverageRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Thesis?")]
    thesis: String,
}

fn title(text: &str) -> String {
    format!("{}\n", text.bold().underline())
}

/// Renders the report as a sequence of tables.
pub fn render_tables(report: &AllocationReport, coverage: &ThesisCoverage) -> String {
    let mut out = Vec::new();

    out.push(title(&format!("Portfolio Report — {}", report.strategy_name)));
    out.push(table_string(&[
        KeyValue::new("Total portfolio value", format_money(report.total_market_value)),
        KeyValue::new("Holdings", report.holdings.len().to_string()),
        KeyValue::new(
            "Flagged buckets",
            report
                .buckets
                .iter()
                .filter(|b| b.status.is_flagged())
                .count()
                .to_string(),
        ),
    ]));

    out.push(title("Buckets"));
    let buckets: Vec<BucketRow> = report.buckets.iter().map(BucketRow::from).collect();
    out.push(table_string(&buckets));

    out.push(title("Positions"));
    let holdings: Vec<HoldingRow> = report.holdings.iter().map(HoldingRow::from).collect();
    out.push(table_string(&holdings));

    out.push(title("Thesis coverage"));
    if coverage.rows.is_empty() {
        out.push("No holdings outside Core and Cash.".to_string());
    } else {
        let rows: Vec<CoverageRow> = coverage
            .rows
            .iter()
            .map(|r| CoverageRow {
                symbol: r.symbol.clone(),
                bucket: r.bucket.clone(),
                thesis: (if r.covered { "✅" } else { "⚠️ missing" }).to_string(),
            })
            .collect();
        out.push(table_string(&rows));
    }

    out.push(title("Priority list"));
    if report.is_within_targets() {
        out.push(WITHIN_TARGETS.to_string());
    } else {
        out.push(table_string(&action_rows(&report.actions)));
    }

    out.push(ADVISORY_NOTE.dimmed().to_string());

    let mut text = out.join("\n\n");
    text.push('\n');
    text
}
