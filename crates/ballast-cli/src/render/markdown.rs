//! Markdown report.

use ballast_core::types::format_pct;
use ballast_core::AllocationReport;
use ballast_ext_file::ThesisCoverage;

use super::{action_label, format_money, target_label, ADVISORY_NOTE, WITHIN_TARGETS};

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("## {title}"));
    lines.push(String::new());
}

fn bucket_summary(lines: &mut Vec<String>, report: &AllocationReport) {
    section(lines, "Bucket summary");
    lines.push("| Bucket | Actual % | Target % | Status |".to_string());
    lines.push("|---|---:|---:|---|".to_string());
    for b in &report.buckets {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            b.bucket,
            format_pct(b.actual_pct),
            target_label(b.target),
            b.status
        ));
    }

    for b in report.cap_alerts() {
        if let Some(cap) = b.cap_pct {
            lines.push(String::new());
            lines.push(format!(
                "**Alert:** {} bucket is {} which is above the cap ({}).",
                b.bucket,
                format_pct(b.actual_pct),
                format_pct(cap)
            ));
        }
    }
}

fn thesis_coverage(lines: &mut Vec<String>, coverage: &ThesisCoverage) {
    section(lines, "Thesis coverage");
    if coverage.rows.is_empty() {
        lines.push("No holdings outside Core and Cash.".to_string());
        return;
    }

    lines.push("| Symbol | Bucket | Thesis? |".to_string());
    lines.push("|---|---|---|".to_string());
    for row in &coverage.rows {
        let mark = if row.covered { "✅" } else { "⚠️ missing" };
        lines.push(format!("| {} | {} | {mark} |", row.symbol, row.bucket));
    }

    if !coverage.missing.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "**Add thesis sections for:** {}",
            coverage.missing.join(", ")
        ));
    }
}

fn position_actions(lines: &mut Vec<String>, report: &AllocationReport) {
    section(lines, "Position actions");
    lines.push("| Symbol | Bucket | Actual % | Target % | Action |".to_string());
    lines.push("|---|---|---:|---:|---|".to_string());
    for h in &report.holdings {
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            h.symbol,
            h.bucket,
            format_pct(h.weight_pct),
            target_label(h.target),
            action_label(h)
        ));
    }
}

fn priority_list(lines: &mut Vec<String>, report: &AllocationReport) {
    section(lines, "Priority list (what to do first)");
    if report.is_within_targets() {
        lines.push(format!("- {WITHIN_TARGETS}"));
        return;
    }
    lines.extend(report.actions.iter().map(|a| format!("- {}", a.description)));
}

/// Renders the full Markdown report.
pub fn render_markdown(report: &AllocationReport, coverage: &ThesisCoverage) -> String {
    let mut lines = vec![
        format!("# Portfolio Report — {}", report.strategy_name),
        String::new(),
        format!(
            "**Total portfolio value:** {}",
            format_money(report.total_market_value)
        ),
    ];

    bucket_summary(&mut lines, report);
    thesis_coverage(&mut lines, coverage);
    position_actions(&mut lines, report);
    priority_list(&mut lines, report);

    section(&mut lines, "Notes");
    lines.push(format!("- {ADVISORY_NOTE}"));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::sample_report;
    use ballast_ext_file::ThesisIndex;

    fn rendered() -> String {
        let report = sample_report();
        let coverage = ThesisIndex::parse("## NVDA\n## AAPL\n").coverage(&report.holdings);
        render_markdown(&report, &coverage)
    }

    #[test]
    fn test_header_and_total() {
        let md = rendered();
        assert!(md.starts_with("# Portfolio Report — Core and Satellite\n"));
        assert!(md.contains("**Total portfolio value:** $100,000.00"));
    }

    #[test]
    fn test_section_order() {
        let md = rendered();
        let positions: Vec<usize> = [
            "## Bucket summary",
            "## Thesis coverage",
            "## Position actions",
            "## Priority list (what to do first)",
            "## Notes",
        ]
        .iter()
        .map(|h| md.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bucket_rows_and_alert() {
        let md = rendered();
        assert!(md.contains("| Core | 50.00% | 55.00–65.00% | UNDER |"));
        assert!(md.contains("| Speculation | 11.00% | 0.00–10.00% | OVER |"));
        assert!(md.contains("| Unassigned | 14.00% | — | — |"));
        assert!(md.contains("**Alert:** Speculation bucket is 11.00% which is above the cap (10.00%)."));
    }

    #[test]
    fn test_position_rows() {
        let md = rendered();
        assert!(md.contains("| NVDA | Conviction | 14.00% | 8.00–12.00% | TRIM (concentration) |"));
        assert!(md.contains("| XYZ | Unassigned | 9.00% | — | REVIEW (not in targets) |"));
        assert!(md.contains("| VTI | Core | 42.00% | 40.00–45.00% | HOLD |"));
    }

    #[test]
    fn test_thesis_coverage() {
        let md = rendered();
        assert!(md.contains("| NVDA | Conviction | ✅ |"));
        assert!(md.contains("| RKLB | Speculation | ⚠️ missing |"));
        assert!(!md.contains("| VTI | Core | ✅ |"));
        assert!(md.contains("**Add thesis sections for:** GME, RKLB, XYZ"));
    }

    #[test]
    fn test_priority_list() {
        let md = rendered();
        let start = md.find("## Priority list").unwrap();
        let items: Vec<&str> = md[start..]
            .lines()
            .filter(|l| l.starts_with("- "))
            .take(8)
            .collect();
        assert_eq!(
            items,
            vec![
                "- Reduce concentration: NVDA is 14.00% (cap 12.00%).",
                "- Bucket Speculation is 11.00% (cap 10.00%).",
                "- Consider trimming: RKLB is 11.00% vs target 2.00–5.00%.",
                "- Consider trimming: AAPL is 11.00% vs target 7.00–10.00%.",
                "- Build Core: currently 50.00% vs target 55.00–65.00%.",
                "- Candidate to add: VXUS is 8.00% vs target 10.00–15.00%.",
                "- Review: GME is 5.00% with no configured target.",
                "- Review: XYZ is 9.00% with no configured target.",
            ]
        );
        assert!(md.trim_end().ends_with(ADVISORY_NOTE));
    }
}
