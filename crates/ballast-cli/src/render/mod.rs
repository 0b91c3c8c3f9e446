//! Report rendering.

pub mod markdown;
pub mod table;

use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};

use ballast_core::{AllocationReport, EvaluatedHolding, PctRange, PositionAction};
use ballast_ext_file::ThesisCoverage;

use crate::cli::OutputFormat;

/// Closing line of every report.
pub const ADVISORY_NOTE: &str =
    "This report is decision support, not an instruction to trade. You control execution and timing.";

/// Shown instead of a priority list when nothing needs attention.
pub const WITHIN_TARGETS: &str =
    "Portfolio is within target ranges. Maintain contributions and review monthly.";

/// Renders a report in the requested format.
pub fn render(
    report: &AllocationReport,
    coverage: &ThesisCoverage,
    format: OutputFormat,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Markdown => markdown::render_markdown(report, coverage),
        OutputFormat::Table => table::render_tables(report, coverage),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
    })
}

/// Formats a money amount as `$1,234.56`.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac_part}")
}

/// Target column text; `—` for untargeted holdings and buckets.
pub fn target_label(target: Option<PctRange>) -> String {
    target.map_or_else(|| "—".to_string(), |range| range.to_string())
}

/// Action column text for a holding.
///
/// Unconfigured holdings always read as review, even above the cap; their
/// concentration shows up in the priority list instead.
pub fn action_label(holding: &EvaluatedHolding) -> &'static str {
    if holding.cap_breach && holding.is_targeted() {
        return "TRIM (concentration)";
    }
    match holding.action {
        PositionAction::Review => "REVIEW (not in targets)",
        action => action.label(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ballast_core::AllocationStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(100000)), "$100,000.00");
        assert_eq!(format_money(dec!(1234.565)), "$1,234.57");
        assert_eq!(format_money(dec!(999.9)), "$999.90");
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(-1500)), "-$1,500.00");
    }

    #[test]
    fn test_labels() {
        let report = fixtures::sample_report();
        assert_eq!(action_label(report.holding("NVDA").unwrap()), "TRIM (concentration)");
        assert_eq!(action_label(report.holding("XYZ").unwrap()), "REVIEW (not in targets)");
        assert_eq!(action_label(report.holding("VTI").unwrap()), "HOLD");
        assert_eq!(action_label(report.holding("VXUS").unwrap()), "ADD");
        assert_eq!(target_label(None), "—");
        assert_eq!(target_label(report.holding("AAPL").unwrap().target), "7.00–10.00%");
    }

    #[test]
    fn test_unconfigured_over_cap_label() {
        let holding = EvaluatedHolding {
            symbol: "XYZ".to_string(),
            market_value: dec!(60_000),
            bucket: "Unassigned".to_string(),
            weight_pct: dec!(60),
            target: None,
            status: AllocationStatus::Untargeted,
            action: PositionAction::Review,
            cap_breach: true,
        };
        assert_eq!(action_label(&holding), "REVIEW (not in targets)");
    }
}
