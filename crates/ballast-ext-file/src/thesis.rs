//! Investment thesis document lookup.
//!
//! A thesis document is Markdown with one `## SYMBOL` section per holding.
//! Coverage is informational only; the engine never reads it.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use ballast_core::EvaluatedHolding;
use serde::Serialize;

use crate::error::{FileError, FileResult};

/// Buckets that do not need a written thesis.
pub const THESIS_EXEMPT_BUCKETS: [&str; 2] = ["Core", "Cash"];

/// Symbols that have a thesis section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThesisIndex {
    symbols: BTreeSet<String>,
}

impl ThesisIndex {
    /// Collects every `## ` heading as a symbol key.
    pub fn parse(text: &str) -> Self {
        let symbols = text
            .lines()
            .filter_map(|line| line.trim().strip_prefix("## "))
            .map(str::trim)
            .filter(|heading| !heading.is_empty())
            .map(str::to_string)
            .collect();
        Self { symbols }
    }

    /// Returns true if the symbol has a section.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no sections were found.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Checks which non-exempt holdings have a section.
    pub fn coverage(&self, holdings: &[EvaluatedHolding]) -> ThesisCoverage {
        let rows: Vec<CoverageRow> = holdings
            .iter()
            .filter(|h| !THESIS_EXEMPT_BUCKETS.contains(&h.bucket.as_str()))
            .map(|h| CoverageRow {
                symbol: h.symbol.clone(),
                bucket: h.bucket.clone(),
                covered: self.contains(&h.symbol),
            })
            .collect();

        let missing: BTreeSet<String> = rows
            .iter()
            .filter(|r| !r.covered)
            .map(|r| r.symbol.clone())
            .collect();

        ThesisCoverage {
            rows,
            missing: missing.into_iter().collect(),
        }
    }
}

/// Coverage status of one holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageRow {
    /// Holding symbol.
    pub symbol: String,
    /// Holding bucket.
    pub bucket: String,
    /// True if a thesis section exists.
    pub covered: bool,
}

/// Coverage for a whole report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThesisCoverage {
    /// Checked holdings, in report order.
    pub rows: Vec<CoverageRow>,
    /// Symbols without a section, sorted and de-duplicated.
    pub missing: Vec<String>,
}

/// Loads a thesis document. A missing file yields an empty index.
///
/// # Errors
///
/// Returns [`FileError::Io`] for read failures other than "not found".
pub fn load_thesis(path: impl AsRef<Path>) -> FileResult<ThesisIndex> {
    let path = path.as_ref();
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "thesis file not found, coverage will show all as missing");
            return Ok(ThesisIndex::default());
        }
        Err(e) => return Err(FileError::io(path, e)),
    };

    let index = ThesisIndex::parse(&String::from_utf8_lossy(&bytes));
    tracing::debug!(sections = index.len(), "loaded thesis document");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_core::{AllocationStatus, PositionAction};
    use rust_decimal::Decimal;

    fn holding(symbol: &str, bucket: &str) -> EvaluatedHolding {
        EvaluatedHolding {
            symbol: symbol.to_string(),
            market_value: Decimal::ONE,
            bucket: bucket.to_string(),
            weight_pct: Decimal::ONE,
            target: None,
            status: AllocationStatus::Untargeted,
            action: PositionAction::Review,
            cap_breach: false,
        }
    }

    #[test]
    fn test_parse_headings() {
        let index = ThesisIndex::parse("# Theses\n\n## NVDA\nAI capex.\n  ## PLTR  \n### Notes\n##\n## \n");
        assert!(index.contains("NVDA"));
        assert!(index.contains("PLTR"));
        assert!(!index.contains("Notes"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_coverage_skips_core_and_cash() {
        let index = ThesisIndex::parse("## NVDA\n");
        let holdings = vec![
            holding("VTI", "Core"),
            holding("NVDA", "Conviction"),
            holding("RKLB", "Speculation"),
            holding("CASH", "Cash"),
            holding("GME", "Unassigned"),
        ];
        let coverage = index.coverage(&holdings);

        let checked: Vec<_> = coverage.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(checked, vec!["NVDA", "RKLB", "GME"]);
        assert_eq!(coverage.missing, vec!["GME", "RKLB"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let index = load_thesis("/definitely/not/here/thesis.md").unwrap();
        assert!(index.is_empty());
    }
}
