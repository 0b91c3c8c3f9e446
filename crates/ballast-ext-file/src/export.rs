//! Brokerage "Positions" CSV export parser.
//!
//! Exports carry a title block before the real header and a legal footer
//! after the data, so the file is not valid CSV as a whole. The parser finds
//! the header by prefix, collects data lines until the first footer line,
//! and parses each line on its own.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{FileError, FileResult};

/// Columns of the export, in file order. Used to locate a column when the
/// header row does not name it.
pub const EXPORT_COLUMNS: [&str; 20] = [
    "Symbol",
    "Quantity",
    "Last",
    "$ Chg",
    "% Chg",
    "Bid",
    "Ask",
    "Volume",
    "$ Avg Cost",
    "$ Day G/L",
    "% Day G/L",
    "$ Total G/L",
    "% Total G/L",
    "Value",
    "Basis",
    "Day Range",
    "52W Range",
    "Earnings Date",
    "Div Amt",
    "Div Ex-Date",
];

/// Lines starting with any of these end the data block.
pub const FOOTER_PREFIXES: [&str; 7] = [
    "Totals",
    "Disclosure",
    "The data and information",
    "For more information",
    "Brokerage services",
    "Both are Fidelity",
    "\"Both are Fidelity",
];

const HEADER_PREFIX: &str = "Symbol,";

const fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn default_index(name: &str) -> usize {
    let mut i = 0;
    while i < EXPORT_COLUMNS.len() {
        if same_name(EXPORT_COLUMNS[i], name) {
            return i;
        }
        i += 1;
    }
    panic!("not an export column");
}

/// Where the columns the parser reads sit in a data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    symbol: usize,
    quantity: usize,
    last: usize,
    value: usize,
}

impl Columns {
    const DEFAULT: Self = Self {
        symbol: default_index("Symbol"),
        quantity: default_index("Quantity"),
        last: default_index("Last"),
        value: default_index("Value"),
    };

    /// Locates columns by name in the header row, falling back to the
    /// standard layout for any name the header lacks.
    fn from_header(line: &str) -> Self {
        let names: Vec<&str> = line.split(',').map(str::trim).collect();
        let find = |name: &str, fallback: usize| {
            names.iter().position(|n| *n == name).unwrap_or_else(|| {
                tracing::warn!(
                    column = name,
                    index = fallback,
                    "column missing from header, using standard position"
                );
                fallback
            })
        };
        Self {
            symbol: find("Symbol", Self::DEFAULT.symbol),
            quantity: find("Quantity", Self::DEFAULT.quantity),
            last: find("Last", Self::DEFAULT.last),
            value: find("Value", Self::DEFAULT.value),
        }
    }
}

/// One data row of the export. Only the columns the engine needs are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PositionRow {
    /// Raw symbol as exported (trimmed).
    pub symbol: String,
    /// Share count.
    pub quantity: Option<Decimal>,
    /// Last price.
    pub last: Option<Decimal>,
    /// Current market value.
    pub value: Option<Decimal>,
}

/// Parses a numeric cell such as `$1,234.56`, `12.5%` or `--`.
///
/// Returns `None` for empty, `--` and unparseable cells.
pub fn parse_number_cell(cell: &str) -> Option<Decimal> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "--" {
        return None;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ','))
        .collect();
    Decimal::from_str(cleaned.trim()).ok()
}

fn is_footer(line: &str) -> bool {
    FOOTER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

fn parse_line(line: &str, line_no: usize, columns: Columns) -> FileResult<Option<PositionRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let Some(record) = reader.records().next() else {
        return Ok(None);
    };
    let record = record.map_err(|source| FileError::Csv {
        line: line_no,
        source,
    })?;

    // Short rows are padded with empty cells, extra cells are ignored.
    let cell = |idx: usize| record.get(idx).unwrap_or("");

    Ok(Some(PositionRow {
        symbol: cell(columns.symbol).trim().to_string(),
        quantity: parse_number_cell(cell(columns.quantity)),
        last: parse_number_cell(cell(columns.last)),
        value: parse_number_cell(cell(columns.value)),
    }))
}

/// Parses the text of a positions export.
///
/// # Errors
///
/// Returns [`FileError::HeaderNotFound`] if no header row exists, or
/// [`FileError::Csv`] for a data line the CSV reader rejects.
pub fn parse_positions(text: &str) -> FileResult<Vec<PositionRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .by_ref()
        .find(|(_, line)| line.starts_with(HEADER_PREFIX))
        .ok_or(FileError::HeaderNotFound)?;
    let columns = Columns::from_header(header);

    let mut rows = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        if is_footer(line) {
            tracing::debug!(line = idx + 1, "reached export footer");
            break;
        }
        if let Some(row) = parse_line(line, idx + 1, columns)? {
            rows.push(row);
        }
    }

    tracing::debug!(rows = rows.len(), "parsed positions export");
    Ok(rows)
}

/// Reads and parses a positions export from disk.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_positions(path: impl AsRef<Path>) -> FileResult<Vec<PositionRow>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| FileError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);

    let rows = parse_positions(&text)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "read positions export");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "Symbol,Quantity,Last,$ Chg,% Chg,Bid,Ask,Volume,$ Avg Cost,$ Day G/L,% Day G/L,$ Total G/L,% Total G/L,Value,Basis,Day Range,52W Range,Earnings Date,Div Amt,Div Ex-Date";

    #[test]
    fn test_parse_number_cell() {
        assert_eq!(parse_number_cell("$1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_number_cell(" 12.5% "), Some(dec!(12.5)));
        assert_eq!(parse_number_cell("-3.10"), Some(dec!(-3.10)));
        assert_eq!(parse_number_cell("--"), None);
        assert_eq!(parse_number_cell(""), None);
        assert_eq!(parse_number_cell("n/a"), None);
    }

    #[test]
    fn test_title_block_and_footer() {
        let text = format!(
            "All Accounts\nAs of 10/18/2026\n\n{HEADER}\nVTI,100,$250.00,,,,,,,,,,,\"$25,000.00\"\n\nAAPL,10,$200,,,,,,,,,,,--\nTotals,,,,,,,,,,,,,\"$27,000.00\"\nXYZ,1,1,,,,,,,,,,,1\n"
        );
        let rows = parse_positions(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "VTI");
        assert_eq!(rows[0].value, Some(dec!(25000.00)));
        assert_eq!(rows[1].symbol, "AAPL");
        assert_eq!(rows[1].quantity, Some(dec!(10)));
        assert_eq!(rows[1].last, Some(dec!(200)));
        assert_eq!(rows[1].value, None);
    }

    #[test]
    fn test_bom_and_short_rows() {
        let text = format!("\u{feff}{HEADER}\nSPAXX**,,,\n");
        let rows = parse_positions(&text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "SPAXX**");
        assert_eq!(rows[0].value, None);
    }

    #[test]
    fn test_quoted_footer() {
        let text = format!(
            "{HEADER}\nVTI,1,1,,,,,,,,,,,1\n\"Both are Fidelity Investments companies\"\nMSFT,1,1,,,,,,,,,,,1\n"
        );
        let rows = parse_positions(&text).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_standard_column_layout() {
        assert_eq!(
            Columns::DEFAULT,
            Columns {
                symbol: 0,
                quantity: 1,
                last: 2,
                value: 13
            }
        );
        assert_eq!(Columns::from_header(HEADER), Columns::DEFAULT);
    }

    #[test]
    fn test_columns_located_by_header_name() {
        let text = r#"Symbol,Description,Quantity,Last,Value
VTI,Total Market,100,$250.00,"$25,000.00"
"#;
        let rows = parse_positions(text).unwrap();
        assert_eq!(rows[0].symbol, "VTI");
        assert_eq!(rows[0].quantity, Some(dec!(100)));
        assert_eq!(rows[0].last, Some(dec!(250.00)));
        assert_eq!(rows[0].value, Some(dec!(25000.00)));
    }

    #[test]
    fn test_missing_header() {
        let err = parse_positions("Account,Value\nA,1\n").unwrap_err();
        assert!(matches!(err, FileError::HeaderNotFound));
    }
}
