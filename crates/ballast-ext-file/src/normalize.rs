//! Turns raw export rows into an engine-ready holding set.

use ballast_config::NormalizerSettings;
use ballast_core::{EngineError, Holding, HoldingSet};
use rust_decimal::Decimal;

use crate::error::FileResult;
use crate::export::PositionRow;

/// Market value for a row: the Value cell, else quantity times last price.
///
/// # Errors
///
/// Returns an engine error if quantity times last price overflows.
pub fn row_market_value(row: &PositionRow) -> FileResult<Decimal> {
    if let Some(value) = row.value {
        return Ok(value);
    }
    let quantity = row.quantity.unwrap_or(Decimal::ZERO);
    let last = row.last.unwrap_or(Decimal::ZERO);
    quantity.checked_mul(last).ok_or_else(|| {
        EngineError::invalid_holding(row.symbol.clone(), "market value overflows").into()
    })
}

/// Canonicalizes symbols and merges rows into a [`HoldingSet`].
///
/// Rows with an empty symbol are skipped. Rows that map to the same canonical
/// symbol (for example several money-market funds all becoming `CASH`) are
/// summed, keeping first-seen order. A symbol whose merged value is negative,
/// such as a standalone pending-activity debit, is dropped with a warning.
///
/// # Errors
///
/// Returns an engine error if a market value overflows.
pub fn normalize_positions(
    rows: &[PositionRow],
    settings: &NormalizerSettings,
) -> FileResult<HoldingSet> {
    let mut skipped = 0usize;
    let mut holdings = Vec::with_capacity(rows.len());
    for row in rows {
        if row.symbol.is_empty() {
            skipped += 1;
            continue;
        }
        if row.value.is_none() {
            tracing::debug!(symbol = %row.symbol, "no Value cell, using quantity x last");
        }
        holdings.push(Holding::new(
            settings.canonical_symbol(&row.symbol),
            row_market_value(row)?,
        ));
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped export rows without a symbol");
    }

    let (set, dropped) = HoldingSet::with_negatives_dropped(holdings)?;
    for holding in &dropped {
        tracing::warn!(
            symbol = %holding.symbol,
            market_value = %holding.market_value,
            "dropped export position with negative market value"
        );
    }
    tracing::debug!(rows = rows.len(), holdings = set.len(), "normalized positions");
    Ok(set)
}
