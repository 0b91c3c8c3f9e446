//! Holdings and the unique-symbol holding set.

use crate::error::{EngineError, EngineResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single normalized position: one symbol and its market value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, matched exactly (case-sensitive) against targets.
    pub symbol: String,

    /// Market value in account currency.
    pub market_value: Decimal,
}

impl Holding {
    /// Creates a new holding.
    #[must_use]
    pub fn new(symbol: impl Into<String>, market_value: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            market_value,
        }
    }
}

/// An ordered set of holdings with unique symbols.
///
/// Duplicate symbols are merged on construction by summing market values;
/// the first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HoldingSet {
    holdings: Vec<Holding>,
}

fn merge_duplicates(holdings: impl IntoIterator<Item = Holding>) -> EngineResult<Vec<Holding>> {
    let mut merged: Vec<Holding> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for holding in holdings {
        if holding.symbol.trim().is_empty() {
            return Err(EngineError::invalid_holding(
                holding.symbol,
                "symbol is blank",
            ));
        }
        match index.get(&holding.symbol) {
            Some(&i) => {
                let slot = &mut merged[i];
                slot.market_value = slot
                    .market_value
                    .checked_add(holding.market_value)
                    .ok_or_else(|| {
                        EngineError::invalid_holding(holding.symbol, "market value overflows")
                    })?;
            }
            None => {
                index.insert(holding.symbol.clone(), merged.len());
                merged.push(holding);
            }
        }
    }

    Ok(merged)
}

impl HoldingSet {
    /// Builds a holding set, merging duplicate symbols.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHolding`] if a symbol is blank, a merged
    /// market value overflows, or a merged market value is negative.
    pub fn new(holdings: impl IntoIterator<Item = Holding>) -> EngineResult<Self> {
        let merged = merge_duplicates(holdings)?;

        if let Some(bad) = merged.iter().find(|h| h.market_value < Decimal::ZERO) {
            return Err(EngineError::invalid_holding(
                bad.symbol.clone(),
                format!("market value {} is negative", bad.market_value),
            ));
        }

        Ok(Self { holdings: merged })
    }

    /// Builds a holding set like [`HoldingSet::new`], but sets aside symbols
    /// whose merged market value is negative instead of failing.
    ///
    /// Returns the set and the holdings that were dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHolding`] if a symbol is blank or a
    /// merged market value overflows.
    pub fn with_negatives_dropped(
        holdings: impl IntoIterator<Item = Holding>,
    ) -> EngineResult<(Self, Vec<Holding>)> {
        let (kept, dropped): (Vec<Holding>, Vec<Holding>) = merge_duplicates(holdings)?
            .into_iter()
            .partition(|h| h.market_value >= Decimal::ZERO);
        Ok((Self { holdings: kept }, dropped))
    }

    /// Returns the holdings in first-seen order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Returns the holding for a symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if there are no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of market values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHolding`] naming the first holding whose
    /// value no longer fits in the running total.
    pub fn total_market_value(&self) -> EngineResult<Decimal> {
        self.holdings.iter().try_fold(Decimal::ZERO, |total, h| {
            total.checked_add(h.market_value).ok_or_else(|| {
                EngineError::invalid_holding(h.symbol.clone(), "market value overflows")
            })
        })
    }
}

impl<'a> IntoIterator for &'a HoldingSet {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
