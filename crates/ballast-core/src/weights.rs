//! Weight calculation.
//!
//! Weights are computed in `Decimal` so that rendered percentages add up to
//! 100.00 within display rounding.

use crate::error::{EngineError, EngineResult};
use crate::types::HoldingSet;
use rust_decimal::Decimal;
use serde::Serialize;

/// A holding with its share of the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedHolding {
    /// Ticker symbol.
    pub symbol: String,

    /// Market value.
    pub market_value: Decimal,

    /// Weight as percentage of total (0-100).
    pub weight_pct: Decimal,
}

/// Weighted view of a holding set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioWeights {
    /// Total market value.
    pub total_market_value: Decimal,

    /// Holdings in input order.
    pub holdings: Vec<WeightedHolding>,
}

impl PortfolioWeights {
    /// Sum of all holding weights.
    #[must_use]
    pub fn weight_sum(&self) -> Decimal {
        self.holdings.iter().map(|h| h.weight_pct).sum()
    }
}

/// Returns `100 * value / total`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyPortfolio`] if `total` is zero.
pub fn weight_pct(value: Decimal, total: Decimal) -> EngineResult<Decimal> {
    value
        .checked_div(total)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
        .ok_or(EngineError::EmptyPortfolio)
}

/// Computes total value and per-holding weights.
///
/// # Errors
///
/// Returns [`EngineError::EmptyPortfolio`] when the set is empty or its
/// total market value is zero, and [`EngineError::InvalidHolding`] when the
/// total does not fit in a `Decimal`.
pub fn calculate_weights(holdings: &HoldingSet) -> EngineResult<PortfolioWeights> {
    if holdings.is_empty() {
        return Err(EngineError::EmptyPortfolio);
    }

    let total = holdings.total_market_value()?;
    if total <= Decimal::ZERO {
        return Err(EngineError::EmptyPortfolio);
    }

    let weighted = holdings
        .holdings()
        .iter()
        .map(|h| {
            Ok(WeightedHolding {
                symbol: h.symbol.clone(),
                market_value: h.market_value,
                weight_pct: weight_pct(h.market_value, total)?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    tracing::debug!(
        holdings = weighted.len(),
        total = %total,
        "calculated portfolio weights"
    );

    Ok(PortfolioWeights {
        total_market_value: total,
        holdings: weighted,
    })
}
