//! End-to-end evaluation of one portfolio against one target configuration.

use crate::error::EngineResult;
use crate::evaluate::{evaluate_buckets, evaluate_positions};
use crate::rank::rank_actions;
use crate::types::{AllocationReport, HoldingSet, TargetConfig};
use crate::weights::calculate_weights;

/// Runs weighting, classification, evaluation and ranking.
///
/// This is a pure function of its inputs: no state is kept between calls,
/// so separate portfolios can be evaluated concurrently.
///
/// # Errors
///
/// Returns [`crate::EngineError::EmptyPortfolio`] if the holdings carry no
/// value. Nothing partial is returned on error.
///
/// # Example
///
/// ```rust
/// use ballast_core::prelude::*;
///
/// let config = TargetConfig::builder()
///     .bucket("Core", dec!(40), dec!(60))
///     .position("VTI", "Core", dec!(40), dec!(45))
///     .build()?;
/// let holdings = HoldingSet::new(vec![
///     Holding::new("VTI", dec!(42_000)),
///     Holding::new("XYZ", dec!(58_000)),
/// ])?;
///
/// let report = evaluate_portfolio(&holdings, &config)?;
/// assert_eq!(report.holding("VTI").unwrap().action, PositionAction::Hold);
/// assert_eq!(report.holding("XYZ").unwrap().bucket, UNASSIGNED_BUCKET);
/// # Ok::<(), EngineError>(())
/// ```
pub fn evaluate_portfolio(
    holdings: &HoldingSet,
    config: &TargetConfig,
) -> EngineResult<AllocationReport> {
    let weights = calculate_weights(holdings)?;
    let evaluated = evaluate_positions(&weights, config);
    let buckets = evaluate_buckets(&evaluated, config);
    let actions = rank_actions(&evaluated, &buckets, config);

    tracing::info!(
        holdings = evaluated.len(),
        buckets = buckets.len(),
        actions = actions.len(),
        total = %weights.total_market_value,
        "evaluated portfolio"
    );

    Ok(AllocationReport {
        strategy_name: config.strategy_name().to_string(),
        total_market_value: weights.total_market_value,
        buckets,
        holdings: evaluated,
        actions,
    })
}
