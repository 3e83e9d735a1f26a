//! Weighted exclusive-intersection allocation.
//!
//! For each symbol, fund subsets claim weight in priority order: the widest
//! combinations first, lexicographic within a size. A subset claims the
//! smallest unclaimed weight among its members, so weight shared by every
//! fund lands in the all-fund intersection instead of being split across
//! pairs. Singletons go last and take whatever each fund has left, which is
//! what makes every unit of input weight end up in exactly one subset.

use tracing::{debug, trace};

use super::{AllocatorConfig, Ledger};
use crate::result::IntersectionResult;
use crate::types::{enumerate_subsets, FundSet, Subset};
use crate::{CoreError, CoreResult};

/// Computes how much weight belongs to exactly each combination of funds.
///
/// Stateless between runs; every call builds and discards its own [`Ledger`],
/// so one allocator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ExclusiveAllocator {
    config: AllocatorConfig,
}

impl ExclusiveAllocator {
    /// Creates an allocator with the given configuration.
    #[must_use]
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Returns the allocator configuration.
    #[must_use]
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocates the holdings of `fund_set` to exclusive fund subsets.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if the configured epsilon is
    /// negative or not finite. Returns [`CoreError::ConservationViolation`]
    /// or [`CoreError::LedgerOverdraw`] only on an internal defect.
    pub fn allocate(&self, fund_set: &FundSet) -> CoreResult<IntersectionResult> {
        let epsilon = self.config.epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(CoreError::invalid_input(format!(
                "epsilon must be a non-negative finite number, got {epsilon}"
            )));
        }

        let fund_ids = fund_set.fund_ids();
        let (shared, singletons): (Vec<Subset>, Vec<Subset>) = enumerate_subsets(&fund_ids)
            .into_iter()
            .partition(|s| !s.is_singleton());

        let mut ledger = Ledger::from_fund_set(fund_set).with_epsilon(epsilon);
        let mut result = IntersectionResult::zeroed(&fund_ids);

        let symbols: Vec<String> = ledger.symbols().map(str::to_string).collect();
        debug!(
            funds = fund_ids.len(),
            symbols = symbols.len(),
            subsets = shared.len() + singletons.len(),
            "allocating exclusive intersections"
        );

        for symbol in &symbols {
            for subset in &shared {
                let amount = ledger.bottleneck(symbol, subset);
                if amount > epsilon {
                    ledger.claim(symbol, subset, amount)?;
                    result.record(subset, amount);
                    trace!(symbol = %symbol, subset = %subset, amount, "claimed");
                }
            }

            for subset in &singletons {
                let fund = &subset.members()[0];
                let rest = ledger.sweep(symbol, fund);
                if rest > 0.0 {
                    result.record(subset, rest);
                    trace!(symbol = %symbol, subset = %subset, amount = rest, "swept");
                }
            }

            if self.config.verify_conservation {
                verify_symbol(&ledger, symbol, &fund_ids, epsilon)?;
            }
        }

        debug!(total = result.total(), "allocation complete");
        Ok(result)
    }
}

/// Allocates with the default configuration.
///
/// # Errors
///
/// See [`ExclusiveAllocator::allocate`].
pub fn allocate_exclusive(fund_set: &FundSet) -> CoreResult<IntersectionResult> {
    ExclusiveAllocator::default().allocate(fund_set)
}

/// Fails if any fund still holds unclaimed weight in `symbol`.
fn verify_symbol(ledger: &Ledger, symbol: &str, fund_ids: &[&str], epsilon: f64) -> CoreResult<()> {
    // Remaining weights are non-negative, so a small sum clears every fund.
    if ledger.remaining_for(symbol) <= epsilon {
        return Ok(());
    }
    for fund in fund_ids {
        let remaining = ledger.get(symbol, fund);
        if remaining > epsilon {
            return Err(CoreError::ConservationViolation {
                symbol: symbol.to_string(),
                fund: (*fund).to_string(),
                remaining,
            });
        }
    }
    Ok(())
}
