//! Stratified selection of candidates.
//!
//! The sample budget is split across piece counts as evenly as integer
//! division allows. Each partition contributes a uniformly random subset of
//! its quota; partitions too small for their quota leave a shortfall that is
//! drawn from everything not yet picked.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::candidate::{Candidate, CandidatePool};
use crate::error::PickError;

/// Number of positions picked when nothing else is configured.
pub const DEFAULT_TARGET: usize = 100;

/// Splits `min(target, total)` across partitions.
///
/// `sizes` maps each piece count to its number of candidates. Every
/// partition gets `need / k`, and the `need % k` partitions with the
/// smallest piece counts get one more. Quotas ignore partition sizes
/// beyond the total; a quota may exceed its partition.
pub fn allocate_quotas(sizes: &BTreeMap<u32, usize>, target: usize) -> BTreeMap<u32, usize> {
    if sizes.is_empty() {
        return BTreeMap::new();
    }

    let total: usize = sizes.values().sum();
    let need = target.min(total);
    let k = sizes.len();
    let (base, extra) = (need / k, need % k);

    sizes
        .keys()
        .enumerate()
        .map(|(i, &pieces)| (pieces, base + usize::from(i < extra)))
        .collect()
}

/// How a selection was put together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickReport {
    /// Number of positions the selection had to reach.
    pub need: usize,
    /// Allocated quota per piece count.
    pub quotas: BTreeMap<u32, usize>,
    /// Positions taken against each quota.
    pub taken: BTreeMap<u32, usize>,
    /// Positions drawn per piece count while covering shortfalls.
    pub filled: BTreeMap<u32, usize>,
}

impl PickReport {
    /// Total shortfall left after quota filling.
    pub fn shortfall(&self) -> usize {
        self.need - self.taken.values().sum::<usize>()
    }
}

/// The picked positions, sorted by text, plus how they were picked.
#[derive(Debug, Clone)]
pub struct Selection {
    positions: Vec<Candidate>,
    report: PickReport,
}

impl Selection {
    /// The picked positions in ascending text order.
    pub fn positions(&self) -> &[Candidate] {
        &self.positions
    }

    /// Per-partition accounting for the pick.
    pub fn report(&self) -> &PickReport {
        &self.report
    }

    /// Number of picked positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if nothing was picked.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Consumes the selection, returning the positions.
    pub fn into_positions(self) -> Vec<Candidate> {
        self.positions
    }
}

/// Picks `min(target, pool.len())` candidates, stratified by piece count.
///
/// Which candidates are picked depends on `rng`; the returned order does
/// not, as positions are sorted by their text.
///
/// # Errors
///
/// Returns [`PickError::NoValidPositions`] if the pool is empty, whatever
/// the target.
pub fn select<R: Rng + ?Sized>(
    pool: CandidatePool,
    target: usize,
    rng: &mut R,
) -> Result<Selection, PickError> {
    if pool.is_empty() {
        return Err(PickError::NoValidPositions);
    }

    let quotas = allocate_quotas(&pool.partition_sizes(), target);
    let need: usize = quotas.values().sum();
    if target > pool.len() {
        info!(
            requested = target,
            available = pool.len(),
            "target exceeds pool, taking every position"
        );
    }

    let mut report = PickReport {
        need,
        quotas,
        ..PickReport::default()
    };
    let mut picked = Vec::with_capacity(need);
    let mut leftover = Vec::new();

    for (pieces, mut group) in pool.into_partitions() {
        let quota = report.quotas[&pieces];
        group.shuffle(rng);
        let rest = group.split_off(quota.min(group.len()));
        debug!(
            pieces,
            available = group.len() + rest.len(),
            quota,
            taken = group.len(),
            "filled partition quota"
        );
        report.taken.insert(pieces, group.len());
        picked.extend(group);
        leftover.extend(rest);
    }

    let shortfall = need - picked.len();
    if shortfall > 0 {
        leftover.shuffle(rng);
        for candidate in leftover.into_iter().take(shortfall) {
            *report.filled.entry(candidate.pieces()).or_default() += 1;
            picked.push(candidate);
        }
        debug!(shortfall, filled = ?report.filled, "covered quota shortfall");
    }

    picked.sort_by(|a, b| a.fen().cmp(b.fen()));
    info!(
        picked = picked.len(),
        partitions = report.quotas.len(),
        "selection complete"
    );

    Ok(Selection {
        positions: picked,
        report,
    })
}
