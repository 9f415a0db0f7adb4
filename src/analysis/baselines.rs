// Replacement-level baseline computation.
//
// A slot's baseline is the proj_ppg of the "last starter-worthy" player at
// that slot across the whole league: the N-th best QB in an N-team league,
// the 2N-th best RB for the RB2 slot, and so on. Starters are graded against
// these baselines rather than against raw projections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::slot::Slot;
use crate::catalog::player::{CatalogPlayer, Position};

// ---------------------------------------------------------------------------
// Baselines map
// ---------------------------------------------------------------------------

/// Replacement-level proj_ppg per starting slot. Keyed by `Slot` so iteration
/// and serialization follow lineup display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baselines(BTreeMap<Slot, f64>);

impl Baselines {
    /// Baseline for one slot. BENCH has no baseline and returns 0.
    pub fn get(&self, slot: Slot) -> f64 {
        self.0.get(&slot).copied().unwrap_or(0.0)
    }

    /// Sum of all nine starting-slot baselines: the projected weekly output
    /// of a hypothetical league-average team.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterate (slot, baseline) pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, f64)> + '_ {
        self.0.iter().map(|(s, v)| (*s, *v))
    }
}

/// Fallback baseline used when a position pool is empty. These are stable
/// policy constants, never zero, roughly the floor of startable production
/// at each slot.
pub fn fallback_baseline(slot: Slot) -> f64 {
    match slot {
        Slot::QB1 => 15.0,
        Slot::RB1 => 12.0,
        Slot::RB2 => 10.0,
        Slot::WR1 => 12.0,
        Slot::WR2 => 10.0,
        Slot::TE => 8.0,
        Slot::K => 7.0,
        Slot::DST => 7.0,
        Slot::FLEX => 9.0,
        Slot::BENCH => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Sort a position pool by proj_ppg descending. The sort is stable so ties
/// retain catalog order, keeping baselines reproducible.
fn sorted_pool(players: &[CatalogPlayer], pos: Position) -> Vec<&CatalogPlayer> {
    let mut pool: Vec<&CatalogPlayer> = players.iter().filter(|p| p.position == pos).collect();
    pool.sort_by(|a, b| {
        b.proj_ppg
            .partial_cmp(&a.proj_ppg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pool
}

/// Baseline for a pool at a given replacement rank: the rank-th best player,
/// clamped to the last player when the pool is short, fallback when empty.
fn baseline_at_rank(pool: &[&CatalogPlayer], rank: usize, slot: Slot) -> f64 {
    if pool.is_empty() {
        return fallback_baseline(slot);
    }
    let idx = rank.saturating_sub(1).min(pool.len() - 1);
    pool[idx].proj_ppg
}

/// Compute replacement-level baselines for every starting slot.
///
/// Replacement ranks: N for QB1/RB1/WR1/TE/K/DST, 2N for RB2/WR2 (every
/// team's second back/receiver). The FLEX pool is the positional overflow
/// (RBs and WRs ranked beyond 2N plus TEs ranked beyond N), re-sorted and
/// taken at rank N.
///
/// Pure function of (players, teams). Never panics, never returns a negative
/// baseline (proj_ppg is non-negative and the fallbacks are positive).
pub fn compute_baselines(players: &[CatalogPlayer], teams: usize) -> Baselines {
    let qb = sorted_pool(players, Position::QB);
    let rb = sorted_pool(players, Position::RB);
    let wr = sorted_pool(players, Position::WR);
    let te = sorted_pool(players, Position::TE);
    let k = sorted_pool(players, Position::K);
    let dst = sorted_pool(players, Position::DST);

    let mut flex_pool: Vec<&CatalogPlayer> = Vec::new();
    flex_pool.extend(rb.iter().skip(teams * 2).copied());
    flex_pool.extend(wr.iter().skip(teams * 2).copied());
    flex_pool.extend(te.iter().skip(teams).copied());
    flex_pool.sort_by(|a, b| {
        b.proj_ppg
            .partial_cmp(&a.proj_ppg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut map = BTreeMap::new();
    map.insert(Slot::QB1, baseline_at_rank(&qb, teams, Slot::QB1));
    map.insert(Slot::RB1, baseline_at_rank(&rb, teams, Slot::RB1));
    map.insert(Slot::RB2, baseline_at_rank(&rb, teams * 2, Slot::RB2));
    map.insert(Slot::WR1, baseline_at_rank(&wr, teams, Slot::WR1));
    map.insert(Slot::WR2, baseline_at_rank(&wr, teams * 2, Slot::WR2));
    map.insert(Slot::TE, baseline_at_rank(&te, teams, Slot::TE));
    map.insert(Slot::FLEX, baseline_at_rank(&flex_pool, teams, Slot::FLEX));
    map.insert(Slot::K, baseline_at_rank(&k, teams, Slot::K));
    map.insert(Slot::DST, baseline_at_rank(&dst, teams, Slot::DST));

    Baselines(map)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
