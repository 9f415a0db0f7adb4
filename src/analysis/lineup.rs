// Greedy optimal-lineup selection.
//
// Fills position slots first (best projections pinned to the numbered
// slots), then FLEX from the remaining RB/WR/TE overflow, then K and DST
// when the league starts them. Everyone left over is bench.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::slot::Slot;
use crate::catalog::player::{CatalogPlayer, Position};
use crate::config::RosterSettings;

// ---------------------------------------------------------------------------
// Lineup
// ---------------------------------------------------------------------------

/// A starters/bench partition of a roster. Every input player lands in
/// exactly one of the two sides; underfilled slots simply hold fewer players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineup {
    /// Players assigned to each starting slot, in projection order.
    /// RB1/RB2 and WR1/WR2 hold at most one player each; QB1, TE, FLEX, K,
    /// and DST hold up to their configured count.
    pub slots: BTreeMap<Slot, Vec<CatalogPlayer>>,
    pub bench: Vec<CatalogPlayer>,
}

impl Lineup {
    /// Players in one slot (empty when the slot went unfilled).
    pub fn slot(&self, slot: Slot) -> &[CatalogPlayer] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All starters flattened in slot display order.
    pub fn starters_in_order(&self) -> impl Iterator<Item = (Slot, &CatalogPlayer)> {
        Slot::STARTING
            .iter()
            .flat_map(move |s| self.slot(*s).iter().map(move |p| (*s, p)))
    }

    pub fn starter_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Remove the top `n` players of `pos` from the pool, by proj_ppg descending.
/// The sort is stable, so ties keep input order and the result is
/// deterministic for any roster.
fn take_position(pool: &mut Vec<CatalogPlayer>, pos: Position, n: usize) -> Vec<CatalogPlayer> {
    if n == 0 {
        return Vec::new();
    }
    let mut candidates: Vec<usize> = (0..pool.len())
        .filter(|&i| pool[i].position == pos)
        .collect();
    candidates.sort_by(|&a, &b| {
        pool[b]
            .proj_ppg
            .partial_cmp(&pool[a].proj_ppg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(n);

    extract(pool, candidates)
}

/// Remove the top `n` FLEX-eligible players (RB/WR/TE) from the pool.
fn take_flex(pool: &mut Vec<CatalogPlayer>, n: usize) -> Vec<CatalogPlayer> {
    if n == 0 {
        return Vec::new();
    }
    let mut candidates: Vec<usize> = (0..pool.len())
        .filter(|&i| pool[i].position.is_flex_eligible())
        .collect();
    candidates.sort_by(|&a, &b| {
        pool[b]
            .proj_ppg
            .partial_cmp(&pool[a].proj_ppg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(n);

    extract(pool, candidates)
}

/// Pull the players at `indices` out of the pool, returning them in the
/// given (projection) order.
fn extract(pool: &mut Vec<CatalogPlayer>, indices: Vec<usize>) -> Vec<CatalogPlayer> {
    let taken: Vec<CatalogPlayer> = indices.iter().map(|&i| pool[i].clone()).collect();
    let mut sorted_indices = indices;
    sorted_indices.sort_unstable_by(|a, b| b.cmp(a));
    for i in sorted_indices {
        pool.remove(i);
    }
    taken
}

/// Partition a roster into starters and bench, maximizing starting proj_ppg
/// under the slot-capacity constraints.
///
/// RB and WR pin at most two players to their numbered slots no matter how
/// large the configured count is; any configured overflow stays in the pool
/// and competes for FLEX, so no player is ever dropped.
pub fn pick_best_lineup(roster: &[CatalogPlayer], settings: &RosterSettings) -> Lineup {
    let mut pool: Vec<CatalogPlayer> = roster.to_vec();
    let mut slots: BTreeMap<Slot, Vec<CatalogPlayer>> = BTreeMap::new();

    let qbs = take_position(&mut pool, Position::QB, settings.qb);
    slots.insert(Slot::QB1, qbs);

    let mut rbs = take_position(&mut pool, Position::RB, settings.rb.min(2));
    let rb2 = if rbs.len() > 1 { vec![rbs.remove(1)] } else { Vec::new() };
    slots.insert(Slot::RB1, rbs);
    slots.insert(Slot::RB2, rb2);

    let mut wrs = take_position(&mut pool, Position::WR, settings.wr.min(2));
    let wr2 = if wrs.len() > 1 { vec![wrs.remove(1)] } else { Vec::new() };
    slots.insert(Slot::WR1, wrs);
    slots.insert(Slot::WR2, wr2);

    let tes = take_position(&mut pool, Position::TE, settings.te);
    slots.insert(Slot::TE, tes);

    let flex = take_flex(&mut pool, settings.flex);
    slots.insert(Slot::FLEX, flex);

    if settings.k > 0 {
        let ks = take_position(&mut pool, Position::K, settings.k);
        slots.insert(Slot::K, ks);
    } else {
        slots.insert(Slot::K, Vec::new());
    }
    if settings.dst > 0 {
        let dsts = take_position(&mut pool, Position::DST, settings.dst);
        slots.insert(Slot::DST, dsts);
    } else {
        slots.insert(Slot::DST, Vec::new());
    }

    Lineup { slots, bench: pool }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
