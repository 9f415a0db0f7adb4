// Roster analysis orchestrator: names in, graded lineup and team outlook out.
//
// Pure and synchronous. All network and cache concerns live in the catalog
// layer; this module only computes.

use serde::{Deserialize, Serialize};

use crate::analysis::baselines::{compute_baselines, Baselines};
use crate::analysis::grades::Grade;
use crate::analysis::lineup::pick_best_lineup;
use crate::analysis::resolve::resolve_roster;
use crate::analysis::slot::Slot;
use crate::analysis::team::{summarize, TeamSummary};
use crate::catalog::player::{CatalogPlayer, PlayerCatalog};
use crate::config::LeagueSettings;

/// Relative delta at and above which a starter counts as a star.
const STAR_DELTA_PCT: f64 = 0.18;

/// A bench player within this fraction of the FLEX baseline counts as depth.
const BENCH_DEPTH_FACTOR: f64 = 0.9;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One starter with its slot, baseline comparison, and grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterAssignment {
    pub slot: Slot,
    pub player: CatalogPlayer,
    pub baseline: f64,
    pub delta: f64,
    pub delta_pct: f64,
    pub grade: Grade,
}

/// The full output of a roster analysis. Starters appear in slot display
/// order (QB1 through DST); bench holds everyone who does not start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub starters: Vec<StarterAssignment>,
    pub bench: Vec<CatalogPlayer>,
    pub baselines: Baselines,
    pub summary: TeamSummary,
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Analyze a roster of free-text player names against the catalog.
///
/// Resolution is total (misses become placeholders), the lineup is greedy
/// optimal, and every starter is graded against its slot's replacement
/// baseline computed over the whole catalog at `league.teams`. Empty inputs
/// yield a degenerate result, never an error.
pub fn analyze(
    names: &[String],
    catalog: &PlayerCatalog,
    league: &LeagueSettings,
) -> AnalysisResult {
    let roster = resolve_roster(names, catalog);
    analyze_players(&roster, catalog, league)
}

/// Same as [`analyze`] but for an already-resolved roster (league imports
/// resolve by player id and skip the name index).
pub fn analyze_players(
    roster: &[CatalogPlayer],
    catalog: &PlayerCatalog,
    league: &LeagueSettings,
) -> AnalysisResult {
    let baselines = compute_baselines(&catalog.players, league.teams);
    let lineup = pick_best_lineup(roster, &league.roster);

    let starters: Vec<StarterAssignment> = lineup
        .starters_in_order()
        .map(|(slot, player)| grade_starter(slot, player.clone(), &baselines))
        .collect();

    let sum_proj: f64 = starters.iter().map(|s| s.player.proj_ppg).sum();
    let sum_baseline = baselines.total();

    let advantages_count = starters.iter().filter(|s| s.delta >= 0.0).count();
    let star_count = starters
        .iter()
        .filter(|s| s.delta_pct >= STAR_DELTA_PCT)
        .count();

    let flex_baseline = baselines.get(Slot::FLEX);
    let bench_depth_count = lineup
        .bench
        .iter()
        .filter(|p| p.proj_ppg >= BENCH_DEPTH_FACTOR * flex_baseline)
        .count();

    let summary = summarize(
        sum_proj,
        sum_baseline,
        advantages_count,
        star_count,
        bench_depth_count,
    );

    AnalysisResult {
        starters,
        bench: lineup.bench,
        baselines,
        summary,
    }
}

fn grade_starter(slot: Slot, player: CatalogPlayer, baselines: &Baselines) -> StarterAssignment {
    let baseline = baselines.get(slot);
    let delta = player.proj_ppg - baseline;
    let delta_pct = if baseline > 0.0 { delta / baseline } else { 0.0 };
    StarterAssignment {
        slot,
        player,
        baseline,
        delta,
        delta_pct,
        grade: Grade::from_delta_pct(delta_pct),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
