// Team-level summary: season outlook from weekly projection totals.
//
// The model treats a week as a normal variable centered on the league-average
// starter total, with spread proportional to that total. The win probability
// for one week is then the CDF of the team's edge, scaled to a 14-game season.

use serde::{Deserialize, Serialize};

use crate::analysis::grades::Grade;

/// Regular-season length used for the projected record.
const SEASON_GAMES: f64 = 14.0;

/// Expected wins at which playoff odds sit at 50%.
const PLAYOFF_WIN_THRESHOLD: f64 = 8.0;

/// Weekly scoring spread as a fraction of the baseline starter total.
const WEEKLY_SIGMA_FACTOR: f64 = 0.18;

// ---------------------------------------------------------------------------
// Team summary
// ---------------------------------------------------------------------------

/// Aggregate view of one analyzed roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    /// Sum of starter projections.
    pub sum_proj: f64,
    /// Sum of starting-slot baselines.
    pub sum_baseline: f64,
    pub delta: f64,
    /// Starters projected above their slot baseline.
    pub advantages_count: usize,
    /// Starters at least 15% above baseline.
    pub star_count: usize,
    /// Bench players within striking distance of a starting spot.
    pub bench_depth_count: usize,
    /// Delta as a fraction of the baseline total (0 when baseline is 0).
    pub team_delta_pct: f64,
    pub overall_grade: Grade,
    /// "W-L" over a 14-game season.
    pub projected_record: String,
    /// 0..=100, rounded.
    pub playoff_odds_pct: u8,
}

/// Build a summary from aggregate starter totals and pre-computed counts.
pub fn summarize(
    sum_proj: f64,
    sum_baseline: f64,
    advantages_count: usize,
    star_count: usize,
    bench_depth_count: usize,
) -> TeamSummary {
    let delta = sum_proj - sum_baseline;
    let team_delta_pct = if sum_baseline > 0.0 {
        delta / sum_baseline
    } else {
        0.0
    };
    let wins = expected_wins(sum_proj, sum_baseline);

    TeamSummary {
        sum_proj,
        sum_baseline,
        delta,
        advantages_count,
        star_count,
        bench_depth_count,
        team_delta_pct,
        overall_grade: Grade::from_delta_pct(team_delta_pct),
        projected_record: projected_record(wins),
        playoff_odds_pct: playoff_odds_pct(wins),
    }
}

// ---------------------------------------------------------------------------
// Win model
// ---------------------------------------------------------------------------

/// Expected season wins: weekly win probability times 14 games.
///
/// Weekly win probability is P(team score > opponent score) under a normal
/// model with sigma = 0.18 * baseline total. Degenerate baselines collapse
/// to a coin flip.
pub fn expected_wins(sum_proj: f64, sum_baseline: f64) -> f64 {
    let sigma = WEEKLY_SIGMA_FACTOR * sum_baseline;
    let z = if sigma > 0.0 {
        (sum_proj - sum_baseline) / (std::f64::consts::SQRT_2 * sigma)
    } else {
        0.0
    };
    let weekly_win_prob = 0.5 * (1.0 + erf(z));
    weekly_win_prob * SEASON_GAMES
}

/// Round expected wins into a "W-L" record string.
pub fn projected_record(expected_wins: f64) -> String {
    let wins = expected_wins
        .round()
        .clamp(0.0, SEASON_GAMES) as u32;
    format!("{}-{}", wins, SEASON_GAMES as u32 - wins)
}

/// Playoff odds as a rounded percentage: a logistic curve centered on the
/// 8-win threshold.
pub fn playoff_odds_pct(expected_wins: f64) -> u8 {
    let odds = 100.0 * sigmoid(expected_wins - PLAYOFF_WIN_THRESHOLD);
    odds.round() as u8
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Error function via the Abramowitz & Stegun 7.1.26 rational approximation
/// (max absolute error about 1.5e-7, plenty for whole-percent odds).
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn erf_matches_reference_values() {
        assert!(approx_eq(erf(0.0), 0.0, 1e-7));
        assert!(approx_eq(erf(1.0), 0.8427008, 1e-6));
        assert!(approx_eq(erf(-1.0), -0.8427008, 1e-6));
        assert!(approx_eq(erf(2.0), 0.9953223, 1e-6));
        assert!(erf(6.0) > 0.999999);
    }

    #[test]
    fn erf_is_odd() {
        for x in [0.1, 0.5, 1.3, 2.7] {
            assert!(approx_eq(erf(-x), -erf(x), 1e-12));
        }
    }

    #[test]
    fn average_team_wins_half_its_games() {
        let wins = expected_wins(100.0, 100.0);
        // erf is a rational approximation with a residual near 3e-10 at zero,
        // which scales up by the 14-game season.
        assert!(approx_eq(wins, 7.0, 1e-6));
        assert_eq!(projected_record(wins), "7-7");
    }

    #[test]
    fn average_team_playoff_odds_are_27() {
        // sigmoid(7 - 8) = 0.2689 -> 27%.
        assert_eq!(playoff_odds_pct(7.0), 27);
    }

    #[test]
    fn strong_team_projects_above_500() {
        let wins = expected_wins(120.0, 100.0);
        assert!(wins > 7.0);
        assert!(wins <= SEASON_GAMES);
        assert!(playoff_odds_pct(wins) > 50);
    }

    #[test]
    fn weak_team_projects_below_500() {
        let wins = expected_wins(80.0, 100.0);
        assert!(wins < 7.0);
        assert!(wins >= 0.0);
        assert!(playoff_odds_pct(wins) < 27);
    }

    #[test]
    fn expected_wins_is_monotone_in_projection() {
        let mut last = 0.0;
        for proj in [80.0, 90.0, 100.0, 110.0, 120.0, 150.0] {
            let wins = expected_wins(proj, 100.0);
            assert!(wins >= last, "wins dropped at proj {proj}");
            last = wins;
        }
    }

    #[test]
    fn zero_baseline_is_a_coin_flip() {
        let wins = expected_wins(50.0, 0.0);
        assert!(approx_eq(wins, 7.0, 1e-6));
    }

    #[test]
    fn record_stays_within_season_bounds() {
        assert_eq!(projected_record(-3.0), "0-14");
        assert_eq!(projected_record(99.0), "14-0");
        assert_eq!(projected_record(9.4), "9-5");
    }

    #[test]
    fn summarize_at_baseline_is_b_minus() {
        let summary = summarize(100.0, 100.0, 4, 1, 2);
        assert!(approx_eq(summary.delta, 0.0, 1e-9));
        assert!(approx_eq(summary.team_delta_pct, 0.0, 1e-9));
        assert_eq!(summary.overall_grade, Grade::BMinus);
        assert_eq!(summary.projected_record, "7-7");
        assert_eq!(summary.playoff_odds_pct, 27);
        assert_eq!(summary.advantages_count, 4);
        assert_eq!(summary.star_count, 1);
        assert_eq!(summary.bench_depth_count, 2);
    }

    #[test]
    fn summarize_guards_zero_baseline_pct() {
        let summary = summarize(50.0, 0.0, 0, 0, 0);
        assert!(approx_eq(summary.team_delta_pct, 0.0, 1e-9));
    }
}
