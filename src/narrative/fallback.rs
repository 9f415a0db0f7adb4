// Rule-based narratives used when no API key is configured or the model
// call fails. Everything here is derived from projections, baselines, and
// roster composition; the output shape matches the model-generated one.

use crate::analysis::{AnalysisResult, Grade};
use crate::catalog::player::{CatalogPlayer, PlayerCatalog, Position};
use crate::narrative::{PlayerNarrative, TeamNarrative};

/// Trade targets suggested by the team fallback must project at least this.
const TARGET_MIN_PPG: f64 = 8.0;

// ---------------------------------------------------------------------------
// Player fallback
// ---------------------------------------------------------------------------

struct Tier {
    grade: Grade,
    role: &'static str,
    verdict: &'static str,
    floor_min: f64,
    floor_sub: f64,
    ceiling_add: f64,
}

fn tier_for(player: &CatalogPlayer) -> Tier {
    let ppg = player.proj_ppg;
    match player.position {
        Position::QB => {
            if ppg >= 20.0 {
                Tier {
                    grade: Grade::APlus,
                    role: "elite QB1",
                    verdict: "a weekly must-start with top-5 upside",
                    floor_min: 18.0,
                    floor_sub: 3.0,
                    ceiling_add: 8.0,
                }
            } else if ppg >= 16.0 {
                Tier {
                    grade: Grade::B,
                    role: "solid QB2",
                    verdict: "a reliable starter in good matchups",
                    floor_min: 12.0,
                    floor_sub: 4.0,
                    ceiling_add: 6.0,
                }
            } else {
                Tier {
                    grade: Grade::D,
                    role: "low-end QB3",
                    verdict: "a desperation play outside 2QB leagues",
                    floor_min: 8.0,
                    floor_sub: 6.0,
                    ceiling_add: 4.0,
                }
            }
        }
        Position::RB => {
            if ppg >= 15.0 {
                Tier {
                    grade: Grade::APlus,
                    role: "elite RB1",
                    verdict: "a weekly must-start with premium volume",
                    floor_min: 12.0,
                    floor_sub: 4.0,
                    ceiling_add: 8.0,
                }
            } else if ppg >= 10.0 {
                Tier {
                    grade: Grade::B,
                    role: "solid RB2",
                    verdict: "a reliable starter with a dependable role",
                    floor_min: 8.0,
                    floor_sub: 4.0,
                    ceiling_add: 6.0,
                }
            } else {
                Tier {
                    grade: Grade::D,
                    role: "low-end RB3",
                    verdict: "a committee back to avoid outside deep leagues",
                    floor_min: 4.0,
                    floor_sub: 6.0,
                    ceiling_add: 4.0,
                }
            }
        }
        Position::WR => {
            if ppg >= 12.0 {
                Tier {
                    grade: Grade::APlus,
                    role: "elite WR1",
                    verdict: "a weekly must-start with a dominant target share",
                    floor_min: 10.0,
                    floor_sub: 4.0,
                    ceiling_add: 8.0,
                }
            } else if ppg >= 8.0 {
                Tier {
                    grade: Grade::B,
                    role: "solid WR2",
                    verdict: "a reliable starter with consistent volume",
                    floor_min: 6.0,
                    floor_sub: 4.0,
                    ceiling_add: 6.0,
                }
            } else {
                Tier {
                    grade: Grade::D,
                    role: "low-end WR3",
                    verdict: "a thin-volume receiver to avoid outside deep leagues",
                    floor_min: 3.0,
                    floor_sub: 6.0,
                    ceiling_add: 4.0,
                }
            }
        }
        Position::TE => {
            if ppg >= 10.0 {
                Tier {
                    grade: Grade::APlus,
                    role: "elite TE1",
                    verdict: "a weekly must-start with a rare positional edge",
                    floor_min: 8.0,
                    floor_sub: 4.0,
                    ceiling_add: 8.0,
                }
            } else if ppg >= 6.0 {
                Tier {
                    grade: Grade::B,
                    role: "solid TE2",
                    verdict: "a reliable streamer with red-zone involvement",
                    floor_min: 4.0,
                    floor_sub: 4.0,
                    ceiling_add: 6.0,
                }
            } else {
                Tier {
                    grade: Grade::D,
                    role: "low-end TE3",
                    verdict: "a touchdown-dependent dart throw",
                    floor_min: 2.0,
                    floor_sub: 6.0,
                    ceiling_add: 4.0,
                }
            }
        }
        Position::K | Position::DST => Tier {
            grade: Grade::C,
            role: "streaming option",
            verdict: "a matchup-based play with high weekly variance",
            floor_min: 2.0,
            floor_sub: 4.0,
            ceiling_add: 4.0,
        },
    }
}

/// Build a rule-based scouting report for one player.
pub fn player_fallback(player: &CatalogPlayer) -> PlayerNarrative {
    let tier = tier_for(player);
    let name = &player.name;
    let pos = player.position;
    let floor = tier.floor_min.max(player.proj_ppg - tier.floor_sub);
    let ceiling = player.proj_ppg + tier.ceiling_add;

    let (strengths, weaknesses, recommendations) = match tier.grade {
        Grade::APlus => (
            vec![
                format!("{name} commands elite volume at {pos} and is the focal point of his offense"),
                format!("His projection of {:.1} PPG clears the positional baseline with room to spare", player.proj_ppg),
                format!("High-usage players like {name} are the most matchup-proof assets in fantasy"),
            ],
            vec![
                format!("{name}'s heavy workload carries more injury risk than a committee role"),
                "Defenses key on focal-point players, which can cap isolated weeks".to_string(),
                "Elite production invites regression toward positional averages".to_string(),
            ],
            vec![
                format!("Start {name} every week regardless of matchup"),
                format!("Only move {name} in a trade that returns another elite starter"),
                "Monitor weekly usage; a sustained volume dip is the first warning sign".to_string(),
            ],
        ),
        Grade::B => (
            vec![
                format!("{name} has a clear, established role in his offense"),
                format!("A {:.1} PPG projection gives him a startable weekly floor", player.proj_ppg),
                "Consistent volume makes him dependable in full-point scoring".to_string(),
            ],
            vec![
                format!("{name} shares opportunities, which limits his weekly ceiling"),
                "Tough matchups can push him below the startable line".to_string(),
                "He lacks the standalone upside of a true positional anchor".to_string(),
            ],
            vec![
                format!("Start {name} in most matchups, sit against elite defenses"),
                format!("{name} is fair value in a two-for-one consolidating to a star"),
                "Track his share of opportunities; a rising role raises his value".to_string(),
            ],
        ),
        _ => (
            vec![
                format!("{name} keeps some touchdown equity in his offense"),
                "Soft matchups occasionally make him playable".to_string(),
                "He costs nothing to acquire if his situation improves".to_string(),
            ],
            vec![
                format!("{name}'s {:.1} PPG projection sits below the startable line", player.proj_ppg),
                "His volume is too thin to trust in standard lineups".to_string(),
                "Better options are usually available on waivers".to_string(),
            ],
            vec![
                format!("Avoid starting {name} except as a bye-week desperation play"),
                format!("Trade or drop {name} for any player with a defined role"),
                "Only hold him if a path to a larger role is visible".to_string(),
            ],
        ),
    };

    PlayerNarrative {
        analysis: format!(
            "{name} projects as a {role} at {:.1} PPG, {verdict}.",
            player.proj_ppg,
            role = tier.role,
            verdict = tier.verdict
        ),
        grade: tier.grade.label().to_string(),
        grade_color: tier.grade.color().to_string(),
        strengths,
        weaknesses,
        recommendations,
        weekly_outlook: format!(
            "Weekly floor around {floor:.1} PPG with a ceiling near {ceiling:.1} PPG."
        ),
        trade_value: match tier.grade {
            Grade::APlus => format!("{name} is worth a top starter at RB or WR in any deal."),
            Grade::B => format!("{name} returns a comparable mid-tier starter in a trade."),
            _ => format!("{name} has minimal trade value; package him or move on."),
        },
        roster_strategy: match tier.grade {
            Grade::APlus => format!("Anchor your lineup with {name} and build depth around him."),
            Grade::B => format!("Slot {name} in weekly and upgrade when a clear edge appears."),
            _ => format!("Treat {name} as replaceable depth at the back of the roster."),
        },
        risk_factors: match pos {
            Position::K | Position::DST => {
                "Production is game-script dependent with high week-to-week variance.".to_string()
            }
            _ => format!(
                "Injury, role changes, and matchup swings are the main risks to {name}'s projection."
            ),
        },
    }
}

// ---------------------------------------------------------------------------
// Team fallback
// ---------------------------------------------------------------------------

fn sum_ppg_by_position(roster: &[CatalogPlayer]) -> Vec<(Position, f64)> {
    Position::ALL
        .iter()
        .filter_map(|&pos| {
            let total: f64 = roster
                .iter()
                .filter(|p| p.position == pos)
                .map(|p| p.proj_ppg)
                .sum();
            let present = roster.iter().any(|p| p.position == pos);
            present.then_some((pos, total))
        })
        .collect()
}

fn weakest_position(roster: &[CatalogPlayer]) -> Position {
    sum_ppg_by_position(roster)
        .into_iter()
        .filter(|(pos, _)| !matches!(pos, Position::K | Position::DST))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(pos, _)| pos)
        .unwrap_or(Position::RB)
}

fn targets_at(catalog: &PlayerCatalog, pos: Position, roster: &[CatalogPlayer]) -> Vec<String> {
    let rostered: Vec<&str> = roster.iter().map(|p| p.player_id.as_str()).collect();
    let mut candidates: Vec<&CatalogPlayer> = catalog
        .players
        .iter()
        .filter(|p| {
            p.position == pos
                && p.proj_ppg >= TARGET_MIN_PPG
                && !rostered.contains(&p.player_id.as_str())
        })
        .collect();
    candidates.sort_by(|a, b| {
        b.proj_ppg
            .partial_cmp(&a.proj_ppg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.into_iter().take(3).map(|p| p.name.clone()).collect()
}

fn best_tradeable(roster: &[CatalogPlayer], avoid: Position) -> Option<&CatalogPlayer> {
    roster
        .iter()
        .filter(|p| p.position != avoid && !matches!(p.position, Position::K | Position::DST))
        .max_by(|a, b| {
            a.proj_ppg
                .partial_cmp(&b.proj_ppg)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn count_at(roster: &[CatalogPlayer], pos: Position) -> usize {
    roster.iter().filter(|p| p.position == pos).count()
}

/// Build a rule-based season outlook for a whole roster from its analysis.
pub fn team_fallback(
    result: &AnalysisResult,
    roster: &[CatalogPlayer],
    catalog: &PlayerCatalog,
) -> TeamNarrative {
    let summary = &result.summary;
    let weakest = weakest_position(roster);
    let targets = targets_at(catalog, weakest, roster);
    let send = best_tradeable(roster, weakest).map(|p| p.name.clone());

    let trade_recommendations = if targets.is_empty() {
        vec![format!(
            "No clear upgrade is available at {weakest}; work the waiver wire instead."
        )]
    } else {
        targets
            .iter()
            .map(|target| match &send {
                Some(send) => format!(
                    "Target {target} to upgrade {weakest}, offering from your {send}-led surplus."
                ),
                None => format!("Target {target} to upgrade {weakest}."),
            })
            .collect()
    };

    let rb_count = count_at(roster, Position::RB);
    let wr_count = count_at(roster, Position::WR);
    let te_count = count_at(roster, Position::TE);

    let mut team_strengths = Vec::new();
    if summary.star_count > 0 {
        team_strengths.push(format!(
            "{} starter(s) project well clear of their baselines",
            summary.star_count
        ));
    }
    if summary.bench_depth_count > 0 {
        team_strengths.push(format!(
            "{} bench player(s) are near-starter quality",
            summary.bench_depth_count
        ));
    }
    if rb_count >= 3 {
        team_strengths.push("RB depth covers byes and injuries".to_string());
    }
    if wr_count >= 3 {
        team_strengths.push("WR depth covers byes and injuries".to_string());
    }
    if team_strengths.is_empty() {
        team_strengths.push("Roster balance leaves trade flexibility".to_string());
    }

    let mut team_weaknesses = vec![format!("{weakest} is the thinnest position on the roster")];
    if te_count == 0 {
        team_weaknesses.push("No tight end is currently rostered".to_string());
    }
    if summary.delta < 0.0 {
        team_weaknesses.push("Projected scoring sits below the replacement baseline".to_string());
    }
    if summary.bench_depth_count == 0 {
        team_weaknesses.push("The bench offers little injury insurance".to_string());
    }

    let improvement_strategy = if summary.team_delta_pct >= 0.10 {
        "Consolidate depth into another elite starter and protect your edge.".to_string()
    } else if summary.team_delta_pct >= 0.0 {
        format!("Upgrade {weakest} through a two-for-one trade and build bench depth.")
    } else {
        format!("Aggressively target an elite starter at {weakest}; the roster needs ceiling, not depth.")
    };

    TeamNarrative {
        team_ppg: summary.sum_proj,
        league_average: summary.sum_baseline,
        overall_grade: summary.overall_grade.label().to_string(),
        grade_color: summary.overall_grade.color().to_string(),
        projected_record: summary.projected_record.clone(),
        playoff_odds: format!("{}%", summary.playoff_odds_pct),
        percent_above_average: summary.team_delta_pct * 100.0,
        positional_advantages: format!("{}/{}", summary.advantages_count, result.starters.len()),
        star_players: summary.star_count as u32,
        bench_depth: summary.bench_depth_count as u32,
        weakest_position: weakest.to_string(),
        trade_recommendations,
        team_strengths,
        team_weaknesses,
        improvement_strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_players;
    use crate::catalog::player::{normalize_name, ScoringFormat};
    use crate::config::LeagueSettings;

    fn make_player(name: &str, pos: Position, ppg: f64) -> CatalogPlayer {
        CatalogPlayer {
            player_id: normalize_name(name).replace(' ', "_"),
            name: name.to_string(),
            team: "KC".to_string(),
            position: pos,
            adp: Some(50.0),
            proj_ppg: ppg,
            headshot: None,
        }
    }

    fn make_catalog(players: Vec<CatalogPlayer>) -> PlayerCatalog {
        let name_index = players
            .iter()
            .map(|p| (normalize_name(&p.name), p.player_id.clone()))
            .collect();
        PlayerCatalog {
            players,
            name_index,
            season: 2025,
            format: ScoringFormat::Ppr,
        }
    }

    #[test]
    fn elite_qb_gets_a_plus() {
        let n = player_fallback(&make_player("Josh Allen", Position::QB, 22.0));
        assert_eq!(n.grade, "A+");
        assert_eq!(n.grade_color, Grade::APlus.color());
        assert!(n.analysis.contains("elite QB1"));
        assert_eq!(n.strengths.len(), 3);
        assert_eq!(n.recommendations.len(), 3);
    }

    #[test]
    fn mid_tier_rb_gets_b() {
        let n = player_fallback(&make_player("James Conner", Position::RB, 11.0));
        assert_eq!(n.grade, "B");
        assert!(n.analysis.contains("solid RB2"));
    }

    #[test]
    fn weak_wr_gets_d() {
        let n = player_fallback(&make_player("Bench Guy", Position::WR, 5.0));
        assert_eq!(n.grade, "D");
        assert!(n.analysis.contains("low-end WR3"));
    }

    #[test]
    fn kicker_gets_single_tier_c() {
        let low = player_fallback(&make_player("Low Kicker", Position::K, 4.0));
        let high = player_fallback(&make_player("High Kicker", Position::K, 10.0));
        assert_eq!(low.grade, "C");
        assert_eq!(high.grade, "C");
    }

    #[test]
    fn floor_respects_tier_minimum() {
        // QB at exactly 20.0: floor = max(18, 20 - 3) = 18.0.
        let n = player_fallback(&make_player("Edge QB", Position::QB, 20.0));
        assert!(n.weekly_outlook.contains("18.0"));
        assert!(n.weekly_outlook.contains("28.0"));
    }

    fn fixture_roster() -> Vec<CatalogPlayer> {
        vec![
            make_player("QB One", Position::QB, 20.0),
            make_player("RB One", Position::RB, 15.0),
            make_player("RB Two", Position::RB, 14.0),
            make_player("WR One", Position::WR, 13.0),
            make_player("WR Two", Position::WR, 12.0),
            make_player("TE One", Position::TE, 4.0),
            make_player("Flex Guy", Position::RB, 9.0),
            make_player("K One", Position::K, 7.0),
            make_player("DST One", Position::DST, 6.0),
        ]
    }

    #[test]
    fn team_fallback_reflects_summary() {
        let roster = fixture_roster();
        let mut pool = roster.clone();
        pool.push(make_player("Trade Target TE", Position::TE, 11.0));
        let catalog = make_catalog(pool);
        let settings = LeagueSettings::default();
        let result = analyze_players(&roster, &catalog, &settings);

        let n = team_fallback(&result, &roster, &catalog);
        assert_eq!(n.overall_grade, result.summary.overall_grade.label());
        assert_eq!(n.projected_record, result.summary.projected_record);
        assert!((n.team_ppg - result.summary.sum_proj).abs() < 1e-9);
        assert!(n.playoff_odds.ends_with('%'));
        assert!(n.positional_advantages.contains('/'));
    }

    #[test]
    fn weakest_position_drives_trade_targets() {
        // TE at 4.0 PPG is the thinnest skill position in the fixture.
        let roster = fixture_roster();
        let mut pool = roster.clone();
        pool.push(make_player("Elite TE", Position::TE, 11.0));
        pool.push(make_player("Good TE", Position::TE, 9.0));
        let catalog = make_catalog(pool);
        let settings = LeagueSettings::default();
        let result = analyze_players(&roster, &catalog, &settings);

        let n = team_fallback(&result, &roster, &catalog);
        assert_eq!(n.weakest_position, "TE");
        assert!(n.trade_recommendations[0].contains("Elite TE"));
        // Rostered players are never suggested as targets.
        assert!(!n.trade_recommendations.iter().any(|r| r.contains("TE One")));
    }

    #[test]
    fn no_targets_suggests_waivers() {
        let roster = fixture_roster();
        let catalog = make_catalog(roster.clone());
        let settings = LeagueSettings::default();
        let result = analyze_players(&roster, &catalog, &settings);

        let n = team_fallback(&result, &roster, &catalog);
        assert_eq!(n.trade_recommendations.len(), 1);
        assert!(n.trade_recommendations[0].contains("waiver"));
    }
}
