// Per-player insight lines: curated archetype notes, stack correlation,
// baseline context, and ADP market framing.

use crate::analysis::baselines::Baselines;
use crate::analysis::slot::Slot;
use crate::catalog::player::{normalize_name, CatalogPlayer, Position};

// ---------------------------------------------------------------------------
// Curated archetype tags
// ---------------------------------------------------------------------------

// Small hand-maintained sets. Matching goes through name normalization so
// punctuation and case differences in the input never matter.

const DUAL_THREAT_QBS: &[&str] = &[
    "Lamar Jackson",
    "Jalen Hurts",
    "Josh Allen",
    "Anthony Richardson",
    "Kyler Murray",
    "Justin Fields",
    "Daniel Jones",
];

const ELITE_TES: &[&str] = &[
    "Travis Kelce",
    "Sam LaPorta",
    "Mark Andrews",
    "T.J. Hockenson",
    "George Kittle",
];

const TARGET_HOG_WRS: &[&str] = &[
    "Justin Jefferson",
    "CeeDee Lamb",
    "Ja'Marr Chase",
    "Amon-Ra St. Brown",
    "Davante Adams",
    "Tyreek Hill",
    "A.J. Brown",
    "Puka Nacua",
    "Cooper Kupp",
    "Garrett Wilson",
];

const DEEP_THREAT_WRS: &[&str] = &[
    "Marquise Brown",
    "Jaylen Waddle",
    "DK Metcalf",
    "Christian Watson",
    "Gabe Davis",
    "Tyler Lockett",
];

const WORKHORSE_RBS: &[&str] = &[
    "Christian McCaffrey",
    "Bijan Robinson",
    "Breece Hall",
    "Saquon Barkley",
    "Jonathan Taylor",
    "Derrick Henry",
    "Josh Jacobs",
    "Jahmyr Gibbs",
    "Alvin Kamara",
];

const VOLATILE_PROFILES: &[&str] = &[
    "Marquise Brown",
    "Gabe Davis",
    "Rashod Bateman",
    "Kadarius Toney",
    "Brandin Cooks",
];

fn tagged(name: &str, set: &[&str]) -> bool {
    let key = normalize_name(name);
    set.iter().any(|s| normalize_name(s) == key)
}

// ---------------------------------------------------------------------------
// Insight builder
// ---------------------------------------------------------------------------

/// Build insight lines for one player in the context of the full roster and
/// the league baselines. Always returns at least one line.
pub fn build_insights(
    player: &CatalogPlayer,
    baselines: &Baselines,
    roster: &[CatalogPlayer],
) -> Vec<String> {
    let mut lines = Vec::new();

    match player.position {
        Position::QB if tagged(&player.name, DUAL_THREAT_QBS) => {
            lines.push(
                "Dual-threat profile: rushing attempts add a weekly floor and spike-week ceiling."
                    .to_string(),
            );
        }
        Position::RB if tagged(&player.name, WORKHORSE_RBS) => {
            lines.push(
                "Workhorse usage profile: projects for strong touch share and stable weekly volume."
                    .to_string(),
            );
        }
        Position::TE if tagged(&player.name, ELITE_TES) => {
            lines.push(
                "Elite TE profile: sustained target share with red-zone involvement; positional edge most weeks."
                    .to_string(),
            );
        }
        Position::WR => {
            if tagged(&player.name, TARGET_HOG_WRS) {
                lines.push(
                    "Alpha receiver outlook: projects for top-tier target share and consistent WR1/WR2 production."
                        .to_string(),
                );
            }
            if tagged(&player.name, DEEP_THREAT_WRS) {
                lines.push(
                    "Downfield role: boom-bust scoring but high weekly ceiling on big plays."
                        .to_string(),
                );
            }
        }
        _ => {}
    }

    // Stack correlation with the rest of the roster.
    let teammate = |other: &CatalogPlayer| other.team == player.team && other.name != player.name;
    let has_qb = roster
        .iter()
        .any(|x| teammate(x) && x.position == Position::QB);
    let has_pass_catcher = roster
        .iter()
        .any(|x| teammate(x) && matches!(x.position, Position::WR | Position::TE));
    if player.position == Position::QB && has_pass_catcher {
        lines.push(
            "Positive correlation: QB is stacked with your pass catcher from the same team."
                .to_string(),
        );
    }
    if matches!(player.position, Position::WR | Position::TE) && has_qb {
        lines.push(
            "Positive correlation: pass catcher stacked with your QB; raises ceiling in shootouts."
                .to_string(),
        );
    }

    // Baseline context. QBs compare against QB1, TEs against TE, everyone
    // else against FLEX.
    let slot = match player.position {
        Position::QB => Slot::QB1,
        Position::TE => Slot::TE,
        _ => Slot::FLEX,
    };
    let diff = player.proj_ppg - baselines.get(slot);
    if diff.abs() >= 1.0 {
        lines.push(format!("Projects {diff:+.1} PPG vs {slot} baseline."));
    }

    if tagged(&player.name, VOLATILE_PROFILES) {
        lines.push(
            "Volatility watch: weekly range of outcomes is wider than average; consider matchup-based usage."
                .to_string(),
        );
    }

    if let Some(adp) = player.adp {
        if adp <= 24.0 {
            lines.push("Market price: early-round pick by ADP.".to_string());
        } else if adp <= 60.0 {
            lines.push("Market price: mid-round value by ADP.".to_string());
        } else {
            lines.push("Market price: late-round or bench value by ADP.".to_string());
        }
    }

    if lines.is_empty() {
        lines.push("Solid, startable profile with no standout indicators.".to_string());
    }
    lines
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
