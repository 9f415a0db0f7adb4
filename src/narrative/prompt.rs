// Prompt templates for player and team narrative generation.
//
// Prompts are sectioned plain text carrying pre-computed numbers so the
// model focuses on football context rather than arithmetic, and they pin
// the reply to an exact JSON shape the parser can deserialize.

use crate::catalog::player::{CatalogPlayer, PlayerCatalog};

/// Trade-target candidates must project at least this many PPG.
const TRADE_TARGET_MIN_PPG: f64 = 8.0;

/// How many catalog players the trade-target block lists.
const TRADE_TARGET_COUNT: usize = 20;

/// Return the static system prompt for all narrative LLM calls.
pub fn system_prompt() -> String {
    "You are a fantasy football analyst writing scouting reports for a redraft league.\n\
     \n\
     You will be given pre-computed projections, baselines, and roster data. Use those\n\
     numbers as given - do NOT recompute them. Be specific: name players, cite the\n\
     numbers provided, and give actionable start/sit and trade advice.\n\
     \n\
     Always answer with a single JSON object in exactly the shape requested,\n\
     with no commentary before or after it."
        .to_string()
}

fn format_adp(adp: Option<f64>) -> String {
    match adp {
        Some(a) => format!("{a:.1}"),
        None => "Undrafted".to_string(),
    }
}

fn player_line(p: &CatalogPlayer) -> String {
    format!(
        "- {} ({}, {}, ADP: {}, Proj PPG: {:.1})",
        p.name,
        p.position,
        p.team,
        format_adp(p.adp),
        p.proj_ppg
    )
}

/// Top catalog players worth targeting in trades, best projection first.
pub fn trade_targets(catalog: &PlayerCatalog) -> Vec<&CatalogPlayer> {
    let mut targets: Vec<&CatalogPlayer> = catalog
        .players
        .iter()
        .filter(|p| p.proj_ppg >= TRADE_TARGET_MIN_PPG)
        .collect();
    targets.sort_by(|a, b| {
        b.proj_ppg
            .partial_cmp(&a.proj_ppg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    targets.truncate(TRADE_TARGET_COUNT);
    targets
}

/// Build the prompt for a single-player narrative.
pub fn build_player_prompt(player: &CatalogPlayer) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str("## PLAYER DATA\n");
    prompt.push_str(&format!(
        "Name: {}\nPosition: {}\nTeam: {}\nADP: {}\nProjected PPG: {:.1}\n\n",
        player.name,
        player.position,
        player.team,
        format_adp(player.adp),
        player.proj_ppg
    ));

    prompt.push_str(
        "## TASK\n\
         Write a detailed fantasy scouting report for this player. Answer in exactly\n\
         this JSON shape:\n\n\
         {\n\
           \"analysis\": \"two to four sentences on the player's fantasy outlook\",\n\
           \"grade\": \"A+ through F\",\n\
           \"gradeColor\": \"hex color for the grade\",\n\
           \"strengths\": [\"three specific strengths with reasoning\"],\n\
           \"weaknesses\": [\"three specific weaknesses with reasoning\"],\n\
           \"recommendations\": [\"lineup advice\", \"trade advice\", \"monitoring advice\"],\n\
           \"weeklyOutlook\": \"floor and ceiling PPG with reasoning\",\n\
           \"tradeValue\": \"what a fair return looks like\",\n\
           \"rosterStrategy\": \"how to use this player week to week\",\n\
           \"riskFactors\": \"what could go wrong and what to watch\"\n\
         }\n\n\
         The three recommendations must each cover a different decision: lineup,\n\
         trade strategy, and risk monitoring.\n",
    );

    prompt
}

/// Build the prompt for a whole-team narrative: the roster block plus the
/// trade-target block from the catalog.
pub fn build_team_prompt(roster: &[CatalogPlayer], catalog: &PlayerCatalog) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str("## ROSTER\n");
    for p in roster {
        prompt.push_str(&player_line(p));
        prompt.push('\n');
    }
    prompt.push('\n');

    prompt.push_str("## AVAILABLE TRADE TARGETS\n");
    for p in trade_targets(catalog) {
        prompt.push_str(&player_line(p));
        prompt.push('\n');
    }
    prompt.push('\n');

    prompt.push_str(
        "## TASK\n\
         Analyze this roster and recommend trades using ONLY players named above.\n\
         Answer in exactly this JSON shape:\n\n\
         {\n\
           \"teamPPG\": 0.0,\n\
           \"leagueAverage\": 0.0,\n\
           \"overallGrade\": \"A+ through F\",\n\
           \"gradeColor\": \"hex color for the grade\",\n\
           \"projectedRecord\": \"W-L over 14 games\",\n\
           \"playoffOdds\": \"percentage\",\n\
           \"percentAboveAverage\": 0.0,\n\
           \"positionalAdvantages\": \"x/9\",\n\
           \"starPlayers\": 0,\n\
           \"benchDepth\": 0,\n\
           \"weakestPosition\": \"position needing the biggest upgrade\",\n\
           \"tradeRecommendations\": [\"three trades, each targeting a different player\"],\n\
           \"teamStrengths\": [\"three strengths\"],\n\
           \"teamWeaknesses\": [\"three weaknesses\"],\n\
           \"improvementStrategy\": \"one concrete plan\"\n\
         }\n\n\
         Every trade recommendation must name one player from the roster and one from\n\
         the trade-target list, with reasoning. Never suggest trading draft picks.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::player::{normalize_name, Position, ScoringFormat};

    fn make_player(name: &str, pos: Position, ppg: f64, adp: Option<f64>) -> CatalogPlayer {
        CatalogPlayer {
            player_id: normalize_name(name).replace(' ', "_"),
            name: name.to_string(),
            team: "KC".to_string(),
            position: pos,
            adp,
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
    fn player_prompt_carries_data_and_shape() {
        let player = make_player("Patrick Mahomes", Position::QB, 21.3, Some(18.0));
        let prompt = build_player_prompt(&player);

        assert!(prompt.contains("## PLAYER DATA"));
        assert!(prompt.contains("Name: Patrick Mahomes"));
        assert!(prompt.contains("ADP: 18.0"));
        assert!(prompt.contains("Projected PPG: 21.3"));
        assert!(prompt.contains("\"weeklyOutlook\""));
    }

    #[test]
    fn undrafted_players_say_so() {
        let player = make_player("Deep Sleeper", Position::WR, 6.0, None);
        let prompt = build_player_prompt(&player);
        assert!(prompt.contains("ADP: Undrafted"));
    }

    #[test]
    fn trade_targets_filter_and_rank() {
        let catalog = make_catalog(vec![
            make_player("Low Guy", Position::WR, 5.0, None),
            make_player("Mid Guy", Position::RB, 12.0, None),
            make_player("Top Guy", Position::QB, 22.0, None),
        ]);
        let targets = trade_targets(&catalog);
        let names: Vec<&str> = targets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Top Guy", "Mid Guy"]);
    }

    #[test]
    fn trade_targets_cap_at_twenty() {
        let players = (0..30)
            .map(|i| make_player(&format!("Guy {i}"), Position::WR, 9.0 + i as f64 * 0.1, None))
            .collect();
        let catalog = make_catalog(players);
        assert_eq!(trade_targets(&catalog).len(), 20);
    }

    #[test]
    fn team_prompt_sections_in_order() {
        let roster = vec![make_player("My Starter", Position::RB, 14.0, Some(20.0))];
        let catalog = make_catalog(vec![make_player("Target Guy", Position::WR, 13.0, None)]);
        let prompt = build_team_prompt(&roster, &catalog);

        let roster_at = prompt.find("## ROSTER").unwrap();
        let targets_at = prompt.find("## AVAILABLE TRADE TARGETS").unwrap();
        let task_at = prompt.find("## TASK").unwrap();
        assert!(roster_at < targets_at && targets_at < task_at);
        assert!(prompt.contains("My Starter"));
        assert!(prompt.contains("Target Guy"));
        assert!(prompt.contains("\"tradeRecommendations\""));
    }
}
