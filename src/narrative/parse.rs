// Parsing model replies into typed narratives.
//
// Replies are asked for as bare JSON but often arrive wrapped in a ```json
// fence and with cramped sentence spacing. The parser strips the fence,
// deserializes into the typed struct, and normalizes whitespace in every
// text field.

use crate::narrative::{PlayerNarrative, TeamNarrative};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("reply contained no parseable JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extract the JSON payload from a reply, stripping a ```json (or bare ```)
/// fence when present.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let inner = if let Some(rest) = text.split_once("```json").map(|(_, r)| r) {
        rest
    } else if let Some(rest) = text.split_once("```").map(|(_, r)| r) {
        rest
    } else {
        return text.trim();
    };
    inner.split("```").next().unwrap_or(inner).trim()
}

/// Normalize sentence spacing: ensure a space after `.`, `!`, `?` when the
/// next character is uppercase, then collapse all whitespace runs.
pub(crate) fn clean_text(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        spaced.push(c);
        if matches!(c, '.' | '!' | '?') {
            if let Some(next) = chars.peek() {
                if next.is_uppercase() {
                    spaced.push(' ');
                }
            }
        }
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_all(items: &mut Vec<String>) {
    for item in items {
        *item = clean_text(item);
    }
}

/// Parse a model reply into a [`PlayerNarrative`].
pub fn parse_player_narrative(reply: &str) -> Result<PlayerNarrative, ParseError> {
    let mut narrative: PlayerNarrative = serde_json::from_str(strip_code_fence(reply))?;
    narrative.analysis = clean_text(&narrative.analysis);
    clean_all(&mut narrative.strengths);
    clean_all(&mut narrative.weaknesses);
    clean_all(&mut narrative.recommendations);
    narrative.weekly_outlook = clean_text(&narrative.weekly_outlook);
    narrative.trade_value = clean_text(&narrative.trade_value);
    narrative.roster_strategy = clean_text(&narrative.roster_strategy);
    narrative.risk_factors = clean_text(&narrative.risk_factors);
    Ok(narrative)
}

/// Parse a model reply into a [`TeamNarrative`].
pub fn parse_team_narrative(reply: &str) -> Result<TeamNarrative, ParseError> {
    let mut narrative: TeamNarrative = serde_json::from_str(strip_code_fence(reply))?;
    narrative.weakest_position = clean_text(&narrative.weakest_position);
    clean_all(&mut narrative.trade_recommendations);
    clean_all(&mut narrative.team_strengths);
    clean_all(&mut narrative.team_weaknesses);
    narrative.improvement_strategy = clean_text(&narrative.improvement_strategy);
    Ok(narrative)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_JSON: &str = r##"{
        "analysis": "Strong outlook.Volume is elite.",
        "grade": "A",
        "gradeColor": "#5eead4",
        "strengths": ["Target share.Leads the team"],
        "weaknesses": ["Tough schedule"],
        "recommendations": ["Start weekly"],
        "weeklyOutlook": "Floor 10, ceiling 22",
        "tradeValue": "WR1 return",
        "rosterStrategy": "Anchor starter",
        "riskFactors": "Minimal"
    }"##;

    const TEAM_JSON: &str = r##"{
        "teamPPG": 101.5,
        "leagueAverage": 95.0,
        "overallGrade": "B+",
        "gradeColor": "#6ee7b7",
        "projectedRecord": "9-5",
        "playoffOdds": "72%",
        "percentAboveAverage": 6.8,
        "positionalAdvantages": "6/9",
        "starPlayers": 2,
        "benchDepth": 3,
        "weakestPosition": "TE",
        "tradeRecommendations": ["Upgrade TE.Move a bench RB"],
        "teamStrengths": ["RB room"],
        "teamWeaknesses": ["TE"],
        "improvementStrategy": "Trade from depth"
    }"##;

    #[test]
    fn strips_json_fence() {
        let fenced = format!("```json\n{PLAYER_JSON}\n```");
        assert_eq!(strip_code_fence(&fenced), PLAYER_JSON.trim());
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = format!("Here you go:\n```\n{PLAYER_JSON}\n```");
        assert_eq!(strip_code_fence(&fenced), PLAYER_JSON.trim());
    }

    #[test]
    fn unfenced_text_passes_through() {
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn clean_text_spaces_sentences() {
        assert_eq!(clean_text("One.Two!Three?Four"), "One. Two! Three? Four");
        assert_eq!(clean_text("v1.5 scoring"), "v1.5 scoring");
        assert_eq!(clean_text("a  lot   of  space"), "a lot of space");
        assert_eq!(clean_text("  padded  "), "padded");
    }

    #[test]
    fn parses_fenced_player_narrative() {
        let fenced = format!("```json\n{PLAYER_JSON}\n```");
        let narrative = parse_player_narrative(&fenced).unwrap();
        assert_eq!(narrative.grade, "A");
        assert_eq!(narrative.analysis, "Strong outlook. Volume is elite.");
        assert_eq!(narrative.strengths[0], "Target share. Leads the team");
    }

    #[test]
    fn parses_team_narrative() {
        let narrative = parse_team_narrative(TEAM_JSON).unwrap();
        assert_eq!(narrative.overall_grade, "B+");
        assert!((narrative.team_ppg - 101.5).abs() < 1e-9);
        assert_eq!(
            narrative.trade_recommendations[0],
            "Upgrade TE. Move a bench RB"
        );
    }

    #[test]
    fn team_ppg_wire_key_keeps_its_capitalization() {
        let narrative = parse_team_narrative(TEAM_JSON).unwrap();
        let value = serde_json::to_value(&narrative).unwrap();
        assert!(value.get("teamPPG").is_some());
        assert!(value.get("teamPpg").is_none());
    }

    #[test]
    fn garbage_reply_is_an_error() {
        assert!(parse_player_narrative("I cannot answer that.").is_err());
        assert!(parse_team_narrative("```json\nnot json\n```").is_err());
    }

    #[test]
    fn missing_fields_are_an_error() {
        assert!(parse_player_narrative(r#"{"analysis":"only this"}"#).is_err());
    }
}
