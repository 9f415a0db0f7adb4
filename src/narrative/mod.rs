// Narrative generation: prose scouting reports for players and teams.
//
// An LLM-backed client produces the narratives when an API key is
// configured; otherwise (or on any API or parse failure) rule-based
// fallbacks derived from the analysis data take over. Nothing in the
// analysis core depends on these outputs.

pub mod client;
pub mod fallback;
pub mod parse;
pub mod prompt;

use serde::{Deserialize, Serialize};

pub use client::NarrativeClient;

/// Scouting narrative for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNarrative {
    pub analysis: String,
    pub grade: String,
    pub grade_color: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub weekly_outlook: String,
    pub trade_value: String,
    pub roster_strategy: String,
    pub risk_factors: String,
}

/// Season narrative for a whole roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamNarrative {
    /// Wire key is `teamPPG`, not the `teamPpg` that camelCase would derive.
    #[serde(rename = "teamPPG")]
    pub team_ppg: f64,
    pub league_average: f64,
    pub overall_grade: String,
    pub grade_color: String,
    pub projected_record: String,
    pub playoff_odds: String,
    pub percent_above_average: f64,
    pub positional_advantages: String,
    pub star_players: u32,
    pub bench_depth: u32,
    pub weakest_position: String,
    pub trade_recommendations: Vec<String>,
    pub team_strengths: Vec<String>,
    pub team_weaknesses: Vec<String>,
    pub improvement_strategy: String,
}
