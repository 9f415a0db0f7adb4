// Player data model: positions, catalog records, and the name-indexed catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Fantasy football positions carried by catalog players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Accepts feed-style aliases: "DEF" and "D/ST" both map to DST.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DST" | "DEF" | "D/ST" => Some(Position::DST),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }

    /// Whether players at this position may fill the FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(self, Position::RB | Position::WR | Position::TE)
    }

    /// Deterministic ordering index for catalog and report display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::QB => 0,
            Position::RB => 1,
            Position::WR => 2,
            Position::TE => 3,
            Position::K => 4,
            Position::DST => 5,
        }
    }

    /// All six positions in display order.
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DST,
    ];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Scoring format
// ---------------------------------------------------------------------------

/// League scoring format. Baked into each player's proj_ppg; the analysis
/// arithmetic never branches on it, but the ADP feed is format-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFormat {
    #[default]
    Ppr,
    HalfPpr,
    Standard,
}

impl ScoringFormat {
    /// Parse a scoring format string. Accepts "ppr", "half_ppr"/"half-ppr",
    /// and "standard"/"std", case-insensitive.
    pub fn from_str_format(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ppr" => Some(ScoringFormat::Ppr),
            "half_ppr" | "half-ppr" | "half" => Some(ScoringFormat::HalfPpr),
            "standard" | "std" => Some(ScoringFormat::Standard),
            _ => None,
        }
    }

    /// The query-parameter value the ADP feed expects for this format.
    pub fn feed_param(&self) -> &'static str {
        match self {
            ScoringFormat::Ppr => "ppr",
            ScoringFormat::HalfPpr => "half_ppr",
            ScoringFormat::Standard => "std",
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.feed_param())
    }
}

// ---------------------------------------------------------------------------
// Catalog player
// ---------------------------------------------------------------------------

/// One player record as loaded from the catalog feed. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPlayer {
    /// Stable feed identifier.
    pub player_id: String,
    pub name: String,
    /// Team code, "FA" when the player has no team.
    pub team: String,
    pub position: Position,
    /// Average draft position; lower drafts earlier. Absent for undrafted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adp: Option<f64>,
    /// Projected fantasy points per game, never negative.
    pub proj_ppg: f64,
    /// Display art reference (team logo URL for now).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshot: Option<String>,
}

// ---------------------------------------------------------------------------
// Name normalization
// ---------------------------------------------------------------------------

/// Normalize a free-text player name into an index key: lowercase, collapse
/// every non-alphanumeric run into a single space, trim.
///
/// "Amon-Ra St. Brown" and "amon ra st brown" normalize identically.
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let spaced: String = lowered
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Player catalog
// ---------------------------------------------------------------------------

/// The full player pool for a season plus a normalized-name lookup index.
///
/// `name_index` is many-to-one: several normalized name variants may map to
/// the same player id. The catalog is a read-only snapshot for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCatalog {
    pub players: Vec<CatalogPlayer>,
    pub name_index: HashMap<String, String>,
    pub season: u16,
    pub format: ScoringFormat,
}

impl PlayerCatalog {
    /// Catalog with no players, for degenerate inputs and tests.
    pub fn empty(season: u16, format: ScoringFormat) -> Self {
        PlayerCatalog {
            players: Vec::new(),
            name_index: HashMap::new(),
            season,
            format,
        }
    }

    /// Look up a player by feed identifier.
    pub fn by_id(&self, player_id: &str) -> Option<&CatalogPlayer> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Look up a player by free-text name via the normalized index.
    pub fn by_name(&self, raw_name: &str) -> Option<&CatalogPlayer> {
        let key = normalize_name(raw_name);
        let pid = self.name_index.get(&key)?;
        self.by_id(pid)
    }

    /// All players at one position, in catalog order.
    pub fn players_at(&self, pos: Position) -> Vec<&CatalogPlayer> {
        self.players.iter().filter(|p| p.position == pos).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
