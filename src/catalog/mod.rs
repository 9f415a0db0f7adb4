// Player catalog: data model, feed ingestion, caching, and snapshots.

pub mod cache;
pub mod player;
pub mod projection;
pub mod snapshot;

use async_trait::async_trait;
use chrono::Datelike;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::catalog::cache::CatalogStore;
use crate::catalog::player::{
    normalize_name, CatalogPlayer, PlayerCatalog, Position, ScoringFormat,
};
use crate::catalog::projection::approx_ppg;
use crate::logos::team_logo;

// ---------------------------------------------------------------------------
// Feed types
// ---------------------------------------------------------------------------

/// Raw player record as delivered by the catalog feed. Everything is
/// optional; catalog building decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedPlayer {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub search_full_name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
}

/// One row of the ADP feed.
#[derive(Debug, Clone, Deserialize)]
pub struct AdpEntry {
    pub player_id: String,
    pub adp: Option<f64>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog feed error: {0}")]
    Feed(#[from] crate::sleeper::SleeperError),

    #[error(transparent)]
    Snapshot(#[from] snapshot::SnapshotError),
}

// ---------------------------------------------------------------------------
// Ingestion boundary
// ---------------------------------------------------------------------------

/// Upstream source for the player pool and ADP data. A trait so tests (and
/// offline runs) can inject stub data instead of the live feed.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_players(&self) -> Result<HashMap<String, FeedPlayer>, CatalogError>;
    async fn fetch_adp(
        &self,
        season: u16,
        format: ScoringFormat,
    ) -> Result<Vec<AdpEntry>, CatalogError>;
}

// ---------------------------------------------------------------------------
// Catalog building
// ---------------------------------------------------------------------------

/// The season currently being drafted: the calendar year, rolling over in
/// March when the league year starts.
pub fn current_season() -> u16 {
    let now = chrono::Utc::now();
    let year = now.year() as u16;
    if now.month() < 3 {
        year - 1
    } else {
        year
    }
}

fn display_name(feed: &FeedPlayer) -> Option<String> {
    if let Some(full) = feed.full_name.as_deref() {
        let full = full.trim();
        if !full.is_empty() {
            return Some(full.to_string());
        }
    }
    let first = feed.first_name.as_deref().unwrap_or("").trim();
    let last = feed.last_name.as_deref().unwrap_or("").trim();
    let joined = format!("{first} {last}");
    let joined = joined.trim();
    if joined.is_empty() {
        None
    } else {
        Some(joined.to_string())
    }
}

/// Build a catalog from raw feed records and ADP rows.
///
/// Keeps only fantasy-relevant positions, derives proj_ppg from ADP, attaches
/// team art, and indexes every normalized name variant the feed offers.
pub fn build_catalog(
    feed: &HashMap<String, FeedPlayer>,
    adp_rows: &[AdpEntry],
    season: u16,
    format: ScoringFormat,
) -> PlayerCatalog {
    let adp_by_id: HashMap<&str, f64> = adp_rows
        .iter()
        .filter_map(|e| Some((e.player_id.as_str(), e.adp?)))
        .filter(|(_, a)| a.is_finite())
        .collect();

    let mut players = Vec::new();
    let mut name_index = HashMap::new();

    for (player_id, raw) in feed {
        let Some(position) = raw.position.as_deref().and_then(Position::from_str_pos) else {
            continue;
        };
        let Some(name) = display_name(raw) else {
            continue;
        };
        let team = raw
            .team
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("FA")
            .to_string();

        let adp = adp_by_id.get(player_id.as_str()).copied();
        let proj_ppg = approx_ppg(position, adp);

        let first_last = format!(
            "{} {}",
            raw.first_name.as_deref().unwrap_or(""),
            raw.last_name.as_deref().unwrap_or("")
        );
        for variant in [
            Some(name.as_str()),
            raw.search_full_name.as_deref(),
            Some(first_last.as_str()),
        ]
        .into_iter()
        .flatten()
        {
            let key = normalize_name(variant);
            if !key.is_empty() {
                name_index.insert(key, player_id.clone());
            }
        }

        players.push(CatalogPlayer {
            player_id: player_id.clone(),
            name,
            team: team.clone(),
            position,
            adp,
            proj_ppg,
            headshot: Some(team_logo(&team).to_string()),
        });
    }

    players.sort_by(|a, b| {
        a.position
            .sort_order()
            .cmp(&b.position.sort_order())
            .then_with(|| a.name.cmp(&b.name))
    });

    PlayerCatalog {
        players,
        name_index,
        season,
        format,
    }
}

// ---------------------------------------------------------------------------
// Catalog loading
// ---------------------------------------------------------------------------

/// ADP feeds lag early in the season: try this season then last, and each
/// scoring format in turn. The first non-empty list wins; total failure just
/// means no ADP, which the projection curve tolerates.
async fn fetch_adp_cascade(source: &dyn CatalogSource, season: u16) -> Vec<AdpEntry> {
    const FORMATS: [ScoringFormat; 3] = [
        ScoringFormat::Ppr,
        ScoringFormat::HalfPpr,
        ScoringFormat::Standard,
    ];
    for s in [season, season.saturating_sub(1)] {
        for f in FORMATS {
            match source.fetch_adp(s, f).await {
                Ok(rows) if !rows.is_empty() => {
                    debug!(season = s, format = %f, rows = rows.len(), "ADP feed hit");
                    return rows;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(season = s, format = %f, "ADP fetch failed: {}", e);
                }
            }
        }
    }
    warn!("no ADP data available, projections fall back to positional defaults");
    Vec::new()
}

/// Load the player catalog, preferring a fresh cached copy over the network.
pub async fn load_catalog(
    source: &dyn CatalogSource,
    store: &dyn CatalogStore,
    season: u16,
    format: ScoringFormat,
) -> Result<PlayerCatalog, CatalogError> {
    if let Some(catalog) = store.get() {
        debug!(players = catalog.len(), "using cached catalog");
        return Ok(catalog);
    }

    let feed = source.fetch_players().await?;
    let adp = fetch_adp_cascade(source, season).await;
    let catalog = build_catalog(&feed, &adp, season, format);
    debug!(players = catalog.len(), season, "built catalog from feed");

    store.set(catalog.clone());
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
