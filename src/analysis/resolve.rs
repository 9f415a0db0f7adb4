// Free-text name resolution against the player catalog.
//
// Resolution is total: a name that misses the catalog resolves to a
// placeholder player rather than an error, so a single typo never sinks an
// otherwise valid roster analysis.

use tracing::warn;

use crate::catalog::player::{normalize_name, CatalogPlayer, PlayerCatalog, Position};

/// Identifier prefix for placeholder players synthesized for unresolved names.
pub const UNKNOWN_ID_PREFIX: &str = "unknown_";

/// Projection assigned to an unresolved player: enough to occupy a bench or
/// FLEX spot without distorting the starting lineup.
pub const PLACEHOLDER_PROJ_PPG: f64 = 7.0;

/// Resolve one free-text name. Catalog hits come back as-is; misses produce
/// a WR placeholder so the caller always gets a player.
pub fn resolve_name(raw: &str, catalog: &PlayerCatalog) -> CatalogPlayer {
    if let Some(player) = catalog.by_name(raw) {
        return player.clone();
    }
    warn!(name = raw, "player not found in catalog, using placeholder");
    placeholder_for(raw)
}

/// Resolve a whole roster of free-text names, preserving input order
/// (including duplicates).
pub fn resolve_roster(names: &[String], catalog: &PlayerCatalog) -> Vec<CatalogPlayer> {
    names.iter().map(|n| resolve_name(n, catalog)).collect()
}

fn placeholder_for(raw: &str) -> CatalogPlayer {
    CatalogPlayer {
        player_id: format!("{UNKNOWN_ID_PREFIX}{}", normalize_name(raw)),
        name: raw.trim().to_string(),
        team: "FA".to_string(),
        position: Position::WR,
        adp: None,
        proj_ppg: PLACEHOLDER_PROJ_PPG,
        headshot: None,
    }
}
