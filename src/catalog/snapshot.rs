// Catalog persistence as CSV snapshots.
//
// One row per player, with the catalog-level season/format and a save
// timestamp carried on every row so a snapshot is self-describing. Malformed
// rows are skipped with a warning, never fatal.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;
use tracing::warn;

use crate::catalog::player::{
    normalize_name, CatalogPlayer, PlayerCatalog, Position, ScoringFormat,
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in snapshot {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("snapshot {path} produced zero valid rows")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct RawSnapshotRow {
    player_id: String,
    name: String,
    team: String,
    position: String,
    adp: Option<f64>,
    proj_ppg: f64,
    headshot: Option<String>,
    season: u16,
    format: String,
    saved_at: String,
}

// ---------------------------------------------------------------------------
// Writer/reader-based codecs (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn write_snapshot_to<W: Write>(catalog: &PlayerCatalog, wtr: W) -> Result<(), csv::Error> {
    let saved_at = chrono::Utc::now().to_rfc3339();
    let mut writer = csv::Writer::from_writer(wtr);
    for p in &catalog.players {
        writer.serialize(RawSnapshotRow {
            player_id: p.player_id.clone(),
            name: p.name.clone(),
            team: p.team.clone(),
            position: p.position.display_str().to_string(),
            adp: p.adp,
            proj_ppg: p.proj_ppg,
            headshot: p.headshot.clone(),
            season: catalog.season,
            format: catalog.format.feed_param().to_string(),
            saved_at: saved_at.clone(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn read_snapshot_from<R: Read>(rdr: R) -> Result<Option<PlayerCatalog>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players: Vec<CatalogPlayer> = Vec::new();
    let mut header: Option<(u16, ScoringFormat)> = None;

    for result in reader.deserialize::<RawSnapshotRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed snapshot row: {}", e);
                continue;
            }
        };
        let Some(position) = Position::from_str_pos(&raw.position) else {
            warn!(
                "skipping snapshot row for '{}': unknown position '{}'",
                raw.name.trim(),
                raw.position
            );
            continue;
        };
        if !raw.proj_ppg.is_finite() || raw.proj_ppg < 0.0 {
            warn!(
                "skipping snapshot row for '{}': bad proj_ppg {}",
                raw.name.trim(),
                raw.proj_ppg
            );
            continue;
        }
        if header.is_none() {
            let format = ScoringFormat::from_str_format(&raw.format).unwrap_or_else(|| {
                warn!("unknown scoring format '{}', assuming ppr", raw.format);
                ScoringFormat::default()
            });
            header = Some((raw.season, format));
        }
        players.push(CatalogPlayer {
            player_id: raw.player_id,
            name: raw.name.trim().to_string(),
            team: raw.team.trim().to_string(),
            position,
            adp: raw.adp.filter(|a| a.is_finite()),
            proj_ppg: raw.proj_ppg,
            headshot: raw.headshot.filter(|h| !h.is_empty()),
        });
    }

    let Some((season, format)) = header else {
        return Ok(None);
    };
    let name_index = build_name_index(&players);
    Ok(Some(PlayerCatalog {
        players,
        name_index,
        season,
        format,
    }))
}

fn build_name_index(players: &[CatalogPlayer]) -> HashMap<String, String> {
    let mut index = HashMap::new();
    for p in players {
        let key = normalize_name(&p.name);
        if !key.is_empty() {
            index.insert(key, p.player_id.clone());
        }
    }
    index
}

// ---------------------------------------------------------------------------
// Public path-based API
// ---------------------------------------------------------------------------

/// Write the catalog to a CSV snapshot, creating parent directories.
pub fn save_snapshot(catalog: &PlayerCatalog, path: &Path) -> Result<(), SnapshotError> {
    let io_err = |e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let file = std::fs::File::create(path).map_err(io_err)?;
    write_snapshot_to(catalog, file).map_err(|e| SnapshotError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load a catalog from a CSV snapshot, rebuilding the name index.
pub fn load_snapshot(path: &Path) -> Result<PlayerCatalog, SnapshotError> {
    let file = std::fs::File::open(path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let catalog = read_snapshot_from(file).map_err(|e| SnapshotError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    catalog.ok_or_else(|| SnapshotError::Empty {
        path: path.display().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
