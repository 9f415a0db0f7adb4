// Sleeper API client: player pool, ADP feed, and league import.
//
// All endpoints are unauthenticated GETs returning JSON. Each failure mode
// (request, bad status, decode) carries the endpoint that produced it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::catalog::player::ScoringFormat;
use crate::catalog::{AdpEntry, CatalogError, CatalogSource, FeedPlayer};

pub const DEFAULT_API_BASE: &str = "https://api.sleeper.app";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SleeperError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

// ---------------------------------------------------------------------------
// League import types
// ---------------------------------------------------------------------------

/// One fantasy team inside an imported league.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueTeam {
    pub roster_id: u64,
    pub owner_id: Option<String>,
    pub owner_name: String,
    /// Player ids currently slotted as starters.
    pub starters: Vec<String>,
    /// Every player id on the roster.
    pub players: Vec<String>,
}

/// A league imported from Sleeper: metadata plus all rosters joined to their
/// owners.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueImport {
    pub league_id: String,
    pub name: String,
    pub season: Option<u16>,
    pub total_rosters: Option<usize>,
    pub teams: Vec<LeagueTeam>,
}

// ---------------------------------------------------------------------------
// Raw wire structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLeague {
    name: Option<String>,
    season: Option<String>,
    total_rosters: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    user_id: String,
    display_name: Option<String>,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRoster {
    roster_id: u64,
    owner_id: Option<String>,
    starters: Option<Vec<Value>>,
    players: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawAdpRow {
    player_id: Value,
    adp: Option<f64>,
}

// ---------------------------------------------------------------------------
// Parse helpers
// ---------------------------------------------------------------------------

/// Owner display name with fallbacks: display_name, then username, then
/// "Unknown". Empty strings count as missing.
pub(crate) fn owner_name(user: Option<&RawUser>) -> String {
    user.and_then(|u| {
        u.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(u.username.as_deref().filter(|s| !s.is_empty()))
    })
    .unwrap_or("Unknown")
    .to_string()
}

/// Roster id arrays mix strings with nulls and numeric fillers; keep only the
/// string entries.
pub(crate) fn string_ids(values: Option<&[Value]>) -> Vec<String> {
    values
        .unwrap_or(&[])
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn adp_entry(raw: RawAdpRow) -> Option<AdpEntry> {
    let player_id = match raw.player_id {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => {
            warn!("skipping ADP row with non-id player_id: {}", other);
            return None;
        }
    };
    Some(AdpEntry {
        player_id,
        adp: raw.adp,
    })
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Point the client at a different base URL (config override, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        SleeperClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, SleeperError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "sleeper GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SleeperError::Request {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SleeperError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| SleeperError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    /// Fetch the full NFL player pool, keyed by player id.
    pub async fn players(&self) -> Result<HashMap<String, FeedPlayer>, SleeperError> {
        self.get_json("/v1/players/nfl").await
    }

    /// Fetch ADP rows for one season and scoring format.
    pub async fn adp(
        &self,
        season: u16,
        format: ScoringFormat,
    ) -> Result<Vec<AdpEntry>, SleeperError> {
        let endpoint = format!(
            "/v1/adp/nfl/{season}?season_type=regular&format={}",
            format.feed_param()
        );
        let rows: Vec<RawAdpRow> = self.get_json(&endpoint).await?;
        Ok(rows.into_iter().filter_map(adp_entry).collect())
    }

    /// Import a league: metadata, users, and rosters fetched concurrently,
    /// rosters joined to their owners.
    pub async fn import_league(&self, league_id: &str) -> Result<LeagueImport, SleeperError> {
        let league_path = format!("/v1/league/{league_id}");
        let users_path = format!("/v1/league/{league_id}/users");
        let rosters_path = format!("/v1/league/{league_id}/rosters");
        let (league, users, rosters) = tokio::try_join!(
            self.get_json::<RawLeague>(&league_path),
            self.get_json::<Vec<RawUser>>(&users_path),
            self.get_json::<Vec<RawRoster>>(&rosters_path),
        )?;

        let user_by_id: HashMap<&str, &RawUser> =
            users.iter().map(|u| (u.user_id.as_str(), u)).collect();

        let teams = rosters
            .into_iter()
            .map(|r| {
                let user = r
                    .owner_id
                    .as_deref()
                    .and_then(|id| user_by_id.get(id).copied());
                LeagueTeam {
                    roster_id: r.roster_id,
                    owner_name: owner_name(user),
                    owner_id: r.owner_id,
                    starters: string_ids(r.starters.as_deref()),
                    players: string_ids(r.players.as_deref()),
                }
            })
            .collect();

        Ok(LeagueImport {
            league_id: league_id.to_string(),
            name: league.name.unwrap_or_else(|| "Unnamed League".to_string()),
            season: league.season.and_then(|s| s.parse().ok()),
            total_rosters: league.total_rosters,
            teams,
        })
    }
}

impl Default for SleeperClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for SleeperClient {
    async fn fetch_players(&self) -> Result<HashMap<String, FeedPlayer>, CatalogError> {
        Ok(self.players().await?)
    }

    async fn fetch_adp(
        &self,
        season: u16,
        format: ScoringFormat,
    ) -> Result<Vec<AdpEntry>, CatalogError> {
        Ok(self.adp(season, format).await?)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Parse helpers --

    fn user(display: Option<&str>, username: Option<&str>) -> RawUser {
        RawUser {
            user_id: "u1".to_string(),
            display_name: display.map(str::to_string),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn owner_name_prefers_display_name() {
        let u = user(Some("Coach Dan"), Some("dan99"));
        assert_eq!(owner_name(Some(&u)), "Coach Dan");
    }

    #[test]
    fn owner_name_falls_back_to_username() {
        let u = user(None, Some("dan99"));
        assert_eq!(owner_name(Some(&u)), "dan99");
        let u = user(Some(""), Some("dan99"));
        assert_eq!(owner_name(Some(&u)), "dan99");
    }

    #[test]
    fn owner_name_defaults_to_unknown() {
        assert_eq!(owner_name(None), "Unknown");
        let u = user(None, None);
        assert_eq!(owner_name(Some(&u)), "Unknown");
        let u = user(Some(""), Some(""));
        assert_eq!(owner_name(Some(&u)), "Unknown");
    }

    #[test]
    fn string_ids_drops_non_strings() {
        let values = vec![
            Value::String("1234".to_string()),
            Value::Null,
            Value::Number(7.into()),
            Value::String("5678".to_string()),
        ];
        assert_eq!(string_ids(Some(&values)), vec!["1234", "5678"]);
        assert!(string_ids(None).is_empty());
    }

    #[test]
    fn adp_entry_accepts_string_and_numeric_ids() {
        let row: RawAdpRow = serde_json::from_str(r#"{"player_id":"4034","adp":12.5}"#).unwrap();
        let entry = adp_entry(row).unwrap();
        assert_eq!(entry.player_id, "4034");
        assert_eq!(entry.adp, Some(12.5));

        let row: RawAdpRow = serde_json::from_str(r#"{"player_id":4034,"adp":null}"#).unwrap();
        let entry = adp_entry(row).unwrap();
        assert_eq!(entry.player_id, "4034");
        assert_eq!(entry.adp, None);

        let row: RawAdpRow = serde_json::from_str(r#"{"player_id":null,"adp":1.0}"#).unwrap();
        assert!(adp_entry(row).is_none());
    }

    // -- Mock TCP server tests --

    async fn mock_server(body: &'static str, status_line: &'static str) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
        });

        addr
    }

    #[tokio::test]
    async fn players_endpoint_decodes_feed_map() {
        let body = r#"{
            "4034": {"full_name":"Patrick Mahomes","first_name":"Patrick","last_name":"Mahomes","search_full_name":"patrickmahomes","team":"KC","position":"QB"},
            "9999": {"position":"OT","first_name":"Big","last_name":"Blocker"}
        }"#;
        let addr = mock_server(body, "HTTP/1.1 200 OK").await;

        let client = SleeperClient::with_base_url(format!("http://{addr}"));
        let players = client.players().await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(
            players["4034"].full_name.as_deref(),
            Some("Patrick Mahomes")
        );
        assert_eq!(players["9999"].position.as_deref(), Some("OT"));
    }

    #[tokio::test]
    async fn adp_endpoint_decodes_rows() {
        let body = r#"[
            {"player_id":"4034","adp":3.2},
            {"player_id":4881,"adp":1.1},
            {"player_id":null,"adp":9.9}
        ]"#;
        let addr = mock_server(body, "HTTP/1.1 200 OK").await;

        let client = SleeperClient::with_base_url(format!("http://{addr}"));
        let rows = client.adp(2025, ScoringFormat::Ppr).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player_id, "4034");
        assert_eq!(rows[1].player_id, "4881");
    }

    #[tokio::test]
    async fn error_status_becomes_typed_error() {
        let addr = mock_server(r#"{"error":"not found"}"#, "HTTP/1.1 404 Not Found").await;

        let client = SleeperClient::with_base_url(format!("http://{addr}"));
        let err = client.players().await.unwrap_err();
        match err {
            SleeperError::Status { endpoint, status } => {
                assert_eq!(endpoint, "/v1/players/nfl");
                assert_eq!(status, 404);
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_becomes_decode_error() {
        let addr = mock_server("this is not json", "HTTP/1.1 200 OK").await;

        let client = SleeperClient::with_base_url(format!("http://{addr}"));
        let err = client.players().await.unwrap_err();
        assert!(matches!(err, SleeperError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_server_becomes_request_error() {
        // Bind and immediately drop a listener to get a dead port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SleeperClient::with_base_url(format!("http://{addr}"));
        let err = client.players().await.unwrap_err();
        assert!(matches!(err, SleeperError::Request { .. }));
    }

    #[tokio::test]
    async fn import_league_joins_rosters_to_owners() {
        // One listener serving three sequential requests. try_join! issues
        // them concurrently, so accept in a loop and answer by path.
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for _ in 0..3 {
                let (mut socket, _) = listener.accept().await.unwrap();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();

                    let body = if request.contains("/users") {
                        r#"[{"user_id":"u1","display_name":"Coach Dan","username":"dan99"},
                            {"user_id":"u2","display_name":"","username":"silent_owner"}]"#
                    } else if request.contains("/rosters") {
                        r#"[{"roster_id":1,"owner_id":"u1","starters":["100","101"],"players":["100","101","102"]},
                            {"roster_id":2,"owner_id":"u2","starters":["200",null],"players":["200",300]},
                            {"roster_id":3,"owner_id":null,"starters":[],"players":[]}]"#
                    } else {
                        r#"{"name":"Test League","season":"2025","total_rosters":3}"#
                    };

                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.flush().await;
                });
            }
        });

        let client = SleeperClient::with_base_url(format!("http://{addr}"));
        let import = client.import_league("12345").await.unwrap();

        assert_eq!(import.league_id, "12345");
        assert_eq!(import.name, "Test League");
        assert_eq!(import.season, Some(2025));
        assert_eq!(import.total_rosters, Some(3));
        assert_eq!(import.teams.len(), 3);

        assert_eq!(import.teams[0].owner_name, "Coach Dan");
        assert_eq!(import.teams[0].players, vec!["100", "101", "102"]);

        // Empty display_name falls back to username; non-string ids dropped.
        assert_eq!(import.teams[1].owner_name, "silent_owner");
        assert_eq!(import.teams[1].starters, vec!["200"]);
        assert_eq!(import.teams[1].players, vec!["200"]);

        // Ownerless roster.
        assert_eq!(import.teams[2].owner_name, "Unknown");
        assert!(import.teams[2].players.is_empty());
    }
}
