// Anthropic API streaming client for narrative generation.
//
// Requests go to the Messages API with `stream: true`; the Server-Sent
// Events are accumulated into the full reply text, which is then parsed
// into the typed narrative. Any failure along the way falls back to the
// rule-based narratives so callers always get a usable result.

use futures_util::StreamExt;
use reqwest_eventsource::{Event, RequestBuilderExt};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::AnalysisResult;
use crate::catalog::player::{CatalogPlayer, PlayerCatalog};
use crate::config::Config;
use crate::narrative::fallback::{player_fallback, team_fallback};
use crate::narrative::parse::{parse_player_narrative, parse_team_narrative};
use crate::narrative::prompt::{build_player_prompt, build_team_prompt, system_prompt};
use crate::narrative::{PlayerNarrative, TeamNarrative};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ---------------------------------------------------------------------------
// AnthropicClient
// ---------------------------------------------------------------------------

/// Low-level Anthropic API streaming client.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    api_url: String,
}

impl AnthropicClient {
    /// Create a new client with the given API key and model identifier.
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            max_tokens,
            api_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint. Used by tests against a
    /// local mock server.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Send one message and return the complete reply text, accumulated
    /// from the SSE stream.
    pub async fn complete(&self, system: &str, user_content: &str) -> anyhow::Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "stream": true,
            "system": system,
            "messages": [{ "role": "user", "content": user_content }]
        });

        let request = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body);

        let mut es = request.eventsource()?;
        let mut full_text = String::new();

        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {
                    debug!("SSE connection opened");
                }
                Ok(Event::Message(msg)) => match msg.event.as_str() {
                    "content_block_delta" => {
                        if let Some(text) = parse_delta_text(&msg.data) {
                            full_text.push_str(&text);
                        }
                    }
                    "message_stop" => {
                        debug!(chars = full_text.len(), "streaming complete");
                        es.close();
                        return Ok(full_text);
                    }
                    // Ignore ping, message_start, content_block_start, etc.
                    other => {
                        debug!(event_type = other, "ignoring SSE event");
                    }
                },
                Err(err) => {
                    es.close();
                    return Err(anyhow::anyhow!(extract_error_message(&err)));
                }
            }
        }

        // Stream ended without message_stop.
        if full_text.is_empty() {
            anyhow::bail!("stream ended without any content");
        }
        Ok(full_text)
    }
}

// ---------------------------------------------------------------------------
// NarrativeClient wrapper
// ---------------------------------------------------------------------------

/// High-level wrapper that is either an active API client or disabled.
///
/// When disabled, or when any API call or parse fails, the rule-based
/// fallbacks produce the narrative instead.
pub enum NarrativeClient {
    Active(AnthropicClient),
    Disabled,
}

impl NarrativeClient {
    /// Build a `NarrativeClient` from the application config.
    ///
    /// Returns `Active` when an API key is present in the environment,
    /// otherwise `Disabled`.
    pub fn from_config(config: &Config) -> Self {
        match &config.api_key {
            Some(key) if !key.is_empty() => NarrativeClient::Active(AnthropicClient::new(
                key.clone(),
                config.narrative.model.clone(),
                config.narrative.max_tokens,
            )),
            _ => NarrativeClient::Disabled,
        }
    }

    /// Generate a scouting narrative for one player.
    pub async fn player_narrative(&self, player: &CatalogPlayer) -> PlayerNarrative {
        let client = match self {
            NarrativeClient::Active(client) => client,
            NarrativeClient::Disabled => return player_fallback(player),
        };

        let prompt = build_player_prompt(player);
        match client.complete(&system_prompt(), &prompt).await {
            Ok(reply) => match parse_player_narrative(&reply) {
                Ok(narrative) => narrative,
                Err(err) => {
                    warn!(player = %player.name, %err, "unparseable player narrative reply");
                    player_fallback(player)
                }
            },
            Err(err) => {
                warn!(player = %player.name, %err, "player narrative request failed");
                player_fallback(player)
            }
        }
    }

    /// Generate a season narrative for a whole roster.
    pub async fn team_narrative(
        &self,
        result: &AnalysisResult,
        roster: &[CatalogPlayer],
        catalog: &PlayerCatalog,
    ) -> TeamNarrative {
        let client = match self {
            NarrativeClient::Active(client) => client,
            NarrativeClient::Disabled => return team_fallback(result, roster, catalog),
        };

        let prompt = build_team_prompt(roster, catalog);
        match client.complete(&system_prompt(), &prompt).await {
            Ok(reply) => match parse_team_narrative(&reply) {
                Ok(narrative) => narrative,
                Err(err) => {
                    warn!(%err, "unparseable team narrative reply");
                    team_fallback(result, roster, catalog)
                }
            },
            Err(err) => {
                warn!(%err, "team narrative request failed");
                team_fallback(result, roster, catalog)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SSE JSON parsing helpers
// ---------------------------------------------------------------------------

/// Extract `delta.text` from a `content_block_delta` event's JSON.
///
/// Expected shape: `{ "type": "content_block_delta", "delta": { "type": "text_delta", "text": "..." } }`
pub(crate) fn parse_delta_text(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("delta")?
        .get("text")?
        .as_str()
        .map(|s| s.to_string())
}

/// Extract a human-readable error message from an SSE error.
fn extract_error_message(err: &reqwest_eventsource::Error) -> String {
    match err {
        reqwest_eventsource::Error::InvalidStatusCode(status, _response) => {
            format!("API returned status {status}")
        }
        reqwest_eventsource::Error::Transport(e) => {
            format!("Network error: {e}")
        }
        other => format!("Stream error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
