// Configuration loading and parsing (league.toml).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::player::ScoringFormat;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// League settings
// ---------------------------------------------------------------------------

/// Per-slot roster composition. Counts are starters per team except `bench`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSettings {
    pub qb: usize,
    pub rb: usize,
    pub wr: usize,
    pub te: usize,
    pub flex: usize,
    pub k: usize,
    pub dst: usize,
    pub bench: usize,
}

impl Default for RosterSettings {
    fn default() -> Self {
        RosterSettings {
            qb: 1,
            rb: 2,
            wr: 2,
            te: 1,
            flex: 1,
            k: 1,
            dst: 1,
            bench: 6,
        }
    }
}

/// League shape the analysis engine runs against. `teams` is the replacement
/// rank denominator for baselines; `scoring` is assumed baked into each
/// player's proj_ppg and selects the ADP feed variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default = "default_league_name")]
    pub name: String,
    pub teams: usize,
    #[serde(default)]
    pub scoring: ScoringFormat,
    #[serde(default)]
    pub roster: RosterSettings,
}

fn default_league_name() -> String {
    "My League".to_string()
}

impl Default for LeagueSettings {
    /// The documented default league: 12 teams, 1 QB / 2 RB / 2 WR / 1 TE /
    /// 1 FLEX / 1 K / 1 DST / 6 bench, PPR scoring.
    fn default() -> Self {
        LeagueSettings {
            name: default_league_name(),
            teams: 12,
            scoring: ScoringFormat::Ppr,
            roster: RosterSettings::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// league.toml sections
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueSettings,
    #[serde(default)]
    sleeper: SleeperConfig,
    #[serde(default)]
    catalog: CatalogConfig,
    #[serde(default)]
    narrative: NarrativeConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SleeperConfig {
    /// Default league to import when `--league` is not given on the CLI.
    #[serde(default)]
    pub league_id: Option<String>,
    /// API base URL override, mainly for tests against a local server.
    #[serde(default)]
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// How long a cached catalog stays fresh before the feed is re-fetched.
    pub ttl_hours: u64,
    /// Optional CSV snapshot to load instead of the network feed.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            ttl_hours: 6,
            snapshot: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeConfig {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        NarrativeConfig {
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 1024,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueSettings,
    pub sleeper: SleeperConfig,
    pub catalog: CatalogConfig,
    pub narrative: NarrativeConfig,
    /// Anthropic API key, from the environment only, never from a file.
    pub api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        sleeper: league_file.sleeper,
        catalog: league_file.catalog,
        narrative: league_file.narrative,
        api_key: api_key_from_env(),
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` from `defaults/`, copying only files that do not already
/// exist so a hand-edited league.toml is never clobbered. `.example`
/// templates stay in `defaults/`. Returns the paths that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        // Installed layouts may ship config/ without defaults/. Only the
        // absence of both is unrecoverable.
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if !path.is_file() || file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if seed_file(&path, &target)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Copy `src` to `dst` unless `dst` already exists. Uses create_new so a
/// concurrent run cannot truncate a file the user is editing. Returns
/// whether a copy happened.
fn seed_file(src: &Path, dst: &Path) -> Result<bool, ConfigError> {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst);
    let mut dest = match file {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", dst.display()),
            })
        }
    };

    let content = std::fs::read(src).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read {}: {e}", src.display()),
    })?;
    std::io::Write::write_all(&mut dest, &content).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", dst.display()),
    })?;
    Ok(true)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

/// Read the Anthropic API key from the environment. An empty value counts as
/// absent so narrative generation degrades to the rule-based fallback.
pub fn api_key_from_env() -> Option<String> {
    std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

/// Default snapshot location under the platform cache directory, used to
/// keep an offline catalog copy when `[catalog].snapshot` is not set.
pub fn default_snapshot_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "rosteriq")
        .map(|dirs| dirs.cache_dir().join("catalog.csv"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.teams == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.teams".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.catalog.ttl_hours == 0 {
        return Err(ConfigError::ValidationError {
            field: "catalog.ttl_hours".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.narrative.model.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "narrative.model".into(),
            message: "must not be empty".into(),
        });
    }

    if config.narrative.max_tokens == 0 {
        return Err(ConfigError::ValidationError {
            field: "narrative.max_tokens".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID_LEAGUE_TOML: &str = r#"
[league]
name = "Test League"
teams = 12
scoring = "ppr"

[league.roster]
qb = 1
rb = 2
wr = 2
te = 1
flex = 1
k = 1
dst = 1
bench = 6

[sleeper]
league_id = "123456789"

[catalog]
ttl_hours = 6

[narrative]
model = "claude-sonnet-4-5-20250929"
max_tokens = 1024
"#;

    fn write_config(dir_tag: &str, content: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("rosteriq_config_test_{dir_tag}"));
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("league.toml"), content).unwrap();
        tmp
    }

    #[test]
    fn load_valid_config() {
        let tmp = write_config("valid", VALID_LEAGUE_TOML);

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.league.name, "Test League");
        assert_eq!(config.league.teams, 12);
        assert_eq!(config.league.scoring, ScoringFormat::Ppr);
        assert_eq!(config.league.roster.qb, 1);
        assert_eq!(config.league.roster.rb, 2);
        assert_eq!(config.league.roster.wr, 2);
        assert_eq!(config.league.roster.te, 1);
        assert_eq!(config.league.roster.flex, 1);
        assert_eq!(config.league.roster.bench, 6);
        assert_eq!(config.sleeper.league_id.as_deref(), Some("123456789"));
        assert_eq!(config.catalog.ttl_hours, 6);
        assert!(config.catalog.snapshot.is_none());
        assert_eq!(config.narrative.max_tokens, 1024);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let tmp = write_config(
            "minimal",
            r#"
[league]
teams = 10
"#,
        );

        let config = load_config_from(&tmp).expect("should load minimal config");
        assert_eq!(config.league.name, "My League");
        assert_eq!(config.league.teams, 10);
        assert_eq!(config.league.scoring, ScoringFormat::Ppr);
        // Roster defaults match DEFAULT_SETTINGS.
        assert_eq!(config.league.roster, RosterSettings::default());
        assert_eq!(config.catalog.ttl_hours, 6);
        assert_eq!(config.narrative.model, "claude-sonnet-4-5-20250929");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn default_settings_are_the_documented_league() {
        let settings = LeagueSettings::default();
        assert_eq!(settings.teams, 12);
        assert_eq!(settings.scoring, ScoringFormat::Ppr);
        assert_eq!(
            settings.roster,
            RosterSettings {
                qb: 1,
                rb: 2,
                wr: 2,
                te: 1,
                flex: 1,
                k: 1,
                dst: 1,
                bench: 6,
            }
        );
    }

    #[test]
    fn rejects_zero_teams() {
        let tmp = write_config(
            "zero_teams",
            r#"
[league]
teams = 0
"#,
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "league.teams");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_ttl() {
        let tmp = write_config(
            "zero_ttl",
            r#"
[league]
teams = 12

[catalog]
ttl_hours = 0
"#,
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "catalog.ttl_hours");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_max_tokens() {
        let tmp = write_config(
            "zero_tokens",
            r#"
[league]
teams = 12

[narrative]
model = "claude-sonnet-4-5-20250929"
max_tokens = 0
"#,
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "narrative.max_tokens");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = std::env::temp_dir().join("rosteriq_config_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("league.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = write_config("invalid_toml", "this is not valid [[[ toml");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("league.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("rosteriq_config_test_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("league.toml"), VALID_LEAGUE_TOML).unwrap();
        // Example file should NOT be copied.
        fs::write(defaults_dir.join("league.toml.example"), "# example\n").unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/league.toml").exists());
        assert!(!tmp.join("config/league.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("rosteriq_config_test_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/league.toml"), VALID_LEAGUE_TOML).unwrap();
        fs::write(tmp.join("config/league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(tmp.join("config/league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("rosteriq_config_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
