// Roster analyzer entry point.
//
// Startup sequence:
// 1. Parse the CLI
// 2. Initialize tracing (stderr; stdout carries the report)
// 3. Load config (copying defaults on first run)
// 4. Dispatch the subcommand

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use roster_analyzer::analysis::insights::build_insights;
use roster_analyzer::analysis::resolve::{resolve_name, resolve_roster};
use roster_analyzer::analysis::{analyze_players, AnalysisResult};
use roster_analyzer::catalog::cache::MemoryCatalogStore;
use roster_analyzer::catalog::player::{CatalogPlayer, PlayerCatalog, Position, ScoringFormat};
use roster_analyzer::catalog::snapshot::{load_snapshot, save_snapshot};
use roster_analyzer::catalog::{current_season, load_catalog};
use roster_analyzer::cli::{split_names, Cli, Command};
use roster_analyzer::config::{self, Config};
use roster_analyzer::narrative::NarrativeClient;
use roster_analyzer::sleeper::SleeperClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse the CLI
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing().context("failed to initialize tracing")?;

    // 3. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        league = %config.league.name,
        teams = config.league.teams,
        scoring = %config.league.scoring,
        "config loaded"
    );

    // 4. Dispatch
    match cli.command {
        Command::Analyze {
            league,
            team,
            names,
            names_file,
            snapshot,
            json,
            narrative,
        } => {
            cmd_analyze(
                &config, league, team, names, names_file, snapshot, json, narrative,
            )
            .await
        }
        Command::Catalog {
            save,
            season,
            format,
            snapshot,
        } => cmd_catalog(&config, save, season, format, snapshot).await,
    }
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
async fn cmd_analyze(
    config: &Config,
    league: Option<String>,
    team: Option<String>,
    names: Option<String>,
    names_file: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    json: bool,
    narrative: bool,
) -> anyhow::Result<()> {
    let catalog = acquire_catalog(
        config,
        snapshot.as_deref(),
        current_season(),
        config.league.scoring,
    )
    .await?;

    let narrator = NarrativeClient::from_config(config);
    match &narrator {
        NarrativeClient::Active(_) => info!("narrative client active (API key configured)"),
        NarrativeClient::Disabled => info!("narrative client disabled, using rule-based text"),
    }

    // Resolve the roster source: ad-hoc names, a names file, or a league import.
    let rosters: Vec<(String, Vec<CatalogPlayer>)> = if let Some(raw) = names {
        let names = split_names(&raw);
        anyhow::ensure!(!names.is_empty(), "--names contained no player names");
        let roster = resolve_roster(&names, &catalog);
        vec![(config.league.name.clone(), roster)]
    } else if let Some(path) = names_file {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read names file {}", path.display()))?;
        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        anyhow::ensure!(
            !names.is_empty(),
            "names file {} contained no player names",
            path.display()
        );
        let roster = resolve_roster(&names, &catalog);
        vec![(config.league.name.clone(), roster)]
    } else {
        let league_id = league
            .or_else(|| config.sleeper.league_id.clone())
            .context("no roster source: pass --names, --names-file, or --league")?;
        import_rosters(config, &league_id, team.as_deref(), &catalog).await?
    };

    let mut payloads = Vec::with_capacity(rosters.len());
    for (owner, roster) in &rosters {
        let result = analyze_players(roster, &catalog, &config.league);

        if json {
            let mut payload = serde_json::json!({
                "team": owner,
                "analysis": result,
            });
            if narrative {
                payload["teamNarrative"] =
                    serde_json::to_value(narrator.team_narrative(&result, roster, &catalog).await)?;
            }
            payloads.push(payload);
        } else {
            print_report(owner, &result, roster);
            if narrative {
                let team_narrative = narrator.team_narrative(&result, roster, &catalog).await;
                print_team_narrative(&team_narrative);
                for starter in &result.starters {
                    let pn = narrator.player_narrative(&starter.player).await;
                    println!("  {} ({}): {}", starter.player.name, pn.grade, pn.analysis);
                }
            }
            println!();
        }
    }

    if json {
        let output = if payloads.len() == 1 {
            serde_json::to_string_pretty(&payloads[0])?
        } else {
            serde_json::to_string_pretty(&payloads)?
        };
        println!("{output}");
    }

    Ok(())
}

/// Import a Sleeper league and map each roster's player ids through the
/// catalog. Unknown ids resolve to placeholders rather than failing.
async fn import_rosters(
    config: &Config,
    league_id: &str,
    team: Option<&str>,
    catalog: &PlayerCatalog,
) -> anyhow::Result<Vec<(String, Vec<CatalogPlayer>)>> {
    let client = sleeper_client(config);
    let import = client
        .import_league(league_id)
        .await
        .with_context(|| format!("failed to import league {league_id}"))?;
    info!(
        league = %import.name,
        teams = import.teams.len(),
        "league imported"
    );

    let mut rosters = Vec::new();
    for league_team in &import.teams {
        if let Some(wanted) = team {
            if !league_team
                .owner_name
                .to_lowercase()
                .contains(&wanted.to_lowercase())
            {
                continue;
            }
        }
        let roster: Vec<CatalogPlayer> = league_team
            .players
            .iter()
            .map(|id| {
                catalog
                    .by_id(id)
                    .cloned()
                    .unwrap_or_else(|| resolve_name(id, catalog))
            })
            .collect();
        rosters.push((league_team.owner_name.clone(), roster));
    }

    if let Some(wanted) = team {
        anyhow::ensure!(
            !rosters.is_empty(),
            "no team in league {league_id} matches owner '{wanted}'"
        );
    }
    Ok(rosters)
}

fn print_report(owner: &str, result: &AnalysisResult, roster: &[CatalogPlayer]) {
    println!("=== {owner} ===");
    println!(
        "{:<6} {:<26} {:>6} {:>6} {:>7} {:>6}",
        "SLOT", "PLAYER", "PROJ", "BASE", "DELTA", "GRADE"
    );
    for s in &result.starters {
        println!(
            "{:<6} {:<26} {:>6.1} {:>6.1} {:>+7.1} {:>6}",
            s.slot.to_string(),
            s.player.name,
            s.player.proj_ppg,
            s.baseline,
            s.delta,
            s.grade.to_string()
        );
    }
    if !result.bench.is_empty() {
        let bench: Vec<&str> = result.bench.iter().map(|p| p.name.as_str()).collect();
        println!("Bench: {}", bench.join(", "));
    }

    let su = &result.summary;
    println!();
    println!(
        "Projected {:.1} PPG vs {:.1} baseline ({:+.1}, {:+.1}%)",
        su.sum_proj,
        su.sum_baseline,
        su.delta,
        su.team_delta_pct * 100.0
    );
    println!(
        "Grade {} | projected record {} | playoff odds {}%",
        su.overall_grade, su.projected_record, su.playoff_odds_pct
    );
    println!(
        "Advantages {}/{} | stars {} | bench depth {}",
        su.advantages_count,
        result.starters.len(),
        su.star_count,
        su.bench_depth_count
    );

    println!();
    println!("Insights:");
    for s in &result.starters {
        let lines = build_insights(&s.player, &result.baselines, roster);
        println!("  {} [{}]: {}", s.player.name, s.slot, lines.join(" "));
    }
}

fn print_team_narrative(n: &roster_analyzer::narrative::TeamNarrative) {
    println!();
    println!("Outlook ({}):", n.overall_grade);
    println!("  Weakest position: {}", n.weakest_position);
    for line in &n.trade_recommendations {
        println!("  Trade: {line}");
    }
    for line in &n.team_strengths {
        println!("  Strength: {line}");
    }
    for line in &n.team_weaknesses {
        println!("  Weakness: {line}");
    }
    println!("  Plan: {}", n.improvement_strategy);
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

async fn cmd_catalog(
    config: &Config,
    save: Option<PathBuf>,
    season: Option<u16>,
    format: Option<String>,
    snapshot: Option<PathBuf>,
) -> anyhow::Result<()> {
    let season = season.unwrap_or_else(current_season);
    let format = match format {
        Some(raw) => ScoringFormat::from_str_format(&raw).with_context(|| {
            format!("unknown scoring format '{raw}' (expected ppr, half_ppr, or standard)")
        })?,
        None => config.league.scoring,
    };

    let catalog = acquire_catalog(config, snapshot.as_deref(), season, format).await?;

    println!(
        "Catalog: {} players, season {}, {} scoring",
        catalog.len(),
        catalog.season,
        catalog.format
    );
    for pos in Position::ALL {
        let at = catalog.players_at(pos);
        let top = at.iter().max_by(|a, b| {
            a.proj_ppg
                .partial_cmp(&b.proj_ppg)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        match top {
            Some(p) => println!(
                "  {:<4} {:>4} players, top: {} ({:.1} PPG)",
                pos.to_string(),
                at.len(),
                p.name,
                p.proj_ppg
            ),
            None => println!("  {:<4} {:>4} players", pos.to_string(), 0),
        }
    }

    if let Some(path) = save {
        save_snapshot(&catalog, &path)
            .with_context(|| format!("failed to save snapshot to {}", path.display()))?;
        println!("Snapshot saved to {}", path.display());
    } else if snapshot.is_none() && config.catalog.snapshot.is_none() {
        // Keep an offline copy in the platform cache dir for later runs.
        if let Some(cache_path) = config::default_snapshot_path() {
            match save_snapshot(&catalog, &cache_path) {
                Ok(()) => info!(path = %cache_path.display(), "catalog cached"),
                Err(err) => warn!(%err, "failed to cache the catalog"),
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

fn sleeper_client(config: &Config) -> SleeperClient {
    match &config.sleeper.api_base {
        Some(base) => SleeperClient::with_base_url(base.clone()),
        None => SleeperClient::new(),
    }
}

/// Load the player catalog: a CSV snapshot when one is given (flag first,
/// then config), otherwise the network feed through the TTL cache.
async fn acquire_catalog(
    config: &Config,
    snapshot: Option<&Path>,
    season: u16,
    format: ScoringFormat,
) -> anyhow::Result<PlayerCatalog> {
    if let Some(path) = snapshot.or(config.catalog.snapshot.as_deref()) {
        let catalog = load_snapshot(path)
            .with_context(|| format!("failed to load catalog snapshot {}", path.display()))?;
        info!(players = catalog.len(), path = %path.display(), "catalog loaded from snapshot");
        return Ok(catalog);
    }

    let client = sleeper_client(config);
    let store = MemoryCatalogStore::with_ttl(Duration::from_secs(config.catalog.ttl_hours * 3600));
    let catalog = load_catalog(&client, &store, season, format)
        .await
        .context("failed to fetch player catalog")?;
    info!(players = catalog.len(), season, "catalog loaded from feed");
    Ok(catalog)
}

/// Initialize tracing to stderr so stdout stays clean for report output.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roster_analyzer=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
