use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use lol_match_stats::analysis_export::export_player_analysis;
use lol_match_stats::analysis_store::AnalysisStore;
use lol_match_stats::config::AppConfig;
use lol_match_stats::pipeline::{
    PlayerSelector, analyze_recent_matches, resolve_known, resolve_player, validate_count,
};
use lol_match_stats::raw_cache::RawCache;
use lol_match_stats::registry::{PlayerRegistry, selection_list};
use lol_match_stats::report::render_table;
use lol_match_stats::riot_api::RiotClient;

mod prompt;
mod viewer;

#[derive(Parser, Debug)]
#[command(
    name = "lol_match_stats",
    about = "Cache League of Legends matches and track per-match performance",
    version
)]
struct Cli {
    /// SQLite cache file (overrides LOL_STATS_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Player registry JSON file (overrides LOL_STATS_REGISTRY)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and analyze a player's most recent matches
    Analyze {
        /// Public Riot ID, e.g. "Name#EUW"
        #[arg(long = "riot-id", conflicts_with = "player")]
        riot_id: Option<String>,

        /// Name already present in the player registry
        #[arg(long)]
        player: Option<String>,

        /// Number of recent matches
        #[arg(long, default_value_t = 3)]
        count: u32,

        /// Open the results in the terminal viewer instead of printing them
        #[arg(long)]
        view: bool,
    },
    /// Interactive player and count selection
    Prompt {
        #[arg(long)]
        view: bool,
    },
    /// Show stored analysis rows for a player
    Show {
        player: String,

        #[arg(long)]
        view: bool,
    },
    /// List known players (registry plus analyzed names)
    Players,
    /// Write a player's analysis rows to an .xlsx workbook
    Export {
        player: String,

        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cfg = AppConfig::from_env();
    if let Some(db) = cli.db {
        cfg.db_path = db;
    }
    if let Some(registry) = cli.registry {
        cfg.registry_path = registry;
    }

    match run(cli.command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(command: Command, cfg: &AppConfig) -> Result<()> {
    match command {
        Command::Analyze {
            riot_id,
            player,
            count,
            view,
        } => {
            let selector = match (riot_id, player) {
                (Some(raw), _) => PlayerSelector::parse_riot_id(&raw)?,
                (None, Some(name)) => PlayerSelector::Known { name },
                (None, None) => bail!("pass --riot-id Name#TAG or --player NAME"),
            };
            analyze(cfg, &selector, count, view)
        }
        Command::Prompt { view } => {
            let registry = PlayerRegistry::new(cfg.registry_path.clone());
            let players = registry.load()?.into_values().collect::<Vec<_>>();
            let stdin = io::stdin();
            let (selector, count) =
                prompt::ask(&mut stdin.lock(), &mut io::stdout(), &players)?;
            analyze(cfg, &selector, count, view)
        }
        Command::Show { player, view } => show(cfg, &player, view),
        Command::Players => list_players(cfg),
        Command::Export { player, out } => {
            let store = AnalysisStore::new(cfg.db_path.clone());
            let rows = store.rows_for_player(&player)?;
            if rows.is_empty() {
                bail!("no analysis rows stored for {player}");
            }
            let report = export_player_analysis(&out, &player, &rows)?;
            println!("Exported {} rows to {}", report.rows, out.display());
            Ok(())
        }
    }
}

fn analyze(cfg: &AppConfig, selector: &PlayerSelector, count: u32, view: bool) -> Result<()> {
    validate_count(count)?;
    selector.validate()?;

    let registry = PlayerRegistry::new(cfg.registry_path.clone());
    // Registry names are checked before the API key is required.
    let (player, client) = match selector {
        PlayerSelector::Known { name } => {
            let player = resolve_known(name, &registry)?;
            (player, RiotClient::from_config(cfg)?)
        }
        PlayerSelector::RiotId { .. } => {
            let client = RiotClient::from_config(cfg)?;
            (resolve_player(selector, &registry, &client)?, client)
        }
    };

    let cache = RawCache::new(cfg.db_path.clone());
    let store = AnalysisStore::new(cfg.db_path.clone());
    let report = analyze_recent_matches(&client, &cache, &store, &player, count)?;
    log::info!(
        "analyzed {} matches for {}",
        report.match_ids.len(),
        report.player_name
    );

    show(cfg, &report.player_name, view)
}

fn show(cfg: &AppConfig, player_name: &str, view: bool) -> Result<()> {
    let store = AnalysisStore::new(cfg.db_path.clone());
    let rows = store.rows_for_player(player_name)?;
    if view {
        viewer::show(player_name, &rows).context("terminal viewer failed")?;
    } else {
        println!("{}", render_table(&rows));
    }
    Ok(())
}

fn list_players(cfg: &AppConfig) -> Result<()> {
    let registry = PlayerRegistry::new(cfg.registry_path.clone()).load()?;
    let stored = AnalysisStore::new(cfg.db_path.clone()).player_names()?;
    let players = selection_list(&registry, &stored);
    if players.is_empty() {
        println!("No known players. Run `analyze --riot-id Name#TAG` first.");
        return Ok(());
    }
    for player in players {
        match player.puuid {
            Some(puuid) => println!("{}  {}", player.name, puuid),
            None => println!("{}  (analyzed only, no puuid)", player.name),
        }
    }
    Ok(())
}
