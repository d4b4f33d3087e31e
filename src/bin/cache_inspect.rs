use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lol_match_stats::config::AppConfig;
use lol_match_stats::raw_cache::{DocumentKind, RawCache};
use lol_match_stats::riot_types::{parse_match_detail_json, parse_timeline_json};

/// Lists what the raw match cache holds.
#[derive(Parser, Debug)]
#[command(name = "cache_inspect")]
struct Args {
    /// SQLite cache file (overrides LOL_STATS_DB)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let db_path = args.db.unwrap_or_else(|| AppConfig::from_env().db_path);
    let cache = RawCache::new(db_path);
    println!("DB: {}", cache.db_path().display());

    let timelines = cache.entries(DocumentKind::Timeline)?;
    println!("\nTimeline table ({} rows):", timelines.len());
    println!("{:<20} {:<20} {:>6}", "match_id", "metadata.matchId", "frames");
    for (match_id, body) in &timelines {
        match parse_timeline_json(body) {
            Ok(tl) => println!(
                "{:<20} {:<20} {:>6}",
                match_id,
                tl.metadata.match_id,
                tl.info.frames.len()
            ),
            Err(err) => println!("{match_id:<20} unreadable: {err}"),
        }
    }

    let details = cache.entries(DocumentKind::MatchDetail)?;
    println!("\nMatch details table ({} rows):", details.len());
    println!(
        "{:<20} {:<20} {:>12} {:>6} {:>8}",
        "match_id", "metadata.matchId", "gameId", "queue", "duration"
    );
    for (match_id, body) in &details {
        match parse_match_detail_json(body) {
            Ok(d) => println!(
                "{:<20} {:<20} {:>12} {:>6} {:>8}",
                match_id,
                d.metadata.match_id,
                d.info
                    .game_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "n/a".to_string()),
                d.info.queue_id,
                d.info.game_duration
            ),
            Err(err) => println!("{match_id:<20} unreadable: {err}"),
        }
    }

    Ok(())
}
