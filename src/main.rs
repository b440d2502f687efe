//! Headless native entry point
//!
//! Plays a game with the demo autopilot, then prints the leaderboard.
//!
//! ```text
//! alien-invasion [PLAYER] [--settings PATH] [--ticks N] [--difficulty beginner|advanced]
//! ```

use std::path::PathBuf;

use alien_invasion::highscores::DISPLAY_LIMIT;
use alien_invasion::runner::{Autopilot, Game};
use alien_invasion::sim::{Command, Difficulty, GameEvent, Session, Snapshot};
use alien_invasion::Settings;
use anyhow::{Context, bail};

struct Args {
    player: String,
    settings: PathBuf,
    ticks: u64,
    difficulty: Option<Difficulty>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        player: "demo".to_string(),
        settings: PathBuf::from("settings.json"),
        ticks: 20_000,
        difficulty: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = iter.next().context("--settings needs a path")?.into();
            }
            "--ticks" => {
                let value = iter.next().context("--ticks needs a number")?;
                args.ticks = value.parse().with_context(|| format!("bad tick count '{value}'"))?;
            }
            "--difficulty" => {
                let value = iter.next().context("--difficulty needs a value")?;
                args.difficulty = Some(
                    Difficulty::parse(&value)
                        .with_context(|| format!("unknown difficulty '{value}'"))?,
                );
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            name => args.player = name.to_string(),
        }
    }
    Ok(args)
}

fn log_events(snapshot: &Snapshot) {
    for event in &snapshot.events {
        match event {
            GameEvent::AlienDestroyed { .. } => log::debug!("{:?}", event),
            _ => log::info!("tick {}: {:?}", snapshot.tick, event),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Alien Invasion (native) starting...");

    let args = parse_args()?;
    let settings = Settings::load(&args.settings)
        .with_context(|| format!("loading settings from {}", args.settings.display()))?;
    let store = settings.save_store();
    log::info!("Data directory: {}", store.dir().display());
    let seed = settings.seed_or_clock();

    let session = if store.exists(&args.player) {
        let record = store
            .load(&args.player)
            .with_context(|| format!("loading save for '{}'", args.player))?;
        let mut session = record.into_session(seed, settings.tuning.clone());
        // Restored games open paused
        session.apply(Command::Resume);
        session
    } else {
        store.ensure_available(&args.player)?;
        Session::with_tuning(
            args.player.clone(),
            args.difficulty.unwrap_or(settings.difficulty),
            settings.keys.clone(),
            seed,
            settings.tuning.clone(),
        )
    };

    let mut game = Game::from_settings(session, &settings);
    let mut pilot = Autopilot::new(settings.tuning.laser_speed);
    let last = game.run(&mut log_events, |s| pilot.plan(s), args.ticks)?;

    println!(
        "{}: round {}, score {}, lives {}",
        args.player, last.round, last.score, last.cannon.lives
    );
    if !last.is_over() {
        if let Some(path) = game.save()? {
            println!("Saved to {}", path.display());
        }
    }

    let board = game.leaderboard()?;
    if !board.is_empty() {
        println!("\nLeaderboard");
        for (rank, entry) in board.top(DISPLAY_LIMIT).iter().enumerate() {
            println!("{:>2}. {:<16} {}", rank + 1, entry.name, entry.score);
        }
    }
    Ok(())
}
