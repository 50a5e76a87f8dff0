use std::path::PathBuf;

use battleship_solo::{
    init_logging, sim,
    terminal::{self, Input},
    FileStore, Session, Settings, Side, OPPONENT_DELAY_MS,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal. The game is saved after
    /// every move and resumed on the next start.
    Play {
        #[arg(long, default_value = "battleship-save.json")]
        save: PathBuf,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = OPPONENT_DELAY_MS, help = "Opponent thinking time in milliseconds")]
        delay_ms: u64,
        #[arg(long, help = "Ignore any saved game and start fresh")]
        fresh: bool,
    },
    /// Auto-play one game and print a JSON summary.
    Sim {
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

enum Step {
    Line(Option<String>),
    Opponent(battleship_solo::TurnTicket),
}

async fn play(settings: Settings, fresh: bool) -> anyhow::Result<()> {
    let mut store = FileStore::new(&settings.save_path);
    if fresh {
        battleship_solo::SaveStore::clear(&mut store).await?;
    }
    let mut session = Session::open(store, &settings).await;
    println!("{}", terminal::HELP);
    println!("{}", terminal::render(session.engine()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let step = tokio::select! {
            line = lines.next_line() => Step::Line(line?),
            ticket = session.opponent_turn_due() => Step::Opponent(ticket),
        };
        let events = match step {
            Step::Line(None) => break,
            Step::Line(Some(line)) => match terminal::parse_input(&line, session.engine().phase()) {
                Ok(Input::Quit) => break,
                Ok(Input::Help) => {
                    println!("{}", terminal::HELP);
                    continue;
                }
                Ok(Input::Show) => {
                    println!("{}", terminal::render(session.engine()));
                    continue;
                }
                Ok(Input::Command(command)) => session.apply(command).await?,
                Err(msg) => {
                    println!("{}", msg);
                    continue;
                }
            },
            Step::Opponent(ticket) => session.resolve_opponent_turn(ticket).await,
        };
        if events.is_empty() {
            continue;
        }
        for line in events.iter().filter_map(terminal::describe) {
            println!("{}", line);
        }
        println!("{}", terminal::render(session.engine()));
    }
    session.persist().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            save,
            seed,
            delay_ms,
            fresh,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let settings = Settings {
                save_path: save,
                opponent_delay: Duration::from_millis(delay_ms),
                seed,
            };
            play(settings, fresh).await?;
        }
        Commands::Sim { seed } => {
            let summary = sim::simulate(seed)?;
            let winner = match summary.winner {
                Some(Side::Player) => Some("player"),
                Some(Side::Opponent) => Some("opponent"),
                None => None,
            };
            let result = json!({
                "seed": seed,
                "winner": winner,
                "playerShots": summary.player_shots,
                "opponentShots": summary.opponent_shots,
            });
            println!("{}", serde_json::to_string(&result)?);
        }
    }
    Ok(())
}
