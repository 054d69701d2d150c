#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use naval_combat::{
    ai, describe_attack, init_logging, parse_command, render_session, AttackResult, Command,
    GameConfig, GamePhase, GameSession, Reveal, Side, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use log::LevelFilter;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::{Rng, SeedableRng};
#[cfg(feature = "std")]
use serde_json::json;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::time::{sleep, Duration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = board_size_parser())]
        size: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1000, help = "Pause before each enemy shot")]
        delay_ms: u64,
    },
    /// Let two random shooters play a full match and print a JSON summary.
    Sim {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = board_size_parser())]
        size: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

/// Board sizes the column letters can address.
#[cfg(feature = "std")]
fn board_size_parser() -> clap::builder::RangedU64ValueParser<usize> {
    clap::builder::RangedU64ValueParser::new().range(1..=MAX_BOARD_SIZE as u64)
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            size,
            seed,
            delay_ms,
        } => {
            init_logging(LevelFilter::Warn);
            let session = GameSession::with_rng(GameConfig::with_board_size(size), make_rng(seed))
                .map_err(|e| anyhow::anyhow!(e))?;
            play(session, Duration::from_millis(delay_ms)).await
        }
        Commands::Sim { size, seed } => {
            init_logging(LevelFilter::Info);
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            let session = GameSession::seeded(GameConfig::with_board_size(size), seed)
                .map_err(|e| anyhow::anyhow!(e))?;
            simulate(session, SmallRng::seed_from_u64(seed.wrapping_add(1)), seed)
        }
    }
}

#[cfg(feature = "std")]
async fn play(mut session: GameSession<SmallRng>, delay: Duration) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut reveals: Vec<Reveal> = Vec::new();
    println!("{}", render_session(&session, &reveals));
    loop {
        if session.phase() == GamePhase::InProgress && session.turn() == Side::Opponent {
            println!("Enemy is aiming...");
            sleep(delay).await;
            let (coord, result) = session
                .opponent_attack()
                .map_err(|e| anyhow::anyhow!(e))?;
            println!("{}", describe_attack(Side::Opponent, coord, result));
            println!("{}", render_session(&session, &reveals));
            continue;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = parse_command(&line) else {
            println!("Unrecognised input: {}", line.trim());
            continue;
        };
        match command {
            Command::Quit => break,
            Command::NewGame => {
                session.new_game();
                reveals.clear();
            }
            Command::Rotate => {
                if let Err(e) = session.toggle_orientation() {
                    println!("{}", e);
                }
            }
            Command::RandomPlacement => {
                if let Err(e) = session.place_ships_randomly() {
                    println!("{}", e);
                }
            }
            Command::Special => match session.invoke_special_action() {
                Ok(found) => {
                    println!("Reconnaissance revealed {} cells.", found.len());
                    reveals = found;
                }
                Err(e) => println!("{}", e),
            },
            Command::Target(r, c) => match session.phase() {
                GamePhase::Placing => {
                    if let Err(e) = session.place_player_ship(r, c) {
                        println!("{}", e);
                    }
                }
                GamePhase::InProgress => {
                    let bombardment = session.bombardment_pending();
                    let outcome = if bombardment {
                        session.bombardment_attack(r, c)
                    } else {
                        session.player_attack(r, c)
                    };
                    match outcome {
                        Ok(result) => {
                            if bombardment {
                                reveals.clear();
                                println!("Bombardment!");
                            }
                            println!("{}", describe_attack(Side::Player, (r, c), result));
                        }
                        Err(e) => println!("{}", e),
                    }
                }
                GamePhase::PlayerWon | GamePhase::OpponentWon => {
                    println!("The match is over. Type n for a new game.");
                }
            },
        }
        println!("{}", render_session(&session, &reveals));
    }
    Ok(())
}

/// Run a complete match with random shots on both sides. The player launches
/// reconnaissance whenever it can and bombs any ship it spots.
#[cfg(feature = "std")]
fn simulate(
    mut session: GameSession<SmallRng>,
    mut shooter: SmallRng,
    seed: u64,
) -> anyhow::Result<()> {
    session
        .place_ships_randomly()
        .map_err(|e| anyhow::anyhow!(e))?;
    let cells = session.board_size() * session.board_size();
    let mut player_shots = 0usize;
    let mut opponent_shots = 0usize;
    let mut reconnaissance = 0usize;

    while session.phase() == GamePhase::InProgress {
        if player_shots + opponent_shots > 2 * cells {
            anyhow::bail!("match did not finish within {} shots", 2 * cells);
        }
        match session.turn() {
            Side::Player => {
                let mut target = None;
                if session.special_action_available() {
                    let found = session
                        .invoke_special_action()
                        .map_err(|e| anyhow::anyhow!(e))?;
                    reconnaissance += 1;
                    target = found.iter().find(|r| r.contains_ship).map(|r| (r.row, r.col));
                }
                let (r, c) = match target {
                    Some(t) => t,
                    None => ai::random_target(session.board(Side::Opponent), &mut shooter)
                        .ok_or_else(|| anyhow::anyhow!("no open cell on the enemy board"))?,
                };
                let result = session
                    .player_attack(r, c)
                    .map_err(|e| anyhow::anyhow!(e))?;
                if result != AttackResult::AlreadyAttacked {
                    player_shots += 1;
                }
            }
            Side::Opponent => {
                session.opponent_attack().map_err(|e| anyhow::anyhow!(e))?;
                opponent_shots += 1;
            }
        }
    }

    let summary = json!({
        "seed": seed,
        "board_size": session.board_size(),
        "winner": session.phase(),
        "player": {
            "shots": player_shots,
            "reconnaissance": reconnaissance,
            "sunk": session.sunk_ship_names(Side::Opponent),
        },
        "opponent": {
            "shots": opponent_shots,
            "sunk": session.sunk_ship_names(Side::Player),
        },
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn size_of(args: &[&str]) -> Option<usize> {
        match Cli::try_parse_from(args).ok()?.command {
            Commands::Play { size, .. } | Commands::Sim { size, .. } => Some(size),
        }
    }

    #[test]
    fn size_flag_is_capped_at_the_alphabet() {
        assert_eq!(size_of(&["naval-combat", "play"]), Some(DEFAULT_BOARD_SIZE));
        assert_eq!(size_of(&["naval-combat", "play", "--size", "26"]), Some(26));
        assert_eq!(size_of(&["naval-combat", "sim", "--size", "1"]), Some(1));
        assert_eq!(size_of(&["naval-combat", "play", "--size", "27"]), None);
        assert_eq!(size_of(&["naval-combat", "sim", "--size", "200"]), None);
        assert_eq!(size_of(&["naval-combat", "sim", "--size", "0"]), None);
    }
}
