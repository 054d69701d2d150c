#![cfg(feature = "std")]

//! Terminal rendering and input parsing for the interactive binary.

use std::fmt::Write;
use std::string::String;

use rand::Rng;

use crate::{
    common::{AttackResult, Cell, Side},
    config::MAX_BOARD_SIZE,
    game::{GamePhase, GameSession, Reveal},
};

/// Command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place or fire at a coordinate, depending on the phase.
    Target(usize, usize),
    Rotate,
    RandomPlacement,
    Special,
    NewGame,
    Quit,
}

const COLUMNS: &[u8; MAX_BOARD_SIZE] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Letter naming column `c`; `?` past the alphabet.
fn column_letter(c: usize) -> char {
    COLUMNS.get(c).map_or('?', |&b| b as char)
}

/// Render a coordinate as `B7` style text.
pub fn coord_to_string(r: usize, c: usize) -> String {
    format!("{}{}", column_letter(c), r + 1)
}

/// Parse `B7` style coordinates (column letter, 1-based row).
pub fn parse_coord(input: &str) -> Option<(usize, usize)> {
    let mut chars = input.trim().chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    let col = COLUMNS.iter().position(|&b| b as char == col_ch)?;
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col))
}

pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "r" | "rotate" => Some(Command::Rotate),
        "a" | "auto" => Some(Command::RandomPlacement),
        "s" | "special" => Some(Command::Special),
        "n" | "new" => Some(Command::NewGame),
        "q" | "quit" => Some(Command::Quit),
        other => parse_coord(other).map(|(r, c)| Command::Target(r, c)),
    }
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Ship => 'S',
        Cell::Hit => 'X',
        Cell::Miss => 'o',
    }
}

/// Draw one side's grid as the player is allowed to see it. Revealed
/// reconnaissance cells show `?` for water and `!` for ship.
pub fn render_board<R: Rng>(session: &GameSession<R>, side: Side, reveals: &[Reveal]) -> String {
    let n = session.board_size();
    let mut out = String::new();
    out.push_str("   ");
    for c in 0..n {
        let _ = write!(out, " {}", column_letter(c));
    }
    out.push('\n');
    for r in 0..n {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..n {
            let revealed = reveals.iter().find(|rv| rv.row == r && rv.col == c);
            let ch = match (session.cell_state(side, r, c), revealed) {
                (Ok(Cell::Empty), Some(rv)) if side == Side::Opponent => {
                    if rv.contains_ship {
                        '!'
                    } else {
                        '?'
                    }
                }
                (Ok(cell), _) => cell_char(cell),
                (Err(_), _) => ' ',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Both grids plus the status line.
pub fn render_session<R: Rng>(session: &GameSession<R>, reveals: &[Reveal]) -> String {
    let mut out = String::new();
    out.push_str("Enemy fleet:\n");
    out.push_str(&render_board(session, Side::Opponent, reveals));
    out.push_str("\nYour fleet:\n");
    out.push_str(&render_board(session, Side::Player, &[]));
    out.push('\n');
    out.push_str(&status_line(session));
    out
}

fn sunk_list(names: &[&str]) -> String {
    if names.is_empty() {
        String::from("none")
    } else {
        names.join(", ")
    }
}

/// Prompt describing what the player can do next.
pub fn status_line<R: Rng>(session: &GameSession<R>) -> String {
    let mut out = format!(
        "Sunk by you: {}\nSunk by enemy: {}\n",
        sunk_list(session.sunk_ship_names(Side::Opponent)),
        sunk_list(session.sunk_ship_names(Side::Player)),
    );
    match session.phase() {
        GamePhase::Placing => {
            if let (Some(ship), Some(o)) = (session.next_ship(), session.orientation()) {
                let _ = write!(
                    out,
                    "Place your {} (length {}, {:?}). [coord | r rotate | a auto]",
                    ship.name(),
                    ship.length(),
                    o
                );
            }
        }
        GamePhase::InProgress if session.bombardment_pending() => {
            out.push_str("Bombardment armed: choose a target.");
        }
        GamePhase::InProgress => {
            let _ = write!(
                out,
                "Your shot. [coord | s reconnaissance ({} left)]",
                session.remaining_special_uses()
            );
        }
        GamePhase::PlayerWon => out.push_str("Victory! [n new game | q quit]"),
        GamePhase::OpponentWon => out.push_str("Defeat. [n new game | q quit]"),
    }
    out
}

/// One-line description of a shot.
pub fn describe_attack(side: Side, coord: (usize, usize), result: AttackResult) -> String {
    let who = match side {
        Side::Player => "You",
        Side::Opponent => "Enemy",
    };
    let at = coord_to_string(coord.0, coord.1);
    match result {
        AttackResult::Miss => format!("{} fired at {}: miss", who, at),
        AttackResult::Hit => format!("{} fired at {}: hit!", who, at),
        AttackResult::Sunk(name) => format!("{} fired at {}: sank the {}!", who, at, name),
        AttackResult::AlreadyAttacked => format!("{} already fired at {}", who, at),
    }
}
