//! Match orchestration: placement phase, alternating attacks, the
//! reconnaissance/bombardment special action and win detection.

use alloc::vec::Vec;
use log::{debug, info};
use rand::Rng;

#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

use crate::{
    ai,
    board::Board,
    common::{AttackResult, BoardError, Cell, GameError, Side},
    config::{ConfigError, GameConfig, BOARD_GENERATION_ATTEMPTS, FLAGSHIP},
    ship::{Orientation, ShipType},
};

/// Coarse phase of a match, as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GamePhase {
    Placing,
    InProgress,
    PlayerWon,
    OpponentWon,
}

/// A cell uncovered by reconnaissance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub row: usize,
    pub col: usize,
    pub contains_ship: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Placing {
        next: usize,
        orientation: Orientation,
    },
    PlayerTurn {
        bombardment_pending: bool,
    },
    OpponentTurn,
    Over(Side),
}

impl State {
    fn initial() -> Self {
        State::Placing {
            next: 0,
            orientation: Orientation::Horizontal,
        }
    }
}

/// One match between the player and the automated opponent.
///
/// All randomness (opponent fleet, opponent shots, reconnaissance) is drawn
/// from the owned generator `R`, so a seeded generator makes a match fully
/// reproducible.
pub struct GameSession<R: Rng> {
    config: GameConfig,
    rng: R,
    player: Board,
    opponent: Board,
    state: State,
    player_sunk: Vec<&'static str>,
    opponent_sunk: Vec<&'static str>,
    special_uses: u8,
}

#[cfg(feature = "std")]
impl GameSession<SmallRng> {
    /// Session seeded from the thread-local generator.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let mut seed_rng = rand::rng();
        Self::with_rng(config, SmallRng::from_rng(&mut seed_rng))
    }

    /// Reproducible session for a fixed seed.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Session drawing from the supplied random source.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = config.board_size;
        Ok(Self {
            special_uses: config.special_action_uses,
            config,
            rng,
            player: Board::new(size),
            opponent: Board::new(size),
            state: State::initial(),
            player_sunk: Vec::new(),
            opponent_sunk: Vec::new(),
        })
    }

    /// Discard both fleets and start a fresh placement phase.
    pub fn new_game(&mut self) {
        let size = self.config.board_size;
        self.player = Board::new(size);
        self.opponent = Board::new(size);
        self.state = State::initial();
        self.player_sunk.clear();
        self.opponent_sunk.clear();
        self.special_uses = self.config.special_action_uses;
        info!("new game on a {}x{} board", size, size);
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    pub fn phase(&self) -> GamePhase {
        match self.state {
            State::Placing { .. } => GamePhase::Placing,
            State::PlayerTurn { .. } | State::OpponentTurn => GamePhase::InProgress,
            State::Over(Side::Player) => GamePhase::PlayerWon,
            State::Over(Side::Opponent) => GamePhase::OpponentWon,
        }
    }

    /// Side allowed to act. Placement belongs to the player; once the match
    /// is over this is the side that fired the deciding shot.
    pub fn turn(&self) -> Side {
        match self.state {
            State::Placing { .. } | State::PlayerTurn { .. } => Side::Player,
            State::OpponentTurn => Side::Opponent,
            State::Over(winner) => winner,
        }
    }

    /// Roster entry the next player placement will use.
    pub fn next_ship(&self) -> Option<ShipType> {
        match self.state {
            State::Placing { next, .. } => self.config.fleet.get(next).copied(),
            _ => None,
        }
    }

    /// Orientation for the next placement, while placing.
    pub fn orientation(&self) -> Option<Orientation> {
        match self.state {
            State::Placing { orientation, .. } => Some(orientation),
            _ => None,
        }
    }

    /// Names of `side`'s ships that have been sunk, in sinking order.
    pub fn sunk_ship_names(&self, side: Side) -> &[&'static str] {
        match side {
            Side::Player => &self.player_sunk,
            Side::Opponent => &self.opponent_sunk,
        }
    }

    pub fn remaining_special_uses(&self) -> u8 {
        self.special_uses
    }

    pub fn bombardment_pending(&self) -> bool {
        matches!(
            self.state,
            State::PlayerTurn {
                bombardment_pending: true
            }
        )
    }

    /// Whether [`invoke_special_action`](Self::invoke_special_action) would
    /// currently succeed.
    pub fn special_action_available(&self) -> bool {
        self.state
            == State::PlayerTurn {
                bombardment_pending: false,
            }
            && self.special_uses > 0
            && !self
                .player_sunk
                .iter()
                .any(|name| name.eq_ignore_ascii_case(FLAGSHIP))
    }

    /// Unconcealed board for `side`, including unattacked opponent ships.
    /// Meant for automated shooters and tests; presentation code should go
    /// through [`cell_state`](Self::cell_state).
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Cell as the player may see it: unattacked opponent ships read as
    /// open water until the match is over.
    pub fn cell_state(&self, side: Side, row: usize, col: usize) -> Result<Cell, GameError> {
        let cell = self.board(side).cell(row, col)?;
        let concealed = side == Side::Opponent && !matches!(self.state, State::Over(_));
        if concealed && cell == Cell::Ship {
            Ok(Cell::Empty)
        } else {
            Ok(cell)
        }
    }

    /// Flip the orientation used for the next placement.
    pub fn toggle_orientation(&mut self) -> Result<Orientation, GameError> {
        match &mut self.state {
            State::Placing { orientation, .. } => {
                *orientation = orientation.flipped();
                Ok(*orientation)
            }
            _ => Err(GameError::ActionUnavailable("ships are already placed")),
        }
    }

    /// Place the next roster ship at (row, col) in the current orientation.
    ///
    /// Placing the last ship generates the opponent fleet and hands the
    /// first shot to the player. If that generation fails the player's
    /// board is left as it was.
    pub fn place_player_ship(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        let State::Placing { next, orientation } = self.state else {
            return Err(GameError::ActionUnavailable("ships are already placed"));
        };
        let size = self.config.board_size;
        if row >= size || col >= size {
            return Err(BoardError::OutOfBounds { row, col }.into());
        }
        let ship_type = self.config.fleet[next];
        if !self
            .player
            .is_valid_placement(row, col, ship_type.length(), orientation)
        {
            return Err(GameError::InvalidPlacement);
        }
        let last = next + 1 == self.config.fleet.len();
        let opponent = if last {
            Some(self.generate_board()?)
        } else {
            None
        };
        self.player.place_ship(ship_type, row, col, orientation)?;
        match opponent {
            Some(board) => self.start_battle(board),
            None => {
                self.state = State::Placing {
                    next: next + 1,
                    orientation,
                }
            }
        }
        Ok(())
    }

    /// Replace the player's fleet with a random one and start the battle.
    pub fn place_ships_randomly(&mut self) -> Result<(), GameError> {
        if !matches!(self.state, State::Placing { .. }) {
            return Err(GameError::ActionUnavailable("ships are already placed"));
        }
        let player = self.generate_board()?;
        let opponent = self.generate_board()?;
        self.player = player;
        self.start_battle(opponent);
        Ok(())
    }

    /// Fire at the opponent board. While a bombardment is pending this shot
    /// is the bombardment.
    pub fn player_attack(&mut self, row: usize, col: usize) -> Result<AttackResult, GameError> {
        match self.state {
            State::PlayerTurn { .. } => self.resolve_player_shot(row, col),
            _ => Err(GameError::ActionUnavailable("not the player's turn")),
        }
    }

    /// Fire the bombardment armed by the special action.
    pub fn bombardment_attack(&mut self, row: usize, col: usize) -> Result<AttackResult, GameError> {
        match self.state {
            State::PlayerTurn {
                bombardment_pending: true,
            } => self.resolve_player_shot(row, col),
            _ => Err(GameError::ActionUnavailable("no bombardment pending")),
        }
    }

    /// Let the opponent fire one shot at a uniformly random open cell.
    pub fn opponent_attack(&mut self) -> Result<((usize, usize), AttackResult), GameError> {
        if self.state != State::OpponentTurn {
            return Err(GameError::ActionUnavailable("not the opponent's turn"));
        }
        let (row, col) = ai::random_target(&self.player, &mut self.rng)
            .ok_or(GameError::ActionUnavailable("no cell left to attack"))?;
        let result = self.player.receive_attack(row, col)?;
        debug!("opponent fires at ({}, {}): {:?}", row, col, result);
        if let AttackResult::Sunk(name) = result {
            self.player_sunk.push(name);
        }
        if self.player.all_ships_sunk() {
            info!("opponent sank the whole fleet");
            self.state = State::Over(Side::Opponent);
        } else if result == AttackResult::Miss {
            self.state = State::PlayerTurn {
                bombardment_pending: false,
            };
        }
        Ok(((row, col), result))
    }

    /// Launch the reconnaissance aircraft: spend one use, reveal up to three
    /// open opponent cells and arm a bombardment for the next shot.
    pub fn invoke_special_action(&mut self) -> Result<Vec<Reveal>, GameError> {
        if !self.special_action_available() {
            return Err(GameError::ActionUnavailable("special action unavailable"));
        }
        self.special_uses -= 1;
        let reveals: Vec<_> = ai::reconnaissance_targets(&self.opponent, &mut self.rng)
            .into_iter()
            .map(|(row, col)| Reveal {
                row,
                col,
                contains_ship: self.opponent.cell(row, col) == Ok(Cell::Ship),
            })
            .collect();
        info!(
            "reconnaissance revealed {} cells, {} uses left",
            reveals.len(),
            self.special_uses
        );
        self.state = State::PlayerTurn {
            bombardment_pending: true,
        };
        Ok(reveals)
    }

    fn resolve_player_shot(&mut self, row: usize, col: usize) -> Result<AttackResult, GameError> {
        let result = self.opponent.receive_attack(row, col)?;
        debug!("player fires at ({}, {}): {:?}", row, col, result);
        if let AttackResult::Sunk(name) = result {
            self.opponent_sunk.push(name);
        }
        self.state = if self.opponent.all_ships_sunk() {
            info!("player sank the whole fleet");
            State::Over(Side::Player)
        } else if result == AttackResult::Miss {
            State::OpponentTurn
        } else {
            State::PlayerTurn {
                bombardment_pending: false,
            }
        };
        Ok(result)
    }

    fn start_battle(&mut self, opponent: Board) {
        self.opponent = opponent;
        self.state = State::PlayerTurn {
            bombardment_pending: false,
        };
        info!("fleets placed, battle begins");
    }

    fn generate_board(&mut self) -> Result<Board, GameError> {
        Board::random(
            self.config.board_size,
            &self.config.fleet,
            &mut self.rng,
            BOARD_GENERATION_ATTEMPTS,
        )
        .map_err(GameError::from)
    }
}
