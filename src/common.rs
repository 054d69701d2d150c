//! Common types: cell states, attack outcomes, sides and engine errors.

use core::fmt;

/// State of a single grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Open water, never attacked.
    Empty,
    /// Unattacked ship segment.
    Ship,
    /// Ship segment that has been struck.
    Hit,
    /// Open water that has been struck.
    Miss,
}

impl Cell {
    /// `true` once the cell has been resolved by an attack.
    pub fn is_attacked(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// Result of an attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackResult {
    /// Attack struck open water.
    Miss,
    /// Attack struck a ship that is still afloat.
    Hit,
    /// Attack sank a ship, carrying its name.
    Sunk(&'static str),
    /// Coordinate had already been resolved; nothing changed.
    AlreadyAttacked,
}

impl AttackResult {
    /// Hits and sinks let the attacker keep the turn.
    pub fn keeps_turn(self) -> bool {
        matches!(self, AttackResult::Hit | AttackResult::Sunk(_))
    }
}

/// One of the two fleets in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Ship would leave the grid, overlap a ship or touch one.
    InvalidPlacement,
    /// Random placement could not fit the named ship within its retry bound.
    PlacementExhausted(&'static str),
    /// A `Ship` cell had no owning ship.
    UnknownShipHit { row: usize, col: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is out of bounds", row, col)
            }
            BoardError::InvalidPlacement => {
                write!(f, "Ship placement is out of bounds, overlapping or touching another ship")
            }
            BoardError::PlacementExhausted(name) => {
                write!(f, "Unable to place {} within the retry bound", name)
            }
            BoardError::UnknownShipHit { row, col } => {
                write!(f, "Ship cell ({}, {}) is not owned by any ship", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by GameSession operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Operation is not allowed in the current phase or turn.
    ActionUnavailable(&'static str),
    /// Player placement rejected; retry with other input.
    InvalidPlacement,
    /// Random board generation failed; discard and regenerate.
    PlacementExhausted,
    /// Board rejected the request.
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidPlacement => GameError::InvalidPlacement,
            BoardError::PlacementExhausted(_) => GameError::PlacementExhausted,
            other => GameError::Board(other),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ActionUnavailable(reason) => write!(f, "Action unavailable: {}", reason),
            GameError::InvalidPlacement => write!(f, "Invalid ship placement"),
            GameError::PlacementExhausted => {
                write!(f, "Random fleet placement failed within the retry bound")
            }
            GameError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
