use alloc::vec::Vec;
use core::fmt;

use crate::ship::ShipType;

pub const DEFAULT_BOARD_SIZE: usize = 12;
/// Widest board whose columns can be named by a single letter `A`..`Z`.
pub const MAX_BOARD_SIZE: usize = 26;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Ship whose loss grounds the reconnaissance aircraft.
pub const FLAGSHIP: &str = "Carrier";

/// Random draws per ship before random placement gives up.
pub const PLACEMENT_ATTEMPTS: usize = 100;
/// Whole-board regenerations before a session reports placement failure.
pub const BOARD_GENERATION_ATTEMPTS: usize = 20;
/// Random draws the opponent makes looking for an unattacked cell.
pub const TARGET_ATTEMPTS: usize = 100;
/// Random draws spent picking reconnaissance cells.
pub const RECON_ATTEMPTS: usize = 100;
/// Cells revealed by one reconnaissance flight.
pub const RECON_CELLS: usize = 3;
pub const SPECIAL_ACTION_USES: u8 = 3;

/// Reasons a [`GameConfig`] cannot produce a playable match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board has no cells.
    EmptyBoard,
    /// Board is wider than the column alphabet.
    BoardTooLarge { size: usize, max: usize },
    /// Fleet roster has no ships.
    EmptyFleet,
    /// A roster entry has length zero.
    ZeroLengthShip(&'static str),
    /// A roster entry cannot fit along a single row or column.
    ShipTooLong { name: &'static str, length: usize, board_size: usize },
    /// Ships plus their one-cell buffer cannot all fit on the board.
    FleetTooLarge { required: usize, available: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyBoard => write!(f, "Board size must be at least 1"),
            ConfigError::BoardTooLarge { size, max } => {
                write!(f, "Board size {} exceeds the maximum of {}", size, max)
            }
            ConfigError::EmptyFleet => write!(f, "Fleet must contain at least one ship"),
            ConfigError::ZeroLengthShip(name) => write!(f, "Ship {} has length 0", name),
            ConfigError::ShipTooLong {
                name,
                length,
                board_size,
            } => write!(
                f,
                "Ship {} of length {} does not fit on a {}x{} board",
                name, length, board_size, board_size
            ),
            ConfigError::FleetTooLarge {
                required,
                available,
            } => write!(
                f,
                "Fleet needs {} buffered cells but the board only offers {}",
                required, available
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Parameters of a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: Vec<ShipType>,
    pub special_action_uses: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            fleet: FLEET.to_vec(),
            special_action_uses: SPECIAL_ACTION_USES,
        }
    }
}

impl GameConfig {
    /// Standard fleet on a board of the given size.
    pub fn with_board_size(board_size: usize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Check that the fleet can be laid out under the no-touching rule.
    ///
    /// Extending every ship by one cell to the right and one cell down turns
    /// the no-touching rule into plain disjointness on an (N+1)×(N+1) grid,
    /// so the summed extended areas must not exceed that grid. The bound is
    /// necessary, not sufficient: random placement may still exhaust.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        let mut required = 0usize;
        for ship in &self.fleet {
            if ship.length() == 0 {
                return Err(ConfigError::ZeroLengthShip(ship.name()));
            }
            if ship.length() > self.board_size {
                return Err(ConfigError::ShipTooLong {
                    name: ship.name(),
                    length: ship.length(),
                    board_size: self.board_size,
                });
            }
            required += (ship.length() + 1) * 2;
        }
        let available = (self.board_size + 1) * (self.board_size + 1);
        if required > available {
            return Err(ConfigError::FleetTooLarge {
                required,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(GameConfig::with_board_size(10).validate(), Ok(()));
    }

    #[test]
    fn rejects_oversized_ship() {
        let cfg = GameConfig::with_board_size(4);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ShipTooLong { name: "Carrier", .. })
        ));
    }

    #[test]
    fn rejects_crowded_fleet() {
        let cfg = GameConfig {
            board_size: 5,
            fleet: vec![
                ShipType::new("A", 5),
                ShipType::new("B", 5),
                ShipType::new("C", 5),
                ShipType::new("D", 5),
            ],
            special_action_uses: 0,
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::FleetTooLarge {
                required: 48,
                available: 36
            })
        );
    }

    #[test]
    fn rejects_empty_inputs() {
        let mut cfg = GameConfig::default();
        cfg.fleet.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyFleet));
        cfg = GameConfig::with_board_size(0);
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyBoard));
        cfg = GameConfig {
            fleet: vec![ShipType::new("Raft", 0)],
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroLengthShip("Raft")));
    }

    #[test]
    fn rejects_board_wider_than_alphabet() {
        assert_eq!(GameConfig::with_board_size(MAX_BOARD_SIZE).validate(), Ok(()));
        assert_eq!(
            GameConfig::with_board_size(MAX_BOARD_SIZE + 1).validate(),
            Err(ConfigError::BoardTooLarge { size: 27, max: 26 })
        );
        assert!(GameConfig::with_board_size(200).validate().is_err());
    }
}
