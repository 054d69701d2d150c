//! Game board state: the cell grid and the ships placed on it.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, warn};
use rand::Rng;

use crate::common::{AttackResult, BoardError, Cell};
use crate::config::PLACEMENT_ATTEMPTS;
use crate::ship::{span, Orientation, Ship, ShipType};

/// Square grid of cells plus the ships occupying it, in placement order.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty `size`×`size` board (no ships placed).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            ships: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// State of the cell at (row, col).
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// `true` once (row, col) has been hit or missed.
    pub fn is_attacked(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        self.cell(row, col).map(Cell::is_attacked)
    }

    /// Coordinates that can still be attacked, in row-major order.
    pub fn unattacked_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_attacked())
            .map(move |(i, _)| (i / n, i % n))
    }

    /// Ship covering (row, col), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(row, col))
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Whether a ship of `length` fits at (row, col): inside the grid, on
    /// empty water, and not touching any placed ship, diagonals included.
    pub fn is_valid_placement(
        &self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> bool {
        let Some(mut cells) = span(row, col, length, orientation, self.size) else {
            return false;
        };
        cells.all(|(r, c)| {
            self.cells[r * self.size + c] == Cell::Empty
                && self
                    .neighbourhood(r, c)
                    .all(|(nr, nc)| self.cells[nr * self.size + nc] != Cell::Ship)
        })
    }

    /// Place a ship of `ship_type` at (row, col). Nothing changes on failure.
    pub fn place_ship(
        &mut self,
        ship_type: ShipType,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if !self.is_valid_placement(row, col, ship_type.length(), orientation) {
            return Err(BoardError::InvalidPlacement);
        }
        let ship = Ship::new(ship_type, orientation, row, col, self.size)?;
        for (r, c) in ship.cells() {
            self.cells[r * self.size + c] = Cell::Ship;
        }
        debug!(
            "placed {} at ({}, {}) {:?}",
            ship_type.name(),
            row,
            col,
            orientation
        );
        self.ships.push(ship);
        Ok(())
    }

    /// Place every ship of `fleet` in order at uniformly random spots.
    ///
    /// Each ship gets [`PLACEMENT_ATTEMPTS`] draws. When one runs out the
    /// error names it and the ships placed so far stay on the board; callers
    /// discard the board and start over from [`Board::new`].
    pub fn place_ships_randomly<R: Rng + ?Sized>(
        &mut self,
        fleet: &[ShipType],
        rng: &mut R,
    ) -> Result<(), BoardError> {
        for &ship_type in fleet {
            let mut placed = false;
            let attempts = if self.size == 0 { 0 } else { PLACEMENT_ATTEMPTS };
            for _ in 0..attempts {
                let row = rng.random_range(0..self.size);
                let col = rng.random_range(0..self.size);
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                if self.place_ship(ship_type, row, col, orientation).is_ok() {
                    placed = true;
                    break;
                }
            }
            if !placed {
                warn!(
                    "gave up placing {} after {} attempts",
                    ship_type.name(),
                    PLACEMENT_ATTEMPTS
                );
                return Err(BoardError::PlacementExhausted(ship_type.name()));
            }
        }
        Ok(())
    }

    /// Build a fresh board holding `fleet`, regenerating from scratch up to
    /// `attempts` times.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        fleet: &[ShipType],
        rng: &mut R,
        attempts: usize,
    ) -> Result<Self, BoardError> {
        let mut last = BoardError::PlacementExhausted("fleet");
        for _ in 0..attempts {
            let mut board = Board::new(size);
            match board.place_ships_randomly(fleet, rng) {
                Ok(()) => return Ok(board),
                Err(e) => last = e,
            }
        }
        Err(last)
    }

    /// Resolve an incoming attack at (row, col).
    pub fn receive_attack(&mut self, row: usize, col: usize) -> Result<AttackResult, BoardError> {
        let idx = self.index(row, col)?;
        match self.cells[idx] {
            Cell::Empty => {
                self.cells[idx] = Cell::Miss;
                Ok(AttackResult::Miss)
            }
            Cell::Ship => {
                let ship = self
                    .ships
                    .iter_mut()
                    .find(|s| s.contains(row, col))
                    .ok_or(BoardError::UnknownShipHit { row, col })?;
                ship.register_hit(row, col);
                self.cells[idx] = Cell::Hit;
                if ship.is_sunk() {
                    Ok(AttackResult::Sunk(ship.name()))
                } else {
                    Ok(AttackResult::Hit)
                }
            }
            Cell::Hit | Cell::Miss => Ok(AttackResult::AlreadyAttacked),
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.size || col >= self.size {
            Err(BoardError::OutOfBounds { row, col })
        } else {
            Ok(row * self.size + col)
        }
    }

    /// Moore neighbourhood of (row, col) including itself, clipped to the grid.
    fn neighbourhood(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let n = self.size;
        let rows = row.saturating_sub(1)..=(row + 1).min(n - 1);
        rows.flat_map(move |r| (col.saturating_sub(1)..=(col + 1).min(n - 1)).map(move |c| (r, c)))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {:?} }}", self.size, self.ships)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let ch = match self.cells[r * self.size + c] {
                    Cell::Empty => '.',
                    Cell::Ship => 'S',
                    Cell::Hit => 'X',
                    Cell::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
