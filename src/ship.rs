//! Ship definitions and per-ship hit tracking.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use crate::common::BoardError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Row/column step between consecutive segments.
    pub(crate) fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Cells covered by a ship of `length` from (`row`, `col`), or `None` when it
/// would leave an `n`×`n` grid.
pub(crate) fn span(
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
    n: usize,
) -> Option<impl Iterator<Item = (usize, usize)>> {
    let (dr, dc) = orientation.step();
    let end_row = row.checked_add(dr * length.saturating_sub(1))?;
    let end_col = col.checked_add(dc * length.saturating_sub(1))?;
    if length == 0 || end_row >= n || end_col >= n {
        return None;
    }
    Some((0..length).map(move |i| (row + dr * i, col + dc * i)))
}

/// A ship placed on a board, with the coordinates it occupies and the ones
/// already struck.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    orientation: Orientation,
    positions: Vec<(usize, usize)>,
    hits: BTreeSet<(usize, usize)>,
}

impl Ship {
    /// Lay out a ship at (`row`, `col`) with `orientation` on an `n`×`n` grid.
    pub fn new(
        ship_type: ShipType,
        orientation: Orientation,
        row: usize,
        col: usize,
        n: usize,
    ) -> Result<Self, BoardError> {
        let positions: Vec<_> = span(row, col, ship_type.length(), orientation, n)
            .ok_or(BoardError::InvalidPlacement)?
            .collect();
        Ok(Ship {
            ship_type,
            orientation,
            positions,
            hits: BTreeSet::new(),
        })
    }

    /// Register a hit at (`row`, `col`).
    /// Returns `true` if the coordinate belongs to this ship.
    pub fn register_hit(&mut self, row: usize, col: usize) -> bool {
        if self.contains(row, col) {
            self.hits.insert((row, col));
            true
        } else {
            false
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.ship_type.length()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.positions.contains(&(row, col))
    }

    /// Occupied coordinates, left-to-right or top-to-bottom.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions.iter().copied()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        self.positions[0]
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.origin();
        write!(
            f,
            "Ship {{ name: \"{}\", origin: ({}, {}), orientation: {:?}, hits: {}/{} }}",
            self.ship_type.name(),
            row,
            col,
            self.orientation,
            self.hits.len(),
            self.ship_type.length(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn lays_out_cells_in_order() {
        let ship = Ship::new(ShipType::new("Test", 4), Orientation::Vertical, 0, 2, 5).unwrap();
        let cells: Vec<_> = ship.cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(ship.origin(), (0, 2));
        assert!(!ship.contains(4, 2));
    }

    #[test]
    fn rejects_ship_leaving_grid() {
        let def = ShipType::new("Test", 3);
        assert_eq!(
            Ship::new(def, Orientation::Horizontal, 0, 3, 5).unwrap_err(),
            BoardError::InvalidPlacement
        );
        assert!(Ship::new(def, Orientation::Horizontal, 0, 2, 5).is_ok());
        assert!(Ship::new(def, Orientation::Vertical, usize::MAX, 0, 5).is_err());
    }

    #[test]
    fn sinks_after_every_segment_hit() {
        let mut ship = Ship::new(ShipType::new("Test", 2), Orientation::Horizontal, 1, 1, 4).unwrap();
        assert!(!ship.is_sunk());
        assert!(ship.register_hit(1, 1));
        assert!(!ship.is_sunk());
        // repeated hit does not count twice
        assert!(ship.register_hit(1, 1));
        assert_eq!(ship.hit_count(), 1);
        assert!(ship.register_hit(1, 2));
        assert!(ship.is_sunk());
        assert!(!ship.register_hit(0, 0));
    }
}
