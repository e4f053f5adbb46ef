use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coord, Coord2};

/// Per-cell view data exactly as the state service reports it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub revealed: bool,
    pub flagged: bool,
    pub has_mine: bool,
    pub touching_mines: u8,
    pub touching_flags: u8,
}

/// Full board snapshot, indexed `[x, y]`.
pub type Grid = Array2<Cell>;

/// One cell delta, carried on the wire as an `[x, y, cell]` triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange(pub Coord, pub Coord, pub Cell);

impl CellChange {
    pub const fn coords(&self) -> Coord2 {
        (self.0, self.1)
    }

    pub const fn cell(&self) -> Cell {
        self.2
    }
}

/// Ordered batch of cell deltas between two consecutive board states.
pub type GridChanges = Vec<CellChange>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChangeError {
    #[error("change targets ({0}, {1}) outside the grid")]
    OutOfBounds(Coord, Coord),
}

/// Patches `grid` with an ordered batch of deltas, in batch order.
///
/// The whole batch is rejected when any entry lands outside the grid, leaving
/// `grid` untouched.
pub fn apply_changes(grid: &mut Grid, changes: &[CellChange]) -> Result<(), ChangeError> {
    let (width, height) = grid.dim();

    for change in changes {
        let (x, y) = change.coords();
        if usize::from(x) >= width || usize::from(y) >= height {
            return Err(ChangeError::OutOfBounds(x, y));
        }
    }

    for change in changes {
        let (x, y) = change.coords();
        grid[[usize::from(x), usize::from(y)]] = change.cell();
    }

    Ok(())
}
