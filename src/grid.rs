use std::collections::HashSet;
use std::ops::Range;

use rand::Rng;

use crate::error::BoardFull;
use crate::snake::Cell;

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
}

/// Rectangular block of cells, half-open on both axes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Region {
    pub x: Range<i32>,
    pub y: Range<i32>,
}

impl Grid {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `cell` lies inside the grid.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }

    /// Returns the whole grid as a region.
    #[must_use]
    pub fn full_region(self) -> Region {
        Region {
            x: 0..i32::from(self.width),
            y: 0..i32::from(self.height),
        }
    }

    /// Returns the central band spanning a quarter to three quarters of each axis.
    ///
    /// On a 40x40 grid this is columns and rows 10 through 30 inclusive.
    #[must_use]
    pub fn inner_region(self) -> Region {
        Region {
            x: inner_axis(self.width),
            y: inner_axis(self.height),
        }
    }

    /// Picks a uniformly random cell of the whole grid not in `excluded`.
    pub fn random_empty_cell<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        excluded: &HashSet<Cell>,
    ) -> Result<Cell, BoardFull> {
        random_cell_in(rng, &self.full_region(), excluded)
    }

    /// Picks a random empty cell from the inner region, used for goals.
    ///
    /// Falls back to the whole grid once the inner region is filled, so
    /// `BoardFull` is only reported when no cell at all is free.
    pub fn random_empty_inner_cell<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        excluded: &HashSet<Cell>,
    ) -> Result<Cell, BoardFull> {
        random_cell_in(rng, &self.inner_region(), excluded)
            .or_else(|BoardFull| self.random_empty_cell(rng, excluded))
    }
}

fn inner_axis(len: u16) -> Range<i32> {
    let len = i32::from(len);
    let low = len / 4;
    let high = (len * 3 / 4).min(len - 1);
    low..high + 1
}

fn random_cell_in<R: Rng + ?Sized>(
    rng: &mut R,
    region: &Region,
    excluded: &HashSet<Cell>,
) -> Result<Cell, BoardFull> {
    let mut candidates = Vec::new();

    for y in region.y.clone() {
        for x in region.x.clone() {
            let cell = Cell::new(x, y);
            if !excluded.contains(&cell) {
                candidates.push(cell);
            }
        }
    }

    if candidates.is_empty() {
        return Err(BoardFull);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
