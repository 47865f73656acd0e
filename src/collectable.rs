use rand::Rng;

use crate::actor::Position;
use crate::grid::{Cell, Grid};

/// Smallest growth value a collectable can carry.
pub const MIN_VALUE: u8 = 1;

/// Largest growth value a collectable can carry.
pub const MAX_VALUE: u8 = 9;

/// The numbered item currently placed on the map.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Collectable {
    pub position: Position,
    pub value: u8,
}

impl Collectable {
    /// Creates a collectable, clamping `value` into the digit range.
    #[must_use]
    pub fn new(position: Position, value: u8) -> Self {
        Self {
            position,
            value: value.clamp(MIN_VALUE, MAX_VALUE),
        }
    }

    /// Size growth granted when eaten.
    #[must_use]
    pub fn growth(self) -> u32 {
        u32::from(self.value)
    }

    #[must_use]
    pub fn cell(self) -> Cell {
        Cell::Collectable(self.value)
    }

    /// Picks a random value and a random empty cell.
    ///
    /// Returns `None` when the map has no empty cell left.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Option<Self> {
        let position = spawn_position(rng, grid)?;
        let value = rng.gen_range(MIN_VALUE..=MAX_VALUE);
        Some(Self { position, value })
    }
}

/// Samples uniformly among the cells that are currently empty.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Option<Position> {
    let candidates = grid.empty_cells();
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
