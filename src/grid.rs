use crate::actor::Position;
use crate::config::GridSize;
use crate::level::Level;

/// Contents of one map cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Wall,
    Actor,
    /// Collectable carrying its growth value (1-9).
    Collectable(u8),
}

/// Glyphs used to turn cells into text.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Glyphs {
    pub actor: char,
    pub wall: char,
}

impl Cell {
    #[must_use]
    pub fn glyph(self, glyphs: Glyphs) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => glyphs.wall,
            Self::Actor => glyphs.actor,
            Self::Collectable(value) => char::from_digit(u32::from(value), 10).unwrap_or('+'),
        }
    }
}

/// Row-major map of cells with a fixed size.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    bounds: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self {
            bounds,
            cells: vec![Cell::Empty; bounds.total_cells()],
        }
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Writes a cell. Positions outside the grid are ignored.
    pub fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            self.cells[index] = cell;
        }
    }

    /// Redraws the whole map for `level` and stamps the actor at `start`.
    ///
    /// Running it twice yields the same grid.
    pub fn fill(&mut self, level: Level, start: Position) {
        for row in 0..self.bounds.height {
            for col in 0..self.bounds.width {
                let position = Position::new(row, col);
                let cell = if position.is_on_border(self.bounds) || level.is_obstacle(row, col) {
                    Cell::Wall
                } else {
                    Cell::Empty
                };
                self.set(position, cell);
            }
        }

        self.set(start, Cell::Actor);
    }

    /// Collects every empty interior cell in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|position| self.get(*position) == Some(Cell::Empty))
            .collect()
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.bounds.height)
            .flat_map(move |row| (0..self.bounds.width).map(move |col| Position::new(row, col)))
    }

    /// Renders one text line per row.
    #[must_use]
    pub fn render_rows(&self, glyphs: Glyphs) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.bounds.width.max(1)))
            .map(|row| row.iter().map(|cell| cell.glyph(glyphs)).collect())
            .collect()
    }

    fn index(&self, position: Position) -> Option<usize> {
        position.is_within_bounds(self.bounds).then(|| {
            usize::from(position.row) * usize::from(self.bounds.width) + usize::from(position.col)
        })
    }
}
