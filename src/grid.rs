/// Number of whole blocks that fit into an image.
///
/// Remainder strips at the right and bottom edge that are narrower than one
/// block are not part of the plan; they are neither read nor painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridPlan {
    horizontal_count: u32,
    vertical_count: u32,
}

/// A single block of a [`GridPlan`], addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub column: u32,
}

impl Cell {
    /// Top left pixel of this cell as `(x, y)`.
    pub fn origin(&self, square_size: u32) -> (u32, u32) {
        (self.column * square_size, self.row * square_size)
    }
}

impl GridPlan {
    pub fn new(width: u32, height: u32, square_size: u32) -> Self {
        GridPlan {
            horizontal_count: width / square_size,
            vertical_count: height / square_size,
        }
    }

    pub fn horizontal_count(&self) -> u32 {
        self.horizontal_count
    }

    pub fn vertical_count(&self) -> u32 {
        self.vertical_count
    }

    pub fn cell_count(&self) -> usize {
        self.horizontal_count as usize * self.vertical_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Cells of one row, left to right.
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = Cell> {
        (0..self.horizontal_count).map(move |column| Cell { row, column })
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.vertical_count).flat_map(move |row| self.row_cells(row))
    }
}
