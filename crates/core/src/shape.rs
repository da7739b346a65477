//! Shape module - boolean occupancy matrices for piece bounding boxes
//!
//! A shape is at most 4x4 and stored inline, so shapes are `Copy` and rotation
//! never allocates.

/// Largest bounding-box side of any piece
pub const MAX_SHAPE_SIDE: usize = 4;

/// Occupancy matrix of a piece's bounding box
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major, only `[..height][..width]` is meaningful
    rows: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4; shapes are
    /// authored as constants, so this is a programming error.
    pub fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && H > 0, "shape must not be empty");
        assert!(
            W <= MAX_SHAPE_SIDE && H <= MAX_SHAPE_SIDE,
            "shape larger than {MAX_SHAPE_SIDE}x{MAX_SHAPE_SIDE}"
        );

        let mut out = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                out[y][x] = v != 0;
            }
        }
        Self {
            width: W as u8,
            height: H as u8,
            rows: out,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at column `x`, row `y` of the bounding box is filled
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.rows[y][x]
    }

    /// Offsets `(x, y)` of every filled cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |y| {
            (0..self.width as usize)
                .filter(move |&x| self.rows[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }

    /// Quarter turn: transpose, then reverse the row order.
    ///
    /// `rotated[i][j] = self[j][width - 1 - i]`; the new width is the old
    /// height. Four turns give back the original shape.
    pub fn rotated(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut out = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in out.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.rows[j][w - 1 - i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            rows: out,
        }
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Shape[")?;
        for y in 0..self.height as usize {
            if y > 0 {
                f.write_str("/")?;
            }
            for x in 0..self.width as usize {
                f.write_str(if self.rows[y][x] { "#" } else { "." })?;
            }
        }
        f.write_str("]")
    }
}
