use std::fmt::{Display, Formatter};

/// A column or row index of a Young diagram.
pub type Coord = usize;

/// A unit cell `(column, row)` of a Young diagram. The bottom left corner is `Block(0, 0)`.
///
/// Columns are the parts of a partition, so column `c` of a partition `p` holds the blocks `Block(c, 0)` through `Block(c, p[c] - 1)`.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct Block(pub Coord, pub Coord);

impl Block {
    /// The column this block sits in.
    #[inline]
    pub fn column(&self) -> Coord {
        self.0
    }

    /// The row this block sits in, counted from the bottom.
    #[inline]
    pub fn row(&self) -> Coord {
        self.1
    }

    /// The block at the mirrored position once the diagram is transposed.
    #[inline]
    pub fn transpose(self) -> Self {
        Self(self.1, self.0)
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    /// Translate this block `columns` columns to the right, keeping its row.
    pub(crate) fn shift_right(self, columns: Coord) -> Self {
        Self(self.0 + columns, self.1)
    }
}

impl From<(Coord, Coord)> for Block {
    fn from(value: (Coord, Coord)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}
