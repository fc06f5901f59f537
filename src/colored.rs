use std::fmt::{Display, Formatter};

use ndarray::{s, Array2};
use strum::VariantArray;

use crate::block::{Block, Coord};
use crate::partition::{Diagram, Partition};

/// Where a block of a [`ColoredPartition`] came from while maximizing.
#[derive(Copy, Clone, Default, strum::Display, VariantArray, Eq, PartialEq, Hash, Debug)]
pub enum Color {
    /// The block belongs to the canonical maximum shape.
    #[strum(to_string = "B")]
    Black,
    /// The block was added to fill the head and may still be relocated.
    #[strum(to_string = "G")]
    Grey,
    /// No provenance. Every unoccupied cell is blank.
    #[default]
    #[strum(to_string = ".")]
    Blank,
}

/// A [`Partition`] whose blocks each carry a [`Color`].
///
/// The color table is indexed by `(column, row)` and grows to cover every occupied block.
/// Cells outside the diagram are always [`Color::Blank`].
#[derive(Clone, Debug)]
pub struct ColoredPartition {
    partition: Partition,
    colors: Array2<Color>,
}

impl ColoredPartition {
    /// Wrap `partition` with every block blank.
    pub fn new(partition: Partition) -> Self {
        let dims = (partition.length(), partition[0]);
        Self { partition, colors: Array2::default(dims) }
    }

    /// The uncolored shape.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Drop the colors.
    pub fn into_partition(self) -> Partition {
        self.partition
    }

    /// Whether `block` lies inside the diagram.
    pub fn has_block(&self, block: Block) -> bool {
        self.partition[block.column()] > block.row()
    }

    /// Color of the topmost block of `column`, [`Color::Blank`] if the column is empty.
    pub fn color(&self, column: Coord) -> Color {
        match self.partition[column] {
            0 => Color::Blank,
            height => self.color_at(Block(column, height - 1)),
        }
    }

    /// Color of `block`, [`Color::Blank`] outside the diagram.
    pub fn color_at(&self, block: Block) -> Color {
        if !self.has_block(block) {
            return Color::Blank;
        }
        self.colors.get(block.as_index()).copied().unwrap_or_default()
    }

    /// Paint the topmost block of `column`. Empty columns are left alone.
    pub fn paint(&mut self, color: Color, column: Coord) {
        if let Some(row) = self.partition[column].checked_sub(1) {
            self.paint_at(color, Block(column, row));
        }
    }

    /// Paint `block` if it lies inside the diagram.
    pub fn paint_at(&mut self, color: Color, block: Block) {
        if self.has_block(block) {
            self.fit(block);
            self.colors[block.as_index()] = color;
        }
    }

    /// Paint every block of the Durfee square's columns from row `rank - 1` upward black.
    pub fn paint_head_black(&mut self) {
        let rank = self.partition.rank();
        for row in rank.saturating_sub(1)..self.partition[0] {
            for column in 0..rank {
                self.paint_at(Color::Black, Block(column, row));
            }
        }
    }

    /// Grow the head with grey blocks, row by row above the Durfee square, until it holds as many blocks as the tail.
    pub fn fill_head(&mut self) {
        let rank = self.partition.rank();
        if rank == 0 {
            return;
        }
        let mut missing = self.partition.tail().sum().saturating_sub(self.partition.head().sum()) / 2;

        // every row above the first column is empty, so the loop ends
        for row in rank.. {
            for column in 0..rank {
                if missing == 0 {
                    return;
                }
                if !self.has_block(Block(column, row)) {
                    self.insert(column);
                    self.paint(Color::Grey, column);
                    missing -= 1;
                }
            }
        }
    }

    /// Turn a graphical partition into the maximum graphical partition above it.
    ///
    /// The head is painted black and filled with grey blocks, then the tail is replaced by the conjugate of the grown head.
    /// The new tail takes its colors from the mirrored cells of the head.
    pub fn maximize(&mut self) {
        self.paint_head_black();
        self.fill_head();

        let rank = self.partition.rank();
        let tail = self.partition.head().conjugate();
        self.partition.replace_tail(&tail);

        if rank < self.colors.dim().0 {
            self.colors.slice_mut(s![rank.., ..]).fill(Color::Blank);
        }
        for column in rank..self.partition.length() {
            for row in 0..self.partition[column] {
                let mirrored = self.color_at(Block(row, column - 1));
                self.paint_at(mirrored, Block(column, row));
            }
        }
    }

    /// Whether the shape is valid and the color table covers exactly the diagram.
    pub fn is_valid(&self) -> bool {
        let (columns, rows) = self.colors.dim();
        self.partition.is_valid()
            && columns >= self.partition.length()
            && rows >= self.partition[0]
            && self.colors.indexed_iter()
                .all(|(cell, color)| *color == Color::Blank || self.has_block(Block::from(cell)))
    }

    fn fit(&mut self, block: Block) {
        let (columns, rows) = self.colors.dim();
        if block.column() < columns && block.row() < rows {
            return;
        }

        let mut grown = Array2::default((columns.max(block.column() + 1), rows.max(block.row() + 1)));
        grown.slice_mut(s![..columns, ..rows]).assign(&self.colors);
        self.colors = grown;
    }

    fn clear(&mut self, block: Block) {
        if let Some(cell) = self.colors.get_mut(block.as_index()) {
            *cell = Color::Blank;
        }
    }
}

impl Diagram for ColoredPartition {
    /// Move the topmost block of `from` to the top of `to`, carrying its color along.
    fn move_unit(&mut self, from: Coord, to: Coord) {
        if from == to {
            return;
        }

        let source = Block(from, self.partition[from] - 1);
        let carried = self.color_at(source);
        self.partition.move_unit(from, to);
        self.clear(source);
        self.paint(carried, to);
    }

    fn insert(&mut self, column: Coord) {
        self.partition.insert(column);
        self.fit(Block(column, self.partition[column] - 1));
    }

    fn remove(&mut self, column: Coord) {
        self.partition.remove(column);
        self.clear(Block(column, self.partition[column]));
    }
}

impl From<Partition> for ColoredPartition {
    fn from(partition: Partition) -> Self {
        Self::new(partition)
    }
}

impl PartialEq for ColoredPartition {
    fn eq(&self, other: &Self) -> bool {
        self.partition == other.partition
            && self.partition.blocks().all(|block| self.color_at(block) == other.color_at(block))
    }
}

impl Eq for ColoredPartition {}

impl Display for ColoredPartition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.partition[0]).rev() {
            let width = self.partition.rightmost_by_row(row).map_or(0, |last| last + 1);
            for column in 0..width {
                write!(f, "{} ", self.color_at(Block(column, row)))?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        write!(f, "| {}", self.partition.sum())
    }
}
