use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::iter;
use std::ops::Index;

use itertools::Itertools;
use ndarray::Array2;
use rand::Rng;

use crate::block::{Block, Coord};
use crate::graph::Graph;

/// A Young diagram which can be edited one unit block at a time.
///
/// Edits never check that columns stay weakly decreasing. Callers are expected to consult
/// [`Partition::is_valid`] afterwards before trusting derived values such as the rank.
pub trait Diagram {
    /// Take the topmost block of column `from` and stack it on column `to`.
    ///
    /// # Panics
    /// If column `from` is empty.
    fn move_unit(&mut self, from: Coord, to: Coord);

    /// Stack a new block on column `column`.
    fn insert(&mut self, column: Coord);

    /// Remove the topmost block of column `column`.
    ///
    /// # Panics
    /// If column `column` is empty.
    fn remove(&mut self, column: Coord);
}

/// An integer partition drawn as a Young diagram of column heights, implicitly padded with empty columns.
///
/// Partitions are ordered by dominance: `a <= b` exactly when every prefix sum of `a` is at most the matching prefix sum of `b`.
/// Two partitions whose prefix sums cross are incomparable and [`partial_cmp`](PartialOrd::partial_cmp) yields [`None`].
#[derive(Clone, Debug, Default)]
pub struct Partition {
    columns: Vec<Coord>,
    sum: usize,
}

impl Partition {
    /// Build a partition from explicit column heights. The heights are kept as given, even if they are not weakly decreasing.
    pub fn new(columns: Vec<Coord>) -> Self {
        let sum = columns.iter().sum();
        Self { columns, sum }
    }

    /// `columns` columns, each `rows` blocks tall.
    pub fn rectangle(columns: usize, rows: usize) -> Self {
        Self::new(vec![rows; columns])
    }

    /// Scatter `sum` blocks uniformly over a square grid just large enough to hold them and read off the sorted row sums.
    pub fn random<R: Rng + ?Sized>(sum: usize, rng: &mut R) -> Self {
        let side = ((2 * sum) as f64).sqrt() as usize + 1;
        let mut grid = Array2::from_elem((side, side), false);

        let mut remaining = sum;
        while remaining > 0 {
            let cell = &mut grid[(rng.gen_range(0..side), rng.gen_range(0..side))];
            if !*cell {
                *cell = true;
                remaining -= 1;
            }
        }

        Self::new(grid.outer_iter()
            .map(|row| row.iter().filter(|occupied| **occupied).count())
            .filter(|count| *count > 0)
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect())
    }

    /// Column heights up to the last non-empty column.
    pub fn columns(&self) -> &[Coord] {
        let end = self.columns.iter().rposition(|height| *height > 0).map_or(0, |last| last + 1);
        &self.columns[..end]
    }

    /// Every occupied block, column by column from the bottom up.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.columns.iter()
            .enumerate()
            .flat_map(|(column, height)| (0..*height).map(move |row| Block(column, row)))
    }

    /// Total number of blocks.
    pub fn sum(&self) -> usize {
        self.sum
    }

    /// Number of leading non-empty columns.
    pub fn length(&self) -> usize {
        self.columns.iter().take_while(|height| **height > 0).count()
    }

    /// Whether this diagram holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.sum == 0
    }

    /// Side length of the Durfee square, the largest square fitting in the bottom left corner.
    pub fn rank(&self) -> usize {
        (0..).find(|i| self[*i] <= *i).unwrap_or_default()
    }

    /// Whether the stored sum is accurate and the columns are weakly decreasing.
    pub fn is_valid(&self) -> bool {
        self.sum == self.columns.iter().sum::<usize>()
            && self.columns.iter().tuple_windows().all(|(left, right)| left >= right)
    }

    /// The columns of the Durfee square, each with the first `rank - 1` blocks cut off.
    pub fn head(&self) -> Partition {
        let rank = self.rank();
        Self::new(self.columns[..rank].iter().map(|height| height.saturating_sub(rank - 1)).collect())
    }

    /// The conjugate of the columns right of the Durfee square, which is the excess below the square read sideways.
    pub fn tail(&self) -> Partition {
        let rank = self.rank();
        Self::new(self.columns[rank..].to_vec()).conjugate()
    }

    /// The transposed diagram.
    pub fn conjugate(&self) -> Partition {
        let height = self.columns.iter().copied().max().unwrap_or_default();
        Self::new((0..height)
            .map(|row| self.columns.iter().filter(|column| **column > row).count())
            .collect())
    }

    /// Overwrite every column right of the Durfee square with the columns of `tail`.
    pub fn replace_tail(&mut self, tail: &Partition) {
        let rank = self.rank();
        self.columns.truncate(rank);
        self.columns.extend_from_slice(tail.columns());
        self.sum = self.columns.iter().sum();
    }

    /// Whether this partition is the degree sequence of some simple graph, tested as an even sum with a tail dominating the head.
    pub fn is_graphical(&self) -> bool {
        self.is_valid() && self.sum % 2 == 0 && self.tail() >= self.head()
    }

    /// Whether this partition is graphical and maximal in dominance order among graphical partitions, which happens exactly when the head equals the tail.
    pub fn is_maximum_graphical(&self) -> bool {
        self.is_valid() && self.head() == self.tail()
    }

    /// Whether column `column` can grow by one block without breaking weak decrease.
    pub fn is_insertable(&self, column: Coord) -> bool {
        column == 0 || self[column - 1] > self[column]
    }

    /// Whether column `column` can lose its top block without breaking weak decrease.
    pub fn is_removable(&self, column: Coord) -> bool {
        self[column] > self[column + 1]
    }

    /// The last column that reaches row `row`, or [`None`] if no column does.
    pub fn rightmost_by_row(&self, row: Coord) -> Option<Coord> {
        (0..).find(|i| self[*i] <= row).and_then(|first_short| first_short.checked_sub(1))
    }

    /// The last column as tall as column `column`. An empty column is its own answer.
    pub fn rightmost_by_column(&self, column: Coord) -> Option<Coord> {
        match self[column] {
            0 => Some(column),
            height => self.rightmost_by_row(height - 1),
        }
    }

    fn prefix_sums(&self, width: usize) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter()
            .chain(iter::repeat(&0))
            .take(width)
            .scan(0, |total, height| {
                *total += height;
                Some(*total)
            })
    }
}

impl Diagram for Partition {
    fn move_unit(&mut self, from: Coord, to: Coord) {
        if to >= self.columns.len() {
            self.columns.resize(to + 1, 0);
        }
        self.columns[from] -= 1;
        self.columns[to] += 1;
    }

    fn insert(&mut self, column: Coord) {
        if column >= self.columns.len() {
            self.columns.resize(column + 1, 0);
        }
        self.columns[column] += 1;
        self.sum += 1;
    }

    fn remove(&mut self, column: Coord) {
        self.columns[column] -= 1;
        self.sum -= 1;
    }
}

impl Index<Coord> for Partition {
    type Output = Coord;

    fn index(&self, column: Coord) -> &Self::Output {
        self.columns.get(column).unwrap_or(&0)
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.sum == other.sum && self.columns() == other.columns()
    }
}

impl Eq for Partition {}

impl Hash for Partition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.columns().hash(state);
    }
}

impl PartialOrd for Partition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }

        let width = self.columns.len().max(other.columns.len());
        let (below, above) = self.prefix_sums(width)
            .zip(other.prefix_sums(width))
            .fold((false, false), |(below, above), (ours, theirs)| (below || ours < theirs, above || ours > theirs));

        match (below, above) {
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            // crossing prefix sums
            _ => None,
        }
    }
}

impl From<Vec<Coord>> for Partition {
    fn from(columns: Vec<Coord>) -> Self {
        Self::new(columns)
    }
}

impl<const N: usize> From<[Coord; N]> for Partition {
    fn from(columns: [Coord; N]) -> Self {
        Self::new(columns.to_vec())
    }
}

impl From<&Graph> for Partition {
    /// The positive vertex degrees of `graph`, sorted descending.
    fn from(graph: &Graph) -> Self {
        Self::new(graph.degrees()
            .filter(|degree| *degree > 0)
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect())
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.columns().is_empty() {
            return write!(f, "[0] | {}", self.sum);
        }
        write!(f, "[{}] | {}", self.columns().iter().join(" "), self.sum)
    }
}
