//! Simple graphs, their degree sequences and edge rotations towards a threshold graph.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use rand::Rng;
use thiserror::Error;
use tracing::debug;
use unordered_pair::UnorderedPair;

/// Index of a vertex of a [`Graph`].
pub type Vertex = usize;

/// Three vertices `x`, `v` and `y` naming the rotation of edge `x–v` onto `v–y`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Triple {
    /// Loses its edge to `v`.
    pub x: Vertex,
    /// The pivot.
    pub v: Vertex,
    /// Gains an edge to `v`.
    pub y: Vertex,
}

impl Triple {
    /// The triple rotating `x–v` onto `v–y`.
    pub fn new(x: Vertex, v: Vertex, y: Vertex) -> Self {
        Self { x, v, y }
    }
}

impl Display for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.v, self.y)
    }
}

/// Reasons an adjacency matrix may be rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum GraphFailure {
    /// Some row is not as long as there are rows.
    #[error("adjacency matrix should be square, got {rows} rows and a row of {columns}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Length of the first offending row.
        columns: usize,
    },
    /// Edges are undirected.
    #[error("adjacency matrix is not symmetric at ({x}, {y})")]
    NotSymmetric {
        /// Row of the mismatch.
        x: Vertex,
        /// Column of the mismatch.
        y: Vertex,
    },
    /// Simple graphs have no loops.
    #[error("vertex {0} is connected to itself")]
    SelfLoop(Vertex),
}

/// A simple undirected graph stored as an adjacency matrix.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Graph {
    adjacency: Array2<bool>,
}

impl Graph {
    /// `size` vertices and no edges.
    pub fn empty(size: usize) -> Self {
        Self { adjacency: Array2::from_elem((size, size), false) }
    }

    /// Check that `adjacency` describes a simple undirected graph and wrap it.
    pub fn from_adjacency(adjacency: Array2<bool>) -> Result<Self, GraphFailure> {
        let (rows, columns) = adjacency.dim();
        if rows != columns {
            return Err(GraphFailure::NotSquare { rows, columns });
        }
        if let Some(v) = (0..rows).find(|v| adjacency[(*v, *v)]) {
            return Err(GraphFailure::SelfLoop(v));
        }
        if let Some((x, y)) = (0..rows).tuple_combinations::<(_, _)>().find(|(x, y)| adjacency[(*x, *y)] != adjacency[(*y, *x)]) {
            return Err(GraphFailure::NotSymmetric { x, y });
        }
        Ok(Self { adjacency })
    }

    /// `size` vertices, each pair of them connected with probability one half.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut graph = Self::empty(size);
        for edge in (0..size).tuple_combinations::<(_, _)>() {
            if rng.gen_bool(0.5) {
                graph.connect(UnorderedPair::from(edge));
            }
        }
        graph
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.adjacency.nrows()
    }

    /// Whether `x` and `y` share an edge.
    pub fn are_connected(&self, x: Vertex, y: Vertex) -> bool {
        self.adjacency[(x, y)]
    }

    /// Add `edge`. Connecting a vertex to itself does nothing.
    pub fn connect(&mut self, edge: UnorderedPair<Vertex>) {
        let UnorderedPair(x, y) = edge;
        if x != y {
            self.adjacency[(x, y)] = true;
            self.adjacency[(y, x)] = true;
        }
    }

    /// Drop `edge` if present.
    pub fn disconnect(&mut self, edge: UnorderedPair<Vertex>) {
        let UnorderedPair(x, y) = edge;
        self.adjacency[(x, y)] = false;
        self.adjacency[(y, x)] = false;
    }

    /// Every edge, each listed once.
    pub fn edges(&self) -> impl Iterator<Item = UnorderedPair<Vertex>> + '_ {
        (0..self.size())
            .tuple_combinations::<(_, _)>()
            .filter(|(x, y)| self.are_connected(*x, *y))
            .map(UnorderedPair::from)
    }

    /// Number of neighbours of `vertex`.
    pub fn degree(&self, vertex: Vertex) -> usize {
        self.adjacency.row(vertex).iter().filter(|connected| **connected).count()
    }

    /// The degree of every vertex, in vertex order.
    pub fn degrees(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size()).map(|vertex| self.degree(vertex))
    }

    /// Replace edge `x–v` with edge `v–y`.
    pub fn rotate_edge(&mut self, triple: Triple) {
        self.disconnect(UnorderedPair(triple.x, triple.v));
        self.connect(UnorderedPair(triple.v, triple.y));
    }

    fn is_rotatable(&self, triple: Triple) -> bool {
        self.are_connected(triple.x, triple.v) && !self.are_connected(triple.y, triple.v)
    }

    /// Whether rotating `triple` moves an edge from a vertex to one of at least the same degree.
    pub fn is_increasing_triple(&self, triple: Triple) -> bool {
        self.is_rotatable(triple) && self.degree(triple.x) <= self.degree(triple.y)
    }

    /// Whether rotating `triple` moves an edge from a vertex to one of degree at least two lower.
    pub fn is_decreasing_triple(&self, triple: Triple) -> bool {
        self.is_rotatable(triple) && self.degree(triple.x) > self.degree(triple.y) + 1
    }

    /// An increasing triple with `y` of the highest degree possible and, for that `y`, `x` of the lowest degree possible.
    pub fn max_increasing_triple(&self) -> Option<Triple> {
        let by_degree = (0..self.size())
            .sorted_by_key(|vertex| std::cmp::Reverse(self.degree(*vertex)))
            .collect_vec();

        by_degree.iter()
            .enumerate()
            .flat_map(|(i, y)| by_degree[i + 1..].iter().rev().map(move |x| (*x, *y)))
            .find_map(|(x, y)| (0..self.size())
                .filter(|v| *v != x && *v != y)
                .map(|v| Triple { x, v, y })
                .find(|triple| self.is_rotatable(*triple)))
    }

    /// Whether no increasing triple is left, which makes the degree sequence a threshold sequence.
    pub fn is_limit(&self) -> bool {
        self.max_increasing_triple().is_none()
    }

    /// Rotate maximal increasing triples until the graph is a limit, returning the number of rotations.
    pub fn greedy_edge_rotation(&mut self) -> usize {
        let mut rotations = 0;
        while let Some(triple) = self.max_increasing_triple() {
            self.rotate_edge(triple);
            rotations += 1;
            debug!("rotation #{rotations} {triple}");
        }
        debug!("total: {rotations} rotations");
        rotations
    }
}

impl TryFrom<Vec<Vec<u8>>> for Graph {
    type Error = GraphFailure;

    /// Read a matrix of zeros and ones, row by row.
    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(GraphFailure::NotSquare { rows: size, columns: row.len() });
        }
        Self::from_adjacency(Array2::from_shape_fn((size, size), |(x, y)| rows[x][y] > 0))
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{{")?;
        for row in self.adjacency.outer_iter() {
            writeln!(f, "{{{}}},", row.iter().map(|connected| u8::from(*connected)).join(", "))?;
        }
        write!(f, "}}")
    }
}
