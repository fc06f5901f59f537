use std::fmt::{Display, Formatter};
use std::ops::Index;

use itertools::Itertools;

use crate::block::Block;
use crate::partition::Diagram;

/// An atomic edit of a Young diagram, naming the exact cells it touches.
///
/// Applying a transition only looks at columns. The rows are bookkeeping, used when transposing and inverting.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PartitionTransition {
    /// Relocate the block at `from` to the empty cell `to`.
    Move {
        /// The block taken away.
        from: Block,
        /// The cell it lands in.
        to: Block,
    },
    /// Add a block at the given cell.
    Insert(Block),
    /// Take away the block at the given cell.
    Remove(Block),
}

impl PartitionTransition {
    /// Run this edit against `diagram`.
    pub fn apply<D: Diagram + ?Sized>(&self, diagram: &mut D) {
        match *self {
            Self::Move { from, to } => diagram.move_unit(from.column(), to.column()),
            Self::Insert(block) => diagram.insert(block.column()),
            Self::Remove(block) => diagram.remove(block.column()),
        }
    }

    /// The edit undoing this one.
    pub fn inverse(&self) -> Self {
        match *self {
            Self::Move { from, to } => Self::Move { from: to, to: from },
            Self::Insert(block) => Self::Remove(block),
            Self::Remove(block) => Self::Insert(block),
        }
    }

    /// The same edit seen on the transposed diagram.
    pub fn conjugate(&self) -> Self {
        match *self {
            Self::Move { from, to } => Self::Move { from: from.transpose(), to: to.transpose() },
            Self::Insert(block) => Self::Insert(block.transpose()),
            Self::Remove(block) => Self::Remove(block.transpose()),
        }
    }

    /// The cell gaining a block, if any.
    pub fn inserted(&self) -> Option<Block> {
        match *self {
            Self::Move { to, .. } => Some(to),
            Self::Insert(block) => Some(block),
            Self::Remove(_) => None,
        }
    }

    /// The cell losing a block, if any.
    pub fn removed(&self) -> Option<Block> {
        match *self {
            Self::Move { from, .. } => Some(from),
            Self::Remove(block) => Some(block),
            Self::Insert(_) => None,
        }
    }

    /// Whether this is a [`PartitionTransition::Move`].
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }

    /// Whether this is a [`PartitionTransition::Insert`].
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    /// Whether this is a [`PartitionTransition::Remove`].
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove(_))
    }

    /// Inserts, and moves towards a column further right.
    pub fn is_ascending(&self) -> bool {
        match self {
            Self::Move { from, to } => from.column() < to.column(),
            Self::Insert(_) => true,
            Self::Remove(_) => false,
        }
    }

    /// Removals, and moves towards a column further left.
    pub fn is_descending(&self) -> bool {
        match self {
            Self::Move { from, to } => from.column() > to.column(),
            Self::Insert(_) => false,
            Self::Remove(_) => true,
        }
    }

    /// Moves staying within one column.
    pub fn is_identical(&self) -> bool {
        matches!(self, Self::Move { from, to } if from.column() == to.column())
    }
}

impl Display for PartitionTransition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Move { from, to } => write!(f, "({from}->{to})"),
            Self::Insert(block) => write!(f, "(+{block})"),
            Self::Remove(block) => write!(f, "(-{block})"),
        }
    }
}

/// An ordered sequence of [`PartitionTransition`]s, applied first to last.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TransitionChain(Vec<PartitionTransition>);

impl TransitionChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `transition` to the end of the chain.
    pub fn push(&mut self, transition: PartitionTransition) {
        self.0.push(transition);
    }

    /// Number of transitions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the transitions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PartitionTransition> {
        self.0.iter()
    }

    /// Run every transition against `diagram`, in order.
    pub fn apply<D: Diagram + ?Sized>(&self, diagram: &mut D) {
        for transition in &self.0 {
            transition.apply(diagram);
        }
    }

    /// A copy of `diagram` with the whole chain applied.
    pub fn applied<D: Diagram + Clone>(&self, diagram: &D) -> D {
        let mut result = diagram.clone();
        self.apply(&mut result);
        result
    }

    /// The chain undoing this one: reversed, with every element inverted.
    pub fn inverse(&self) -> Self {
        self.0.iter().rev().map(PartitionTransition::inverse).collect()
    }

    /// The chain performing the same edits on the transposed diagram.
    pub fn conjugate(&self) -> Self {
        self.0.iter().map(PartitionTransition::conjugate).collect()
    }
}

impl Index<usize> for TransitionChain {
    type Output = PartitionTransition;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<PartitionTransition>> for TransitionChain {
    fn from(transitions: Vec<PartitionTransition>) -> Self {
        Self(transitions)
    }
}

impl FromIterator<PartitionTransition> for TransitionChain {
    fn from_iter<T: IntoIterator<Item = PartitionTransition>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PartitionTransition> for TransitionChain {
    fn extend<T: IntoIterator<Item = PartitionTransition>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for TransitionChain {
    type Item = PartitionTransition;
    type IntoIter = std::vec::IntoIter<PartitionTransition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TransitionChain {
    type Item = &'a PartitionTransition;
    type IntoIter = std::slice::Iter<'a, PartitionTransition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for TransitionChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] | {}", self.0.iter().join(" => "), self.0.len())
    }
}
