#![warn(missing_docs)]

//! # `threshold`
//!
//! Dominance order search and maximization over [graphical](https://en.wikipedia.org/wiki/Graphic_sequence) integer partitions.
//! Begin by building a [`Partition`] from its column heights, from a rectangle, or from the degrees of a [`Graph`](graph::Graph).
//! Then ask whether it is [graphical](Partition::is_graphical) or [maximum graphical](Partition::is_maximum_graphical),
//! lift it to a maximum with [`graphically_maximizing_chain`], or search above it with [`find_shortest_maximizing_chain`],
//! [`find_maximum_graphical_partitions`] and [`PartitionSearch`].
//!
//! # Internals
//! A partition is drawn as a Young diagram of columns, the first column being the tallest.
//! Its rank is the side of the Durfee square, the largest square fitting in the corner.
//! The head is the excess right of that square, taken column by column with `rank - 1` blocks cut off each,
//! and the tail is the excess below the square, read sideways.
//!
//! A partition with an even sum is graphical exactly when its tail dominates its head, which is the Durfee square form of the Erdős–Gallai condition.
//! It is maximum graphical, the degree sequence of a threshold graph, exactly when its head equals its tail.
//!
//! Maximization works on a [`ColoredPartition`]:
//! 1. The columns of the Durfee square are painted black.
//! 2. Grey blocks are stacked on the square until the head holds as many blocks as the tail.
//! 3. The tail is replaced by the conjugate of the grown head and inherits the colors of the mirrored cells.
//!
//! Replaying the [head to tail chain](head_tail_conjugate_chain) against the colored maximum then yields the moves between it and the input partition.
//!
//! The searches walk the covering relation of dominance order restricted to graphical partitions breadth first.
//! Each step moves the top block of one column onto a column further left. Maximum graphical partitions are the sinks.

pub use block::{Block, Coord};
pub use colored::{Color, ColoredPartition};
pub use maximize::{graphically_maximizing_chain, head_tail_conjugate_chain, inverse_graphically_maximizing_chain, partition_transition_chain, TransitionFailure};
pub use partition::{Diagram, Partition};
pub use search::{basic_graphical_ascendants, find_maximum_graphical_partitions, find_shortest_maximizing_chain, graphical_ascendants, Ascent, PartitionSearch, Search, SearchFailure};
pub use transition::{PartitionTransition, TransitionChain};

pub(crate) mod block;
pub(crate) mod colored;
pub mod graph;
pub(crate) mod maximize;
pub(crate) mod partition;
pub(crate) mod search;
pub(crate) mod transition;
#[cfg(feature = "wasm")]
pub mod wasm;
