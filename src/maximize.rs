use std::cmp::Ordering;

use itertools::iproduct;
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::block::{Block, Coord};
use crate::colored::{Color, ColoredPartition};
use crate::partition::Partition;
use crate::transition::{PartitionTransition, TransitionChain};

/// Reasons building a [`TransitionChain`] may fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionFailure {
    /// A chain can only climb in dominance order.
    #[error("`{from}` is not dominated by `{to}`")]
    NotDominated {
        /// Where the chain would start.
        from: Partition,
        /// Where the chain would end.
        to: Partition,
    },
    /// The input is not weakly decreasing or its sum is stale.
    #[error("`{0}` is not a valid partition")]
    InvalidShape(Partition),
    /// Maximization needs a graphical input.
    #[error("`{0}` is not graphical")]
    NotGraphical(Partition),
    /// An overfull column had no top block to take from. This should never happen for dominated pairs.
    #[error("no block to take from an overfull column of `{0}`")]
    InvalidState(Partition),
    /// No grey block was available to fill the given cell of the maximum.
    #[error("no grey block can be relocated to {0}")]
    NoRelocatableBlock(Block),
    /// Undoing the relocations on the maximum did not land back on the input.
    #[error("walking the maximum back reached `{reached}` instead of `{expected}`")]
    Diverged {
        /// The partition being maximized.
        expected: Partition,
        /// Where the walk back ended.
        reached: Partition,
    },
}

pub(crate) fn check_graphical(partition: &Partition) -> Result<(), TransitionFailure> {
    if !partition.is_valid() {
        return Err(TransitionFailure::InvalidShape(partition.clone()));
    }
    if !partition.is_graphical() {
        return Err(TransitionFailure::NotGraphical(partition.clone()));
    }
    Ok(())
}

/// Build a chain of transitions turning `from` into `to`.
///
/// Overfull columns are repaired left to right by moving their rightmost equal-height block into the first column still short of its target.
/// When both partitions have the same sum this only emits moves. Any remaining shortfall is closed by inserts, bottom to top.
/// The chain is greedy and not necessarily the shortest one.
///
/// Fails with [`TransitionFailure::NotDominated`] unless `from <= to`.
pub fn partition_transition_chain(from: &Partition, to: &Partition) -> Result<TransitionChain, TransitionFailure> {
    if !matches!(from.partial_cmp(to), Some(Ordering::Less | Ordering::Equal)) {
        return Err(TransitionFailure::NotDominated { from: from.clone(), to: to.clone() });
    }

    let mut current = from.clone();
    let mut chain = TransitionChain::new();
    let width = from.length().max(to.length());
    let mut search_from = 0;

    let mut column = 0;
    while column < width {
        if current[column] <= to[column] {
            column += 1;
            continue;
        }

        let Some(short) = (search_from..width).find(|candidate| current[*candidate] < to[*candidate]) else {
            column += 1;
            continue;
        };

        let source = current.rightmost_by_column(column)
            .ok_or_else(|| TransitionFailure::InvalidState(current.clone()))?;
        let transition = PartitionTransition::Move {
            from: Block(source, current[source] - 1),
            to: Block(short, current[short]),
        };
        transition.apply(&mut current);
        chain.push(transition);

        if current[short] == to[short] {
            search_from = short + 1;
        }
        // column stays put until it is no longer overfull
    }

    for column in search_from..width {
        chain.extend((current[column]..to[column]).map(|row| PartitionTransition::Insert(Block(column, row))));
    }

    Ok(chain)
}

/// The chain turning the conjugate of the head of `partition` into the conjugate of its tail.
///
/// For a graphical partition this describes, in coordinates relative to the edge of the Durfee square, how the tail of the maximum is reshaped into the tail of `partition`.
pub fn head_tail_conjugate_chain(partition: &Partition) -> Result<TransitionChain, TransitionFailure> {
    Ok(partition_transition_chain(&partition.head(), &partition.tail())?.conjugate())
}

fn first_grey(maximum: &ColoredPartition, mut candidates: impl Iterator<Item = Block>) -> Option<Block> {
    candidates.find(|block| maximum.color_at(*block) == Color::Grey)
}

/// Grey blocks in the tail left of `before` and right of the column just past the square, rightmost first.
fn grey_in_tail(maximum: &ColoredPartition, rank: Coord, before: Coord) -> Option<Block> {
    first_grey(maximum, iproduct!((rank + 1..before).rev(), (0..rank).rev()).map(Block::from))
}

/// Grey blocks stacked on the Durfee square, topmost first.
fn grey_above_square(maximum: &ColoredPartition, rank: Coord) -> Option<Block> {
    first_grey(maximum, iproduct!((rank..maximum.partition()[0]).rev(), 0..rank)
        .map(|(row, column)| Block(column, row)))
}

fn grey_between(maximum: &ColoredPartition, rank: Coord, from: Coord, before: Coord) -> Option<Block> {
    first_grey(maximum, iproduct!((from..before).rev(), (0..rank).rev()).map(Block::from))
}

fn relocate(maximum: &mut ColoredPartition, chain: &mut TransitionChain, source: Block, target: Block) {
    let transition = PartitionTransition::Move { from: source, to: target };
    transition.apply(maximum);
    maximum.paint_at(Color::Black, target);
    trace!(%transition, "relocated grey block");
    chain.push(transition);
}

/// Build the chain of moves leading from the maximum graphical partition above `partition` back down to `partition`.
///
/// The maximum is built by [`ColoredPartition::maximize`].
/// Then the steps of [`head_tail_conjugate_chain`] are replayed against it, shifted right by the rank.
/// Each step either finds its target cell already filled, in which case the block is repainted black, or pulls a grey block over to fill it.
/// Every block pulled over becomes one move of the result.
///
/// The relocation rule does not succeed for every graphical partition.
/// When no grey block is available the result is [`TransitionFailure::NoRelocatableBlock`], and when the walk back does not reproduce `partition` it is [`TransitionFailure::Diverged`].
/// A returned chain is always correct: its [`inverse`](TransitionChain::inverse) takes `partition` to a maximum graphical partition dominating it.
#[instrument(level = "debug", skip_all, fields(partition = %partition))]
pub fn inverse_graphically_maximizing_chain(partition: &Partition) -> Result<TransitionChain, TransitionFailure> {
    check_graphical(partition)?;
    let steps = head_tail_conjugate_chain(partition)?;

    let mut maximum = ColoredPartition::new(partition.clone());
    maximum.maximize();
    let rank = maximum.partition().rank();
    debug!(maximum = %maximum.partition(), steps = steps.len(), "built colored maximum");

    let mut chain = TransitionChain::new();
    for step in &steps {
        match *step {
            PartitionTransition::Insert(target) => {
                let target = target.shift_right(rank);
                if maximum.has_block(target) {
                    maximum.paint_at(Color::Black, target);
                    continue;
                }

                let source = grey_in_tail(&maximum, rank, target.column())
                    .or_else(|| grey_above_square(&maximum, rank))
                    .ok_or(TransitionFailure::NoRelocatableBlock(target))?;
                relocate(&mut maximum, &mut chain, source, target);
            }
            PartitionTransition::Move { from, to } => {
                let (from, to) = (from.shift_right(rank), to.shift_right(rank));
                if maximum.has_block(to) {
                    maximum.paint_at(Color::Black, to);
                    maximum.paint_at(Color::Grey, from);
                    continue;
                }

                match grey_between(&maximum, rank, from.column(), to.column()) {
                    Some(source) => relocate(&mut maximum, &mut chain, source, to),
                    None => {
                        let transition = PartitionTransition::Move { from, to };
                        transition.apply(&mut maximum);
                        trace!(%transition, "moved tail block");
                        chain.push(transition);
                    }
                }
            }
            // conjugated head to tail chains never remove
            PartitionTransition::Remove(_) => {}
        }
    }

    let reached = maximum.into_partition();
    if reached != *partition {
        debug!(%reached, "walk back diverged");
        return Err(TransitionFailure::Diverged { expected: partition.clone(), reached });
    }

    Ok(chain)
}

/// The moves taking `partition` up to the maximum graphical partition above it, the inverse of [`inverse_graphically_maximizing_chain`].
pub fn graphically_maximizing_chain(partition: &Partition) -> Result<TransitionChain, TransitionFailure> {
    Ok(inverse_graphically_maximizing_chain(partition)?.inverse())
}
