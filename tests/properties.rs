//! Property-based tests for partitions, transitions and the maximization chain.
//!
//! Small shapes keep the searches cheap while still covering the awkward corners.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use threshold::graph::Graph;
use threshold::{graphically_maximizing_chain, partition_transition_chain, Block, ColoredPartition, Diagram, Partition, PartitionTransition};

fn partition(max_height: usize, max_length: usize) -> impl Strategy<Value = Partition> {
    prop::collection::vec(1..=max_height, 0..=max_length).prop_map(|mut columns| {
        columns.sort_unstable_by(|a, b| b.cmp(a));
        Partition::new(columns)
    })
}

/// Degree sequences of small random graphs, which are graphical by construction.
fn graphical_partition() -> impl Strategy<Value = Partition> {
    (0usize..6, any::<u64>()).prop_map(|(size, seed)| Partition::from(&Graph::random(size, &mut StdRng::seed_from_u64(seed))))
}

/// Move blocks leftward to reach a partition dominating `partition` with the same sum.
fn climb(partition: &Partition, picks: &[(usize, usize)]) -> Partition {
    let mut climbed = partition.clone();
    for (a, b) in picks {
        let sources = (1..climbed.length()).filter(|column| climbed.is_removable(*column)).collect::<Vec<_>>();
        if sources.is_empty() {
            break;
        }
        let from = sources[a % sources.len()];
        let targets = (0..from).filter(|column| climbed.is_insertable(*column)).collect::<Vec<_>>();
        let to = targets[b % targets.len()];
        climbed.move_unit(from, to);
    }
    climbed
}

fn dominated_pair() -> impl Strategy<Value = (Partition, Partition)> {
    (partition(4, 3), prop::collection::vec((any::<usize>(), any::<usize>()), 0..6))
        .prop_map(|(lower, picks)| {
            let upper = climb(&lower, &picks);
            (lower, upper)
        })
}

fn transition_on(partition: &Partition, kind: u8, a: usize, b: usize) -> Option<PartitionTransition> {
    let length = partition.length();
    match kind % 3 {
        0 if length > 0 => {
            let (from, to) = (a % length, b % (length + 1));
            Some(PartitionTransition::Move { from: Block(from, partition[from] - 1), to: Block(to, partition[to]) })
        }
        1 => {
            let column = a % (length + 1);
            Some(PartitionTransition::Insert(Block(column, partition[column])))
        }
        2 if length > 0 => {
            let column = a % length;
            Some(PartitionTransition::Remove(Block(column, partition[column] - 1)))
        }
        _ => None,
    }
}

// =============================================================================
// Shape
// =============================================================================

proptest! {
    /// Transposing twice gives the partition back.
    #[test]
    fn prop_conjugate_involution(p in partition(7, 8)) {
        prop_assert!(p.conjugate().is_valid());
        prop_assert_eq!(p.conjugate().sum(), p.sum());
        prop_assert_eq!(p.conjugate().conjugate(), p);
    }

    /// The Durfee square, head and tail account for every block.
    #[test]
    fn prop_head_tail_cover(p in partition(7, 8)) {
        let rank = p.rank();
        prop_assert_eq!(p.head().sum() + p.tail().sum() + rank * rank, p.sum() + rank);
    }
}

// =============================================================================
// Dominance
// =============================================================================

proptest! {
    #[test]
    fn prop_dominance_reflexive(p in partition(7, 8)) {
        let same = p.clone();
        prop_assert!(p <= same);
        prop_assert!(p >= same);
    }

    #[test]
    fn prop_dominance_antisymmetric(a in partition(3, 4), b in partition(3, 4)) {
        if a <= b && b <= a {
            prop_assert_eq!(a, b);
        }
    }

    /// Moving blocks leftward climbs, and conjugation reverses the order.
    #[test]
    fn prop_climbing_dominates((lower, upper) in dominated_pair()) {
        prop_assert!(upper.is_valid());
        prop_assert_eq!(upper.sum(), lower.sum());
        prop_assert!(lower <= upper);
        prop_assert!(upper.conjugate() <= lower.conjugate());
    }
}

// =============================================================================
// Transitions
// =============================================================================

proptest! {
    /// Applying a transition and then its inverse changes nothing.
    #[test]
    fn prop_transition_inverse(p in partition(7, 8), kind: u8, a: usize, b: usize) {
        if let Some(transition) = transition_on(&p, kind, a, b) {
            let mut edited = p.clone();
            transition.apply(&mut edited);
            transition.inverse().apply(&mut edited);
            prop_assert_eq!(edited, p);
            prop_assert_eq!(transition.inverse().inverse(), transition);
            prop_assert_eq!(transition.conjugate().conjugate(), transition);
        }
    }

    /// The chain between dominated partitions of equal sum is made of moves and lands on the target.
    #[test]
    fn prop_transition_chain_reaches_target((lower, upper) in dominated_pair()) {
        let chain = partition_transition_chain(&lower, &upper).unwrap();
        prop_assert!(chain.iter().all(PartitionTransition::is_move));
        prop_assert_eq!(chain.applied(&lower), upper.clone());
        prop_assert_eq!(chain.inverse().applied(&upper), lower);
        prop_assert_eq!(chain.inverse().inverse(), chain.clone());
        prop_assert_eq!(chain.conjugate().conjugate(), chain);
    }

    /// Chains only climb.
    #[test]
    fn prop_transition_chain_needs_dominance((lower, upper) in dominated_pair()) {
        if lower != upper {
            prop_assert!(partition_transition_chain(&upper, &lower).is_err());
        }
    }
}

// =============================================================================
// Maximization
// =============================================================================

proptest! {
    /// Degree sequences are graphical.
    #[test]
    fn prop_degrees_are_graphical(size in 0usize..9, seed: u64) {
        let graph = Graph::random(size, &mut StdRng::seed_from_u64(seed));
        prop_assert!(Partition::from(&graph).is_graphical());
    }

    /// Greedy rotation keeps the edge count and ends on a threshold sequence.
    #[test]
    fn prop_greedy_rotation_maximizes(size in 0usize..9, seed: u64) {
        let mut graph = Graph::random(size, &mut StdRng::seed_from_u64(seed));
        let before = Partition::from(&graph);
        graph.greedy_edge_rotation();
        let after = Partition::from(&graph);
        prop_assert_eq!(after.sum(), before.sum());
        prop_assert!(after.is_maximum_graphical());
    }

    /// Maximizing keeps the sum and lands on a maximum graphical partition dominating the input.
    #[test]
    fn prop_maximize_is_maximum(p in graphical_partition()) {
        let mut colored = ColoredPartition::new(p.clone());
        colored.maximize();
        prop_assert!(colored.is_valid());
        let maximized = colored.partition();
        prop_assert_eq!(maximized.sum(), p.sum());
        prop_assert!(maximized.is_maximum_graphical());
        prop_assert!(&p <= maximized);
    }

    /// Whenever a maximizing chain is found it leads to a maximum graphical partition dominating the input.
    #[test]
    fn prop_maximizing_chain_is_correct(p in graphical_partition()) {
        if let Ok(chain) = graphically_maximizing_chain(&p) {
            let lifted: Partition = chain.applied(&p);
            prop_assert!(lifted.is_valid());
            prop_assert!(lifted.is_maximum_graphical());
            prop_assert!(p <= lifted);
            prop_assert!(chain.iter().all(PartitionTransition::is_move));
            prop_assert_eq!(chain.inverse().applied(&lifted), p);
        }
    }
}
