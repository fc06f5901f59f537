use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};

use itertools::Itertools;
use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

use crate::block::{Block, Coord};
use crate::partition::Partition;
use crate::transition::PartitionTransition;

/// Reasons a breadth first search over graphical partitions may fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The start is not weakly decreasing or its sum is stale.
    #[error("`{0}` is not a valid partition")]
    InvalidShape(Partition),
    /// Searches only walk graphical partitions.
    #[error("`{0}` is not graphical")]
    NotGraphical(Partition),
    /// The reachable partitions were exhausted without meeting a maximum graphical one.
    /// This should never happen for graphical input.
    #[error("didn't find a maximum graphical partition above `{0}`")]
    NoMaximumFound(Partition),
    /// The search expanded as many partitions as its visit limit allows.
    #[error("gave up searching above `{start}` after expanding {visited} partitions")]
    Exhausted {
        /// Where the search started.
        start: Partition,
        /// Number of partitions expanded.
        visited: usize,
    },
}

/// Which single-block moves count as one step up the dominance order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Ascent {
    /// Every move of a removable top block onto an insertable column further left which keeps the partition graphical.
    #[default]
    Full,
    /// For each removable column, only the move onto the nearest column which keeps the columns weakly decreasing.
    Basic,
}

impl Ascent {
    /// The graphical partitions one step above `partition`.
    pub fn ascendants(&self, partition: &Partition) -> Vec<Partition> {
        self.ascents(partition).into_iter().map(|(_, child)| child).collect()
    }

    pub(crate) fn ascents(&self, partition: &Partition) -> Vec<(PartitionTransition, Partition)> {
        match self {
            Self::Full => {
                let length = partition.length();
                (0..length.saturating_sub(1))
                    .filter(|to| partition.is_insertable(*to))
                    .flat_map(|to| (to + 1..length)
                        .filter(move |from| partition.is_removable(*from))
                        .map(move |from| (from, to)))
                    .filter_map(|(from, to)| ascent(partition, from, to))
                    .collect_vec()
            }
            Self::Basic => (0..partition.length())
                .rev()
                .filter(|from| partition[from + 1] != partition[*from])
                .filter_map(|from| (0..from)
                    .rev()
                    .find(|to| *to == 0 || partition[to - 1] > partition[from - 1])
                    .map(|to| (from, to)))
                .filter_map(|(from, to)| ascent(partition, from, to))
                .collect_vec(),
        }
    }
}

fn ascent(partition: &Partition, from: Coord, to: Coord) -> Option<(PartitionTransition, Partition)> {
    let transition = PartitionTransition::Move {
        from: Block(from, partition[from] - 1),
        to: Block(to, partition[to]),
    };
    let mut child = partition.clone();
    transition.apply(&mut child);
    child.is_graphical().then_some((transition, child))
}

/// The graphical partitions one [`Ascent::Full`] step above `partition`.
pub fn graphical_ascendants(partition: &Partition) -> Vec<Partition> {
    Ascent::Full.ascendants(partition)
}

/// The graphical partitions one [`Ascent::Basic`] step above `partition`.
pub fn basic_graphical_ascendants(partition: &Partition) -> Vec<Partition> {
    Ascent::Basic.ascendants(partition)
}

/// The part of the ascent order explored by one breadth first search.
struct Exploration {
    graph: DiGraph<Partition, PartitionTransition>,
    root: NodeIndex,
    parents: HashMap<NodeIndex, NodeIndex>,
    maxima: Vec<NodeIndex>,
}

impl Exploration {
    /// The partitions from the root down to `node` along first discoveries.
    fn path_to(&self, mut node: NodeIndex) -> Vec<Partition> {
        let mut path = vec![self.graph[node].clone()];
        while let Some(parent) = self.parents.get(&node) {
            node = *parent;
            path.push(self.graph[node].clone());
        }
        path.reverse();
        path
    }
}

/// Breadth first search over graphical partitions, configured builder style.
///
/// ```
/// # use threshold::{Ascent, Partition, Search};
/// let maxima = Search::new(Ascent::Basic)
///     .with_visit_limit(10_000)
///     .maximum_graphical_partitions(&Partition::from([3, 3, 2, 1, 1]))
///     .unwrap();
/// assert_eq!(maxima.len(), 2);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Search {
    ascent: Ascent,
    visit_limit: Option<usize>,
}

impl Search {
    /// A search stepping by `ascent`, with no visit limit.
    pub fn new(ascent: Ascent) -> Self {
        Self { ascent, visit_limit: None }
    }

    /// Fail with [`SearchFailure::Exhausted`] instead of expanding more than `limit` partitions.
    pub fn with_visit_limit(mut self, limit: usize) -> Self {
        self.visit_limit = Some(limit);
        self
    }

    /// The step relation this search follows.
    pub fn ascent(&self) -> Ascent {
        self.ascent
    }

    /// The visit limit, if any.
    pub fn visit_limit(&self) -> Option<usize> {
        self.visit_limit
    }

    fn check_start(start: &Partition) -> Result<(), SearchFailure> {
        if !start.is_valid() {
            return Err(SearchFailure::InvalidShape(start.clone()));
        }
        if !start.is_graphical() {
            return Err(SearchFailure::NotGraphical(start.clone()));
        }
        Ok(())
    }

    /// Walk upward from `start`. Maximum graphical partitions are recorded and not expanded.
    /// With `first_only` the walk ends at the first maximum it pops.
    fn explore(&self, start: &Partition, first_only: bool) -> Result<Exploration, SearchFailure> {
        Self::check_start(start)?;

        let mut graph = DiGraph::new();
        let root = graph.add_node(start.clone());
        let mut nodes = HashMap::from([(start.clone(), root)]);
        let mut parents = HashMap::new();
        let mut maxima = Vec::new();
        let mut queue = VecDeque::from([root]);
        let mut expanded = 0;

        while let Some(node) = queue.pop_front() {
            if graph[node].is_maximum_graphical() {
                maxima.push(node);
                if first_only {
                    break;
                }
                continue;
            }

            if self.visit_limit.is_some_and(|limit| expanded >= limit) {
                warn!(%start, expanded, "search hit its visit limit");
                return Err(SearchFailure::Exhausted { start: start.clone(), visited: expanded });
            }
            expanded += 1;

            let ascents = self.ascent.ascents(&graph[node]);
            trace!(partition = %graph[node], ascents = ascents.len(), "expanding");
            for (transition, child) in ascents {
                let child = match nodes.entry(child) {
                    Entry::Occupied(known) => *known.get(),
                    Entry::Vacant(unknown) => {
                        let added = graph.add_node(unknown.key().clone());
                        unknown.insert(added);
                        parents.insert(added, node);
                        queue.push_back(added);
                        added
                    }
                };
                graph.update_edge(node, child, transition);
            }
        }

        debug!(%start, expanded, discovered = graph.node_count(), maxima = maxima.len(), "search finished");
        Ok(Exploration { graph, root, parents, maxima })
    }

    /// The partitions along a shortest ascent from `start` to the first maximum graphical partition found, both ends included.
    #[instrument(level = "debug", skip_all, fields(start = %start))]
    pub fn shortest_maximizing_chain(&self, start: &Partition) -> Result<Vec<Partition>, SearchFailure> {
        let exploration = self.explore(start, true)?;
        exploration.maxima.first()
            .map(|maximum| exploration.path_to(*maximum))
            .ok_or_else(|| SearchFailure::NoMaximumFound(start.clone()))
    }

    /// Every maximum graphical partition reachable from `start`.
    #[instrument(level = "debug", skip_all, fields(start = %start))]
    pub fn maximum_graphical_partitions(&self, start: &Partition) -> Result<HashSet<Partition>, SearchFailure> {
        let exploration = self.explore(start, false)?;
        Ok(exploration.maxima.iter().map(|node| exploration.graph[*node].clone()).collect())
    }

    /// Explore everything above `start`, keeping the ascent graph and the distance to each maximum.
    #[instrument(level = "debug", skip_all, fields(start = %start))]
    pub fn distances(&self, start: &Partition) -> Result<PartitionSearch, SearchFailure> {
        let Exploration { graph, root, maxima, .. } = self.explore(start, false)?;
        let depths = dijkstra(&graph, root, None, |_| 1usize);

        let distances = maxima.iter()
            .map(|node| depths.get(node).copied().ok_or_else(|| SearchFailure::NoMaximumFound(start.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let partitions = maxima.iter().map(|node| graph[*node].clone()).collect();

        Ok(PartitionSearch { start: start.clone(), graph, partitions, distances })
    }
}

/// The partitions along a shortest [`Ascent::Full`] path from `start` to a maximum graphical partition.
pub fn find_shortest_maximizing_chain(start: &Partition) -> Result<Vec<Partition>, SearchFailure> {
    Search::new(Ascent::Full).shortest_maximizing_chain(start)
}

/// Every maximum graphical partition reachable from `start` by [`Ascent::Full`] steps.
pub fn find_maximum_graphical_partitions(start: &Partition) -> Result<HashSet<Partition>, SearchFailure> {
    Search::new(Ascent::Full).maximum_graphical_partitions(start)
}

/// The maximum graphical partitions reachable from one start, each with the number of steps needed to first reach it.
///
/// Maxima are listed in the order the search met them.
#[derive(Clone, Debug)]
pub struct PartitionSearch {
    start: Partition,
    graph: DiGraph<Partition, PartitionTransition>,
    partitions: Vec<Partition>,
    distances: Vec<usize>,
}

impl PartitionSearch {
    /// Search above `start` by [`Ascent::Basic`] steps with no visit limit.
    pub fn new(start: &Partition) -> Result<Self, SearchFailure> {
        Search::new(Ascent::Basic).distances(start)
    }

    /// Where the search started.
    pub fn start(&self) -> &Partition {
        &self.start
    }

    /// The maxima found.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Distances from the start, parallel to [`partitions`](Self::partitions).
    pub fn distances(&self) -> &[usize] {
        &self.distances
    }

    /// Distance from the start to `maximum`, if the search found it.
    pub fn distance_to(&self, maximum: &Partition) -> Option<usize> {
        self.partitions.iter()
            .position(|found| found == maximum)
            .map(|index| self.distances[index])
    }

    /// Each maximum paired with its distance.
    pub fn iter(&self) -> impl Iterator<Item = (&Partition, usize)> + '_ {
        self.partitions.iter().zip(self.distances.iter().copied())
    }

    /// Every explored partition, with an edge labelled by its move for each step taken.
    pub fn ascent_graph(&self) -> &DiGraph<Partition, PartitionTransition> {
        &self.graph
    }
}
