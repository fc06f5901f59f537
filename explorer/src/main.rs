use std::io;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use threshold::graph::Graph;
use threshold::{graphically_maximizing_chain, Ascent, ColoredPartition, Partition, Search};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "Explore graphical partitions and the dominance order above them", long_about = None)]
struct Opt {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a random graph and rotate its edges until its degree sequence is a threshold sequence
    Graph {
        /// Number of vertices
        #[arg(long, default_value_t = 8)]
        size: usize,
        /// Seed for the random graph
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Maximize a partition and search the graphical partitions above it
    Partition {
        /// Column heights, tallest first. A random partition is drawn when omitted
        columns: Vec<usize>,
        /// Sum of the random partition
        #[arg(long, default_value_t = 10)]
        size: usize,
        /// Seed for the random partition
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Give up after expanding this many partitions
        #[arg(long)]
        visit_limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    match Opt::parse().command {
        Command::Graph { size, seed } => explore_graph(size, seed),
        Command::Partition { columns, size, seed, visit_limit } => {
            let partition = if columns.is_empty() {
                Partition::random(size, &mut StdRng::seed_from_u64(seed))
            } else {
                Partition::new(columns)
            };
            explore_partition(&partition, visit_limit)
        }
    }
}

fn explore_graph(size: usize, seed: u64) -> Result<()> {
    let mut graph = Graph::random(size, &mut StdRng::seed_from_u64(seed));
    println!("{graph}");
    println!("degrees: {}", Partition::from(&graph));

    let rotations = graph.greedy_edge_rotation();
    info!(rotations, "reached a limit graph");
    println!("{graph}");

    let degrees = Partition::from(&graph);
    println!("degrees: {degrees}");
    if !degrees.is_maximum_graphical() {
        bail!("limit graph has degrees {degrees}, which is not maximum graphical");
    }
    Ok(())
}

fn explore_partition(partition: &Partition, visit_limit: Option<usize>) -> Result<()> {
    println!("partition: {partition}");
    if !partition.is_valid() {
        bail!("{partition} is not weakly decreasing");
    }
    println!("rank {}, head {}, tail {}", partition.rank(), partition.head(), partition.tail());
    if !partition.is_graphical() {
        bail!("{partition} is not graphical");
    }

    let mut colored = ColoredPartition::new(partition.clone());
    colored.maximize();
    println!("{colored}");

    match graphically_maximizing_chain(partition) {
        Ok(chain) => println!("maximizing chain: {chain}"),
        Err(failure) => warn!(%failure, "no maximizing chain"),
    }

    let mut search = Search::new(Ascent::Full);
    if let Some(limit) = visit_limit {
        search = search.with_visit_limit(limit);
    }
    let shortest = search.shortest_maximizing_chain(partition)?;
    println!("shortest ascent, {} steps:", shortest.len() - 1);
    for step in &shortest {
        println!("  {step}");
    }

    let mut search = Search::new(Ascent::Basic);
    if let Some(limit) = visit_limit {
        search = search.with_visit_limit(limit);
    }
    let maxima = search.distances(partition)?;
    info!(explored = maxima.ascent_graph().node_count(), "searched above {partition}");
    for (maximum, distance) in maxima.iter() {
        println!("  {maximum} @ {distance}");
    }
    Ok(())
}
