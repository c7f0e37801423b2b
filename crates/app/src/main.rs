mod loader;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use graph_embed::{
    CircularEmbedding, Dimension, Embedding, Graph, GridEmbedding, InitialLayout,
    LayeredEmbedding, LinearEmbedding, RandomEmbedding, SpectralEmbedding, SpringEmbedding,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Grid,
    Circular,
    Linear,
    Random,
    Spring,
    Spectral,
    Layered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Initial {
    Grid,
    Random,
}

impl From<Initial> for InitialLayout {
    fn from(initial: Initial) -> Self {
        match initial {
            Initial::Grid => InitialLayout::Grid,
            Initial::Random => InitialLayout::Random,
        }
    }
}

/// Compute a layout for a graph read from an edge list and print the position
/// of every node in the unit square
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Edge list with one `from to` pair per line, `-` for stdin
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Algorithm::Spring)]
    algorithm: Algorithm,

    /// Number of dimensions for the random, spring and spectral layouts
    #[arg(short, long, default_value_t = 2)]
    dimension: usize,

    /// Nodes per row of the grid layout
    #[arg(long)]
    columns: Option<usize>,

    /// Run the spring layout for exactly this many iterations from the
    /// initial layout instead of waiting for it to converge
    #[arg(long)]
    iterations: Option<usize>,

    /// Starting point of the spring layout
    #[arg(long, value_enum, default_value_t = Initial::Grid)]
    initial: Initial,

    /// Treat the edges as undirected
    #[arg(long)]
    undirected: bool,
}

fn run(args: &Args, graph: &mut Graph) -> Result<()> {
    let dimension = Dimension::try_from(args.dimension).context("Invalid --dimension")?;

    match args.algorithm {
        Algorithm::Grid => GridEmbedding {
            columns: args.columns,
        }
        .embed(graph),
        Algorithm::Circular => CircularEmbedding.embed(graph),
        Algorithm::Linear => LinearEmbedding.embed(graph),
        Algorithm::Random => RandomEmbedding::new(dimension).embed(graph),
        Algorithm::Spring => {
            let spring = SpringEmbedding {
                dimension,
                initial: args.initial.into(),
                ..Default::default()
            };
            let report = match args.iterations {
                Some(iterations) => {
                    spring.seed(graph);
                    spring.start(graph).iterate(graph, iterations)
                }
                None => spring.run(graph),
            };
            info!(
                "Spring layout ran {} iterations, converged: {}",
                report.iterations, report.converged
            );
        }
        Algorithm::Spectral => SpectralEmbedding::new(dimension).embed(graph),
        Algorithm::Layered => {
            let layered = LayeredEmbedding::default();
            let layers = layered.compute_layers(graph);
            info!(
                "{} layers, {} reversed edges, {} crossings",
                layers.nodes.len(),
                layers.reversed.len(),
                layers.crossings
            );
            layered.apply(&layers, graph);
        }
    }

    Ok(())
}

fn print_positions(graph: &Graph) {
    for node in graph.nodes() {
        match node.distance() {
            Some(distance) => println!("{} {} {} {}", node.name(), node.x(), node.y(), distance),
            None => println!("{} {} {}", node.name(), node.x(), node.y()),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let mut graph = loader::read_path(&args.input)?;
    graph.set_directed(!args.undirected);
    info!(
        "Laying out {} nodes and {} {} edges with {:?}",
        graph.len(),
        graph.edge_count(),
        if graph.is_directed() { "directed" } else { "undirected" },
        args.algorithm
    );

    run(&args, &mut graph)?;
    print_positions(&graph);
    Ok(())
}
