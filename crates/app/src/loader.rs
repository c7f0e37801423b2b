use anyhow::{bail, Context, Result};
use graph_embed::{Graph, Node};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Read a graph from a file, or from stdin if `path` is `-`
pub fn read_path(path: &Path) -> Result<Graph> {
    if path == Path::new("-") {
        return read_graph(std::io::stdin().lock()).context("Failed to read graph from stdin");
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_graph(file).with_context(|| format!("Failed to read graph from {}", path.display()))
}

/// Read a graph from an edge list
///
/// Each line holds the names of the two ends of a directed edge separated by
/// whitespace. Nodes are created the first time they are named. Blank lines
/// and lines starting with `#` are skipped.
pub fn read_graph(input: impl Read) -> Result<Graph> {
    let mut graph = Graph::new();

    for (number, line) in BufReader::new(input).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", number + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let names: Vec<&str> = line.split_whitespace().collect();
        let &[from, to] = names.as_slice() else {
            bail!(
                "Line {}: expected two node names, found {}",
                number + 1,
                names.len()
            );
        };

        graph.add_node(Node::new(from));
        graph.add_node(Node::new(to));
        graph.add_edge(from, to);
    }

    debug!("Read {} nodes and {} edges", graph.len(), graph.edge_count());
    Ok(graph)
}
