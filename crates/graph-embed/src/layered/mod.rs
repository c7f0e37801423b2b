mod acyclic;
mod crossings;
mod layers;
mod positions;

use crate::{Embedding, Graph};
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use acyclic::feedback_edges;
use crossings::{count_crossings, reduce_crossings};
use layers::assign_layers;
use positions::place_layers;

/// Configuration for the layered (hierarchical) embedding
///
/// Edges point downwards: cycles are broken by reversing edges, nodes are
/// assigned to layers from the sources down, and each layer is reordered to
/// reduce crossings with the one above it.
#[derive(Debug, Clone)]
pub struct LayeredEmbedding {
    /// Reorder the nodes within each layer to reduce edge crossings
    pub reduce_crossings: bool,
}

impl Default for LayeredEmbedding {
    fn default() -> Self {
        Self {
            reduce_crossings: true,
        }
    }
}

/// Layer structure of a graph, independent of any placement
#[derive(Debug, Clone)]
pub struct Layers {
    /// Acyclic working copy the layers were computed from
    pub(crate) graph: DiGraphMap<usize, ()>,

    /// Node indices of each layer, top to bottom and left to right
    pub nodes: Vec<Vec<usize>>,

    /// Edges of the graph that point upwards once laid out
    pub reversed: Vec<(usize, usize)>,

    /// Number of edge crossings between adjacent layers
    pub crossings: usize,
}

impl Layers {
    /// Layer of the given node, if it is part of the layout
    pub fn layer_of(&self, index: usize) -> Option<usize> {
        self.nodes.iter().position(|layer| layer.contains(&index))
    }

    /// Edges actually drawn, after reversal and without self-loops
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.all_edges().map(|(from, to, _)| (from, to))
    }
}

impl LayeredEmbedding {
    /// Compute the layers of a graph
    ///
    /// The graph itself is left untouched, cycle breaking only affects the
    /// working copy.
    pub fn compute_layers(&self, graph: &Graph) -> Layers {
        let edges: Vec<(usize, usize)> = graph.edges().filter(|(from, to)| from != to).collect();
        let reversed = feedback_edges(graph.len(), &edges);

        let mut working = DiGraphMap::new();
        for node in 0..graph.len() {
            working.add_node(node);
        }
        for &(from, to) in &edges {
            if reversed.contains(&(from, to)) {
                working.add_edge(to, from, ());
            } else {
                working.add_edge(from, to, ());
            }
        }

        let mut nodes = assign_layers(&working);
        if self.reduce_crossings {
            reduce_crossings(&working, &mut nodes);
        }
        let crossings = count_crossings(&working, &nodes);

        debug!(
            "{} layers, {} reversed edges, {crossings} crossings",
            nodes.len(),
            reversed.len()
        );

        Layers {
            graph: working,
            nodes,
            reversed,
            crossings,
        }
    }

    /// Place the nodes of a graph according to precomputed layers
    pub fn apply(&self, layers: &Layers, graph: &mut Graph) {
        place_layers(&layers.nodes, graph);
    }
}

impl Embedding for LayeredEmbedding {
    fn embed(&self, graph: &mut Graph) {
        let layers = self.compute_layers(graph);
        self.apply(&layers, graph);
    }
}
