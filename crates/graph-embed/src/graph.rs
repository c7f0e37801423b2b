use crate::{Bounds, Node, Vector2};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Graph whose nodes get placed by the embeddings
///
/// Nodes are kept in insertion order and are unique by name. Edges are pairs
/// of node indices, also kept in insertion order and never duplicated. The
/// `directed` flag only matters to whoever draws the graph: the embeddings
/// treat every edge as undirected except the layered one.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: DiGraph<Node, ()>,
    index: HashMap<String, NodeIndex>,
    directed: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            inner: DiGraph::new(),
            index: HashMap::new(),
            directed: true,
        }
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same name exists, returns its index
    pub fn add_node(&mut self, node: Node) -> usize {
        if let Some(&index) = self.index.get(node.name()) {
            return index.index();
        }

        let name = node.name().to_owned();
        let index = self.inner.add_node(node);
        self.index.insert(name, index);
        index.index()
    }

    /// Add an edge between two named nodes
    ///
    /// The edge is dropped if either node is unknown or if the exact same
    /// edge already exists. Returns whether the edge was added.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.add_edge_between(from, to),
            _ => false,
        }
    }

    /// Add an edge between two node indices, see [`Graph::add_edge`]
    pub fn add_edge_between(&mut self, from: usize, to: usize) -> bool {
        if from >= self.len() || to >= self.len() {
            return false;
        }

        let (from, to) = (NodeIndex::new(from), NodeIndex::new(to));
        if self.inner.find_edge(from, to).is_some() {
            return false;
        }

        self.inner.add_edge(from, to, ());
        true
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|index| index.index())
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.inner.node_weight(NodeIndex::new(index))
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.inner.node_weight_mut(NodeIndex::new(index))
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.node_weights()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.inner.node_weights_mut()
    }

    /// Edges as `(from, to)` index pairs, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.inner
            .raw_edges()
            .iter()
            .map(|edge| (edge.source().index(), edge.target().index()))
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Indices of the nodes reached by an edge leaving `index`, in edge order
    pub fn out_neighbors(&self, index: usize) -> Vec<usize> {
        self.edges()
            .filter(|&(from, _)| from == index)
            .map(|(_, to)| to)
            .collect()
    }

    /// Indices of the nodes with an edge reaching `index`, in edge order
    pub fn in_neighbors(&self, index: usize) -> Vec<usize> {
        self.edges()
            .filter(|&(_, to)| to == index)
            .map(|(from, _)| from)
            .collect()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn len(&self) -> usize {
        self.inner.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the node closest to the given point, first one wins ties
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<usize> {
        let point = Vector2::xy(x, y);
        self.nodes()
            .map(|node| node.position.distance(&point))
            .enumerate()
            .fold(None, |nearest: Option<(usize, f64)>, (index, distance)| {
                match nearest {
                    Some((_, best)) if best <= distance => nearest,
                    _ => Some((index, distance)),
                }
            })
            .map(|(index, _)| index)
    }

    /// Rescale the 2D positions so the longer side of their bounding box
    /// spans exactly `[0, 1]`
    ///
    /// Both axes use the same factor so the aspect ratio is kept, and the
    /// minimum of each axis lands on 0. If all nodes share one point they are
    /// moved to the center of the unit square.
    pub fn fit_to_unit_square(&mut self) {
        let Some(bounds) = Bounds::of(self.nodes().map(|node| node.position)) else {
            return;
        };

        let extent = bounds.extent();
        let span = extent.x().max(extent.y());

        for node in self.nodes_mut() {
            node.position = if span > 0.0 {
                (node.position - bounds.min) / span
            } else {
                Vector2::xy(0.5, 0.5)
            };
        }
    }
}

/// Build a graph from `(from, to)` name pairs, creating nodes as they appear
impl<'a> FromIterator<(&'a str, &'a str)> for Graph {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut graph = Graph::new();
        for (from, to) in iter {
            graph.add_node(Node::new(from));
            graph.add_node(Node::new(to));
            graph.add_edge(from, to);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_add_existing_node() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_node(Node::new("n1")), 0);
        assert_eq!(graph.add_node(Node::at("n1", Vector2::xy(0.5, 0.5))), 0);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.node(0).unwrap().position, Vector2::zero());
    }

    #[test]
    fn test_add_existing_edge() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("n1"));
        graph.add_node(Node::new("n2"));
        assert!(graph.add_edge("n1", "n2"));
        assert!(!graph.add_edge("n1", "n2"));
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);

        // The reverse edge is a different edge
        assert!(graph.add_edge("n2", "n1"));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_add_edge_to_unknown_node() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("n1"));
        assert!(!graph.add_edge("n1", "n2"));
        assert!(!graph.add_edge_between(0, 3));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_neighbors() {
        let graph: Graph = [("a", "b"), ("a", "c"), ("c", "b"), ("b", "b")]
            .into_iter()
            .collect();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.out_neighbors(0), vec![1, 2]);
        assert_eq!(graph.in_neighbors(0), Vec::<usize>::new());
        assert_eq!(graph.in_neighbors(1), vec![0, 2, 1]);
        assert_eq!(graph.out_neighbors(1), vec![1]);
        assert!(graph.is_directed());
    }

    #[test]
    fn test_nearest_node() {
        let mut graph = Graph::new();
        assert_eq!(graph.nearest_node(0.0, 0.0), None);

        graph.add_node(Node::new("n1"));
        graph.add_node(Node::at("n2", Vector2::xy(0.5, 0.5)));
        assert_eq!(graph.nearest_node(0.1, 0.1), Some(0));
        assert_eq!(graph.nearest_node(0.4, 0.3), Some(1));
        // Equidistant, the first node wins
        assert_eq!(graph.nearest_node(0.25, 0.25), Some(0));
    }

    #[test]
    fn test_fit_to_unit_square() {
        let mut graph = Graph::new();
        graph.fit_to_unit_square();

        graph.add_node(Node::at("a", Vector2::xy(-1.0, 2.0)));
        graph.add_node(Node::at("b", Vector2::xy(3.0, 2.0)));
        graph.add_node(Node::at("c", Vector2::xy(1.0, 4.0)));
        graph.fit_to_unit_square();

        let positions: Vec<_> = graph.nodes().map(|node| node.position).collect();
        assert_eq!(
            positions,
            vec![
                Vector2::xy(0.0, 0.0),
                Vector2::xy(1.0, 0.0),
                Vector2::xy(0.5, 0.5)
            ]
        );
    }

    #[test]
    fn test_fit_single_point() {
        let mut graph = Graph::new();
        graph.add_node(Node::at("a", Vector2::xy(3.0, 3.0)));
        graph.fit_to_unit_square();
        assert_eq!(graph.node(0).unwrap().position, Vector2::xy(0.5, 0.5));
    }
}
