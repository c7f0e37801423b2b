use crate::{
    Dimension, Embedding, Graph, InitialLayout, ProjectionPlane, SpringEmbedding, Vector3,
};
use nalgebra::{DMatrix, SymmetricEigen};
use tracing::{debug, warn};

/// Smallest graph whose Laplacian has enough eigenvectors to place the nodes
pub const MIN_NODES: usize = 4;

const EIGEN_EPSILON: f64 = f64::EPSILON;
const EIGEN_MAX_ITERATIONS: usize = 10_000;

/// Place the nodes along the eigenvectors of the graph Laplacian with the
/// smallest non-zero eigenvalues
///
/// Each axis is rescaled to `[0, 1]` on its own, so the aspect ratio of the
/// layout is not kept. In three dimensions the result is drawn through
/// `plane`. Graphs with fewer than [`MIN_NODES`] nodes, or whose
/// decomposition fails, get a spring embedding from a grid instead.
#[derive(Debug, Clone, Default)]
pub struct SpectralEmbedding {
    pub dimension: Dimension,
    pub plane: ProjectionPlane,
}

impl SpectralEmbedding {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    fn fallback(&self, graph: &mut Graph) {
        SpringEmbedding {
            dimension: self.dimension,
            initial: InitialLayout::Grid,
            plane: self.plane,
            ..Default::default()
        }
        .embed(graph);
    }

    /// The `count` eigenvectors following the one of the smallest eigenvalue,
    /// each one rescaled to `[0, 1]`
    fn axes(&self, graph: &Graph, count: usize) -> Option<Vec<Vec<f64>>> {
        let eigen = SymmetricEigen::try_new(laplacian(graph), EIGEN_EPSILON, EIGEN_MAX_ITERATIONS)?;

        let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
        debug!(
            "Laplacian spectrum: {:?}",
            order.iter().map(|&i| eigen.eigenvalues[i]).collect::<Vec<_>>()
        );

        Some(
            order
                .into_iter()
                .skip(1)
                .take(count)
                .map(|column| rescale(eigen.eigenvectors.column(column).iter().copied()))
                .collect(),
        )
    }
}

impl Embedding for SpectralEmbedding {
    fn embed(&self, graph: &mut Graph) {
        if graph.is_empty() {
            return;
        }

        if graph.len() < MIN_NODES {
            debug!("{} nodes are too few for a spectral embedding", graph.len());
            self.fallback(graph);
            return;
        }

        let Some(axes) = self.axes(graph, self.dimension.count()) else {
            warn!("Eigen decomposition of the Laplacian did not converge, using a spring embedding");
            self.fallback(graph);
            return;
        };

        match self.dimension {
            Dimension::Two => {
                for (i, node) in graph.nodes_mut().enumerate() {
                    node.place(axes[0][i], axes[1][i]);
                }
            }
            Dimension::Three => {
                for (i, node) in graph.nodes_mut().enumerate() {
                    node.place_in_space(Vector3::xyz(axes[0][i], axes[1][i], axes[2][i]));
                }
                self.plane.project(graph);
            }
        }
    }
}

/// `D - A` where `A` is the symmetrized 0/1 adjacency matrix and `D` holds the
/// row sums of `A`, a self-loop counting once
fn laplacian(graph: &Graph) -> DMatrix<f64> {
    let size = graph.len();
    let mut adjacency = DMatrix::<f64>::zeros(size, size);
    for (from, to) in graph.edges() {
        adjacency[(from, to)] = 1.0;
        adjacency[(to, from)] = 1.0;
    }

    let mut laplacian = -adjacency.clone();
    for i in 0..size {
        laplacian[(i, i)] += adjacency.row(i).sum();
    }
    laplacian
}

/// Map values linearly onto `[0, 1]`, all at 0.5 if they are equal
fn rescale(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let values: Vec<f64> = values.collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values
        .into_iter()
        .map(|value| if span > 0.0 { (value - min) / span } else { 0.5 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, Vector2};
    use test_log::test;

    fn path(size: usize) -> Graph {
        let mut graph = Graph::new();
        for i in 0..size {
            graph.add_node(Node::new(i.to_string()));
        }
        for i in 1..size {
            graph.add_edge_between(i - 1, i);
        }
        graph
    }

    fn cycle(size: usize) -> Graph {
        let mut graph = path(size);
        graph.add_edge_between(size - 1, 0);
        graph
    }

    fn positions(graph: &Graph) -> Vec<Vector2> {
        graph.nodes().map(|node| node.position).collect()
    }

    fn assert_spans_unit_interval(values: &[f64]) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(min.abs() < 1e-10 && (max - 1.0).abs() < 1e-10, "{values:?}");
    }

    #[test]
    fn test_laplacian() {
        let mut graph = path(3);
        graph.add_edge_between(1, 0);
        graph.add_edge_between(2, 2);

        #[rustfmt::skip]
        let expected = DMatrix::from_row_slice(3, 3, &[
             1.0, -1.0,  0.0,
            -1.0,  2.0, -1.0,
             0.0, -1.0,  1.0,
        ]);
        assert_eq!(laplacian(&graph), expected);
    }

    #[test]
    fn test_rescale() {
        assert_eq!(rescale([2.0, -2.0, 0.0].into_iter()), vec![1.0, 0.0, 0.5]);
        assert_eq!(rescale([3.0, 3.0].into_iter()), vec![0.5, 0.5]);
    }

    #[test]
    fn test_cycle() {
        let mut graph = cycle(4);
        SpectralEmbedding::default().embed(&mut graph);
        let positions = positions(&graph);

        // Opposite nodes of the cycle are symmetric around the center
        for (a, b) in [(0, 2), (1, 3)] {
            let sum = positions[a] + positions[b];
            assert!(sum.distance(&Vector2::xy(1.0, 1.0)) < 1e-10, "{positions:?}");
        }
        for axis in 0..2 {
            let values: Vec<f64> = positions.iter().map(|p| p[axis]).collect();
            assert_spans_unit_interval(&values);
        }
        assert!(graph.nodes().all(|node| node.distance().is_none()));

        // Eigenvalue 2 is double, so which basis of its eigenspace comes back
        // is up to the solver. An axis aligned basis gives the diamond.
        let aligned = positions.iter().all(|p| {
            p.coordinates()
                .iter()
                .all(|c| [0.0, 0.5, 1.0].iter().any(|v| (c - v).abs() < 1e-10))
        });
        if aligned {
            let mut corners: Vec<(f64, f64)> = positions
                .iter()
                .map(|p| ((p.x() * 2.0).round() / 2.0, (p.y() * 2.0).round() / 2.0))
                .collect();
            corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(corners, vec![(0.0, 0.5), (0.5, 0.0), (0.5, 1.0), (1.0, 0.5)]);
        }
    }

    #[test]
    fn test_path_follows_fiedler_vector() {
        let mut graph = path(5);
        SpectralEmbedding::default().embed(&mut graph);
        let mut xs: Vec<f64> = graph.nodes().map(|node| node.x()).collect();

        if xs[0] > xs[4] {
            xs.reverse();
        }
        assert!(xs[0].abs() < 1e-10 && (xs[4] - 1.0).abs() < 1e-10, "{xs:?}");
        assert!(xs.windows(2).all(|pair| pair[0] < pair[1]), "{xs:?}");
        assert!((xs[2] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_cycle_in_space() {
        let mut graph = cycle(4);
        SpectralEmbedding::new(Dimension::Three).embed(&mut graph);

        let points: Vec<Vector3> = graph
            .nodes()
            .map(|node| node.position_3d().unwrap())
            .collect();

        // The last axis alternates around the cycle
        assert!((points[0].z() - points[2].z()).abs() < 1e-10);
        assert!((points[1].z() - points[3].z()).abs() < 1e-10);
        assert!(((points[0].z() - points[1].z()).abs() - 1.0).abs() < 1e-10);

        for node in graph.nodes() {
            assert!((0.0..=1.0).contains(&node.x()) && (0.0..=1.0).contains(&node.y()));
            assert!(node.distance().is_some());
        }
    }

    #[test]
    fn test_small_graphs_use_spring_embedding() {
        let mut spectral = cycle(3);
        SpectralEmbedding::default().embed(&mut spectral);

        let mut spring = cycle(3);
        SpringEmbedding::default().embed(&mut spring);
        assert_eq!(positions(&spectral), positions(&spring));
    }

    #[test]
    fn test_empty_graph() {
        let mut graph = Graph::new();
        SpectralEmbedding::new(Dimension::Three).embed(&mut graph);
        assert!(graph.is_empty());
    }
}
