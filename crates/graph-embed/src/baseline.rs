//! Trivial placements, used on their own or to seed the spring embedding

use crate::{Dimension, Embedding, Graph, ProjectionPlane, Vector3};
use rand::Rng;
use std::f64::consts::PI;

/// Place the nodes row by row on a regular grid
#[derive(Debug, Clone, Copy, Default)]
pub struct GridEmbedding {
    /// Nodes per row, `⌈√n⌉` when unset so the grid looks as square as possible
    pub columns: Option<usize>,
}

impl GridEmbedding {
    pub fn with_columns(columns: usize) -> Self {
        Self {
            columns: Some(columns),
        }
    }
}

impl Embedding for GridEmbedding {
    fn embed(&self, graph: &mut Graph) {
        let size = graph.len();
        if size == 0 {
            return;
        }

        if size == 1 {
            graph.nodes_mut().for_each(|node| node.place(0.5, 0.5));
            return;
        }

        let columns = self
            .columns
            .unwrap_or_else(|| (size as f64).sqrt().ceil() as usize)
            .max(1);

        if columns == 1 {
            let dy = 1.0 / (size - 1) as f64;
            for (row, node) in graph.nodes_mut().enumerate() {
                node.place(0.5, row as f64 * dy);
            }
            return;
        }

        if columns >= size {
            LinearEmbedding.embed(graph);
            return;
        }

        let rows = size.div_ceil(columns);
        // Same spacing on both axes to keep the cells square
        let spacing = (1.0 / (columns - 1) as f64).min(1.0 / (rows - 1) as f64);

        for (i, node) in graph.nodes_mut().enumerate() {
            let (row, column) = (i / columns, i % columns);
            node.place(column as f64 * spacing, row as f64 * spacing);
        }
    }
}

/// Place the nodes evenly on the circle inscribed in the unit square
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularEmbedding;

impl Embedding for CircularEmbedding {
    fn embed(&self, graph: &mut Graph) {
        if graph.is_empty() {
            return;
        }

        let angle = 2.0 * PI / graph.len() as f64;
        for (i, node) in graph.nodes_mut().enumerate() {
            let theta = i as f64 * angle;
            node.place(0.5 + 0.5 * theta.cos(), 0.5 + 0.5 * theta.sin());
        }
    }
}

/// Place the nodes evenly on a horizontal line through the middle of the unit
/// square
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEmbedding;

impl Embedding for LinearEmbedding {
    fn embed(&self, graph: &mut Graph) {
        let last = match graph.len() {
            0 => return,
            1 => {
                graph.nodes_mut().for_each(|node| node.place(0.5, 0.5));
                return;
            }
            size => (size - 1) as f64,
        };
        for (i, node) in graph.nodes_mut().enumerate() {
            node.place(i as f64 / last, 0.5);
        }
    }
}

/// Place the nodes uniformly at random in the unit square, or in the unit
/// cube projected through the default plane
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEmbedding {
    pub dimension: Dimension,
}

impl RandomEmbedding {
    pub fn new(dimension: Dimension) -> Self {
        Self { dimension }
    }

    /// Same as [`Embedding::embed`] with a caller provided generator
    pub fn embed_with_rng<R: Rng + ?Sized>(&self, graph: &mut Graph, rng: &mut R) {
        match self.dimension {
            Dimension::Two => {
                for node in graph.nodes_mut() {
                    node.place(rng.gen(), rng.gen());
                }
            }
            Dimension::Three => {
                for node in graph.nodes_mut() {
                    node.place_in_space(Vector3::xyz(rng.gen(), rng.gen(), rng.gen()));
                }
                ProjectionPlane::default().project(graph);
            }
        }
    }
}

impl Embedding for RandomEmbedding {
    fn embed(&self, graph: &mut Graph) {
        self.embed_with_rng(graph, &mut rand::thread_rng());
    }
}
