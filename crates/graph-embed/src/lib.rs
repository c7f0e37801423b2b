//! Graph embeddings in the unit square
//!
//! This crate places the nodes of a [`Graph`] so that it can be drawn. Every
//! algorithm implements [`Embedding`] and writes normalized positions in
//! `[0, 1]²` into the nodes, leaving the topology untouched. Scaling to pixels
//! and drawing is left to the caller.
//!
//! # Embeddings
//!
//! - [`GridEmbedding`], [`CircularEmbedding`], [`LinearEmbedding`] and
//!   [`RandomEmbedding`]: trivial placements, also used as starting points
//! - [`SpringEmbedding`]: force directed layout with adaptive step length, in
//!   two or three dimensions
//! - [`SpectralEmbedding`]: placement along the eigenvectors of the graph
//!   Laplacian
//! - [`LayeredEmbedding`]: hierarchical layout with edges pointing downwards
//!
//! Three dimensional layouts keep their 3D positions in the nodes and are
//! drawn through a [`ProjectionPlane`] that can be rotated.
//!
//! # Example
//!
//! ```
//! use graph_embed::{Embedding, Graph, LayeredEmbedding, SpringEmbedding};
//!
//! let mut graph: Graph = [("a", "b"), ("b", "c"), ("c", "a")].into_iter().collect();
//!
//! // Run a layout through the common trait
//! LayeredEmbedding::default().embed(&mut graph);
//! assert_eq!(graph.node(1).map(|node| node.y()), Some(0.0));
//!
//! // Or drive the spring embedding directly to get a convergence report
//! let report = SpringEmbedding::default().run(&mut graph);
//! assert!(report.iterations <= 1000);
//! for node in graph.nodes() {
//!     assert!((0.0..=1.0).contains(&node.x()) && (0.0..=1.0).contains(&node.y()));
//! }
//! ```

mod baseline;
mod engine;
mod error;
mod geometry;
mod graph;
mod node;
mod projection;
mod spectral;
mod spring;

pub mod layered;

pub use baseline::{CircularEmbedding, GridEmbedding, LinearEmbedding, RandomEmbedding};
pub use engine::{Dimension, Embedding};
pub use error::{Error, Result};
pub use geometry::{Bounds, Vector, Vector2, Vector3};
pub use graph::Graph;
pub use layered::{LayeredEmbedding, Layers};
pub use node::{Color, Node, Placement, Spatial};
pub use projection::{PlaneAxis, ProjectionPlane, ROTATION_STEP};
pub use spectral::{SpectralEmbedding, MIN_NODES};
pub use spring::{Convergence, InitialLayout, SpringEmbedding, SpringSimulation};
