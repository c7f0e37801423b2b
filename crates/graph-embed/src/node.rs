use crate::{Vector2, Vector3};
use std::hash::{Hash, Hasher};

/// Display color of a node
///
/// The layout algorithms never look at it, it is only carried along for the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Unmarked,
    Rgb(u8, u8, u8),
}

/// 3D placement of a node and its depth relative to the projection plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spatial {
    /// Unconstrained position in space
    pub position: Vector3,

    /// Signed distance to the projection plane, rescaled to `[0, 1]` relative
    /// to the most distant node once projected
    pub distance: f64,
}

/// How a node was last placed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Only the 2D position is meaningful
    #[default]
    Planar,

    /// The node lives in space and its 2D position is a projection
    Spatial(Spatial),
}

/// A graph node, identified by its name
///
/// Equality and hashing only look at the name, two nodes with the same name
/// are the same node wherever they are placed.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,

    /// Position in the unit square once an embedding ran
    pub position: Vector2,

    pub color: Color,

    pub placement: Placement,
}

impl Node {
    /// Create a node at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self::at(name, Vector2::zero())
    }

    /// Create a node at the given position
    pub fn at(name: impl Into<String>, position: Vector2) -> Self {
        Self {
            name: name.into(),
            position,
            color: Color::default(),
            placement: Placement::Planar,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Vector2::xy(x, y);
    }

    /// Place the node in the plane, dropping any 3D placement
    pub fn place(&mut self, x: f64, y: f64) {
        self.set_position(x, y);
        self.flatten();
    }

    /// Position in space, if the node was placed in 3D
    pub fn position_3d(&self) -> Option<Vector3> {
        match self.placement {
            Placement::Planar => None,
            Placement::Spatial(Spatial { position, .. }) => Some(position),
        }
    }

    /// Depth relative to the projection plane, if the node was placed in 3D
    pub fn distance(&self) -> Option<f64> {
        match self.placement {
            Placement::Planar => None,
            Placement::Spatial(Spatial { distance, .. }) => Some(distance),
        }
    }

    /// Place the node in space; its 2D position is stale until projected
    pub fn place_in_space(&mut self, position: Vector3) {
        self.placement = Placement::Spatial(Spatial {
            position,
            distance: 0.0,
        });
    }

    /// Drop any 3D placement, keeping the current 2D position
    pub fn flatten(&mut self) {
        self.placement = Placement::Planar;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
