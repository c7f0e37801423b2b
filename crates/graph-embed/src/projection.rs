use crate::{Bounds, Graph, Placement, Vector2, Vector3};
use tracing::trace;

/// Angle in radians of one incremental rotation of the viewing plane
pub const ROTATION_STEP: f64 = 0.05;

/// One of the two vectors spanning the viewing plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneAxis {
    X,
    Y,
}

/// Viewing plane through the origin used to draw 3D placements
///
/// The plane is spanned by two orthonormal vectors `x` and `y`. Projecting a
/// point gives its coordinates along both vectors, and its depth along the
/// normal `x × y`. Each 3D view owns its plane so several views can be rotated
/// independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPlane {
    x: Vector3,
    y: Vector3,
}

impl Default for ProjectionPlane {
    fn default() -> Self {
        Self {
            x: Vector3::xyz(0.0, 1.0, 0.0),
            y: Vector3::xyz(0.0, 0.0, 1.0),
        }
    }
}

impl ProjectionPlane {
    /// Create a plane from two orthonormal vectors
    pub fn new(x: Vector3, y: Vector3) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> Vector3 {
        self.x
    }

    pub fn y(&self) -> Vector3 {
        self.y
    }

    pub fn normal(&self) -> Vector3 {
        self.x.cross(&self.y)
    }

    /// Coordinates of a point in the plane and its signed distance to it
    pub fn project_point(&self, point: &Vector3) -> (Vector2, f64) {
        (
            Vector2::xy(self.x.dot(point), self.y.dot(point)),
            -self.normal().dot(point),
        )
    }

    /// Rotate one of the plane vectors around the other one
    ///
    /// Rotating [`PlaneAxis::X`] turns the view left or right, rotating
    /// [`PlaneAxis::Y`] turns it up or down. The 3D positions of the nodes are
    /// left alone, [`ProjectionPlane::project`] has to run again to see the
    /// effect.
    pub fn rotate(&mut self, axis: PlaneAxis, angle: f64) {
        match axis {
            PlaneAxis::X => self.x = rotate_around(self.x, self.y, angle),
            PlaneAxis::Y => self.y = rotate_around(self.y, self.x, angle),
        }
        trace!("Rotated viewing plane to {:?} {:?}", self.x, self.y);
    }

    /// Rotate the plane and project the graph through it again
    pub fn rotate_view(&mut self, graph: &mut Graph, axis: PlaneAxis, angle: f64) {
        self.rotate(axis, angle);
        self.project(graph);
    }

    /// Project every node placed in space onto the plane
    ///
    /// The 2D positions are then fitted to the unit square. Distances are
    /// rescaled so the node furthest along the normal gets 1, relative to the
    /// diagonal of the 3D bounding box; they are all 0 when that box is a
    /// single point.
    pub fn project(&self, graph: &mut Graph) {
        let mut max_distance = f64::NEG_INFINITY;
        for node in graph.nodes_mut() {
            let Placement::Spatial(spatial) = &mut node.placement else {
                continue;
            };
            let (position, distance) = self.project_point(&spatial.position);
            node.position = position;
            spatial.distance = distance;
            max_distance = max_distance.max(distance);
        }

        let reference = Bounds::of(graph.nodes().filter_map(|node| node.position_3d()))
            .map_or(0.0, |bounds| bounds.diagonal());

        for node in graph.nodes_mut() {
            if let Placement::Spatial(spatial) = &mut node.placement {
                spatial.distance = if reference != 0.0 {
                    1.0 - (max_distance - spatial.distance) / reference
                } else {
                    0.0
                };
            }
        }

        graph.fit_to_unit_square();
    }
}

/// Rodrigues rotation of `vector` by `angle` around the unit vector `axis`
fn rotate_around(vector: Vector3, axis: Vector3, angle: f64) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    vector * cos + axis.cross(&vector) * sin + axis * (axis.dot(&vector) * (1.0 - cos))
}
