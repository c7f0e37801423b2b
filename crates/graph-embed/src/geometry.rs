use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Sub};

/// Vector of fixed dimension with f64 coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const D: usize>(pub [f64; D]);

/// Position in the plane
pub type Vector2 = Vector<2>;

/// Position in space
pub type Vector3 = Vector<3>;

impl<const D: usize> Vector<D> {
    /// Create a vector from its coordinates
    pub const fn new(coordinates: [f64; D]) -> Self {
        Self(coordinates)
    }

    /// Create a zero vector
    pub const fn zero() -> Self {
        Self([0.0; D])
    }

    pub fn coordinates(&self) -> &[f64; D] {
        &self.0
    }

    /// Euclidean norm
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0.0, |sum, (a, b)| sum + a * b)
    }

    /// Euclidean distance between two points
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }
}

impl Vector2 {
    pub const fn xy(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }
}

impl Vector3 {
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    /// Cross product, only defined in three dimensions
    pub fn cross(&self, other: &Self) -> Self {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = other.0;
        Self([a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0])
    }
}

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const D: usize> IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl<const D: usize> AddAssign for Vector<D> {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a += b;
        }
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a -= b;
        }
        self
    }
}

impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(mut self, factor: f64) -> Self {
        for a in &mut self.0 {
            *a *= factor;
        }
        self
    }
}

impl<const D: usize> Div<f64> for Vector<D> {
    type Output = Self;

    fn div(mut self, divisor: f64) -> Self {
        for a in &mut self.0 {
            *a /= divisor;
        }
        self
    }
}

/// Axis aligned bounding box of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const D: usize> {
    pub min: Vector<D>,
    pub max: Vector<D>,
}

impl<const D: usize> Bounds<D> {
    /// Bounding box of the given points, `None` if there are none
    pub fn of(points: impl IntoIterator<Item = Vector<D>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            Self {
                min: first,
                max: first,
            },
            |mut bounds, point| {
                for k in 0..D {
                    bounds.min[k] = bounds.min[k].min(point[k]);
                    bounds.max[k] = bounds.max[k].max(point[k]);
                }
                bounds
            },
        ))
    }

    /// Size of the box along each axis
    pub fn extent(&self) -> Vector<D> {
        self.max - self.min
    }

    /// Length of the diagonal of the box
    pub fn diagonal(&self) -> f64 {
        self.extent().length()
    }
}
