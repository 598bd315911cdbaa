//! Fundamental geometric types for the bridge model.

use nalgebra::Vector3;

/// Position in three dimensional space in model units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Point halfway between `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use bridgeplot::point;
    ///
    /// let mid = point(0.0, 0.0, 0.0).midpoint(point(4.0, 2.0, -2.0));
    /// assert_eq!(mid, point(2.0, 1.0, -1.0));
    /// ```
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        ((self.to_vector() + other.to_vector()) * 0.5).into()
    }

    /// Translate the point along the global Y axis.
    #[must_use]
    pub fn offset_y(self, dy: f64) -> Point {
        (self.to_vector() + Vector3::y() * dy).into()
    }

    /// Coordinates as a tuple, the form the plotting backend consumes.
    #[must_use]
    pub const fn as_tuple(self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use bridgeplot::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Axis-aligned box enclosing a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest coordinate on each axis.
    pub min: Point,
    /// Largest coordinate on each axis.
    pub max: Point,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = Point>>(points: I) -> Option<Bounds> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold(
            (first.to_vector(), first.to_vector()),
            |(min, max), p| {
                let v = p.to_vector();
                (min.inf(&v), max.sup(&v))
            },
        );
        Some(Bounds {
            min: min.into(),
            max: max.into(),
        })
    }

    /// Grow the box by `fraction` of its extent on each side.
    ///
    /// Axes with zero extent are widened by one unit so the range is never empty.
    #[must_use]
    pub fn padded(self, fraction: f64) -> Bounds {
        let min = self.min.to_vector();
        let max = self.max.to_vector();
        let pad = (max - min).map(|extent| if extent > 0.0 { extent * fraction } else { 1.0 });
        Bounds {
            min: (min - pad).into(),
            max: (max + pad).into(),
        }
    }
}
