//! Canvas coordinates for ring placement and zoom.
//!
//! The canvas follows SVG conventions: the origin is the top-left corner, X
//! grows to the right and Y grows downward. Angles are radians measured from
//! the positive X axis, so increasing angles sweep clockwise on screen.

/// A position on the canvas.
///
/// # Examples
///
/// ```
/// # use topograph_core::geometry::Point;
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(30.0, 40.0);
///
/// assert_eq!(a.distance(b), 50.0);
/// assert_eq!(a.midpoint(b), Point::new(15.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point `radius` away from `center` in direction `angle`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topograph_core::geometry::Point;
    /// let center = Point::new(100.0, 100.0);
    /// assert_eq!(Point::from_polar(center, 50.0, 0.0), Point::new(150.0, 100.0));
    /// ```
    pub fn from_polar(center: Point, radius: f32, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(center.x + radius * cos, center.y + radius * sin)
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Offset from `other` to `self`.
    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let offset = self.sub_point(other);
        offset.x.hypot(offset.y)
    }

    /// Moves the point so its offset from `origin` is multiplied by `factor`.
    ///
    /// `origin` stays where it is.
    ///
    /// ```
    /// # use topograph_core::geometry::Point;
    /// let origin = Point::new(400.0, 400.0);
    /// assert_eq!(Point::new(550.0, 400.0).scale_about(origin, 2.0), Point::new(700.0, 400.0));
    /// assert_eq!(origin.scale_about(origin, 2.0), origin);
    /// ```
    pub fn scale_about(self, origin: Point, factor: f32) -> Self {
        let offset = self.sub_point(origin);
        Self::new(origin.x + offset.x * factor, origin.y + offset.y * factor)
    }
}

/// Canvas dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Middle of a canvas of this size whose top-left corner is the origin.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// A polar point always lies at `radius` from its center.
    fn check_polar_distance(center: Point, radius: f32, angle: f32) -> Result<(), TestCaseError> {
        let p = Point::from_polar(center, radius, angle);
        prop_assert!(approx_eq!(f32, p.distance(center), radius, epsilon = 0.01));
        Ok(())
    }

    /// Scaling about an origin scales the distance to that origin.
    fn check_scale_about_distance(
        p: Point,
        origin: Point,
        factor: f32,
    ) -> Result<(), TestCaseError> {
        let scaled = p.scale_about(origin, factor);
        prop_assert!(approx_eq!(
            f32,
            scaled.distance(origin),
            p.distance(origin) * factor,
            epsilon = 0.01
        ));
        Ok(())
    }

    proptest! {
        #[test]
        fn polar_distance(center in point_strategy(), radius in 0.0f32..500.0, angle in 0.0f32..std::f32::consts::TAU) {
            check_polar_distance(center, radius, angle)?;
        }

        #[test]
        fn scale_about_distance(p in point_strategy(), origin in point_strategy(), factor in 0.5f32..2.0) {
            check_scale_about_distance(p, origin, factor)?;
        }
    }
}
