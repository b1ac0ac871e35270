//! Shared 2-D vector arithmetic.
//!
//! Built on `kurbo::Vec2` / `kurbo::Point`, which already provide addition,
//! subtraction, scalar scaling and the cross product. This module adds the
//! component-wise and angular helpers the tracer and hosts need.
//!
//! Several functions have preconditions they do not check: normalizing a
//! zero vector, intersecting vertical lines, or taking tangents from a
//! point inside the circle all yield NaN or infinity.

use kurbo::{Point, Vec2};

/// Broadcast a scalar to both components.
pub fn splat(s: f64) -> Vec2 {
    Vec2::new(s, s)
}

/// Component-wise and angular operations on `Vec2`.
pub trait VecExt {
    /// Component-wise product.
    fn mul_elem(self, other: Vec2) -> Vec2;
    /// Component-wise quotient.
    fn div_elem(self, other: Vec2) -> Vec2;
    /// Euclidean length.
    fn magnitude(self) -> f64;
    /// Unit vector in the same direction. NaN for the zero vector.
    fn unit(self) -> Vec2;
    /// Unit vector rotated clockwise by `theta` radians.
    fn rotate_cw(self, theta: f64) -> Vec2;
    /// Angle from the positive x axis. Expects a unit vector.
    fn theta(self) -> f64;
    /// Swap x and y.
    fn flip_xy(self) -> Vec2;
    /// Component-wise absolute value.
    fn abs(self) -> Vec2;
}

impl VecExt for Vec2 {
    fn mul_elem(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    fn div_elem(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x / other.x, self.y / other.y)
    }

    fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn unit(self) -> Vec2 {
        self / self.magnitude()
    }

    // The current angle comes from acos of the unit x component, negated
    // below the x axis. Unlike `theta`, a vector along -x keeps +π here.
    fn rotate_cw(self, theta: f64) -> Vec2 {
        let n = self.unit();
        let mut current = n.x.acos();
        if n.y < 0.0 {
            current = -current;
        }
        Vec2::new((current - theta).cos(), (current - theta).sin())
    }

    fn theta(self) -> f64 {
        let mut theta = self.x.acos();
        if self.y < 0.0 {
            theta = -theta;
        } else if self.y == 0.0 && self.x < 0.0 {
            theta = -std::f64::consts::PI;
        }
        theta
    }

    fn flip_xy(self) -> Vec2 {
        Vec2::new(self.y, self.x)
    }

    fn abs(self) -> Vec2 {
        Vec2::new(self.x.abs(), self.y.abs())
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).magnitude()
}

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// Uses Heron's formula for the triangle area: height = 2 * area / base.
/// `a` and `b` must differ.
pub fn point_line_distance(p: Point, a: Point, b: Point) -> f64 {
    let base = distance(a, b);
    let da = distance(a, p);
    let db = distance(b, p);
    let s = (base + da + db) / 2.0;
    // Collinear points can round the product slightly below zero.
    let area = (s * (s - base) * (s - da) * (s - db)).max(0.0).sqrt();
    2.0 * area / base
}

/// Intersection of two lines given as point + direction.
///
/// Slope/intercept form: neither direction may be vertical, and the lines
/// must not be parallel.
pub fn line_intersection(a_pos: Point, a_dir: Vec2, b_pos: Point, b_dir: Vec2) -> Point {
    let k1 = a_dir.y / a_dir.x;
    let k2 = b_dir.y / b_dir.x;
    let b1 = a_pos.y - a_pos.x * k1;
    let b2 = b_pos.y - b_pos.x * k2;
    let x = (b2 - b1) / (k1 - k2);
    Point::new(x, k1 * x + b1)
}

/// The two tangent directions from `point` to the circle at `center`.
///
/// Returns unit vectors `(left, right)` along the tangent lines, oriented
/// away from the circle. `point` must lie outside the circle.
pub fn circle_tangents(center: Point, point: Point, radius: f64) -> (Vec2, Vec2) {
    let to_center = center - point;
    let half_angle = (radius / distance(center, point)).asin();
    let left = (-to_center.rotate_cw(-half_angle)).unit();
    let right = (-to_center.rotate_cw(half_angle)).unit();
    (left, right)
}

/// Pole of the chord `a`-`b` with respect to the circle at `center`.
///
/// The point on the ray from the centre through the chord midpoint at
/// distance `radius² / |midpoint - center|`. Tangents at `a` and `b` meet
/// here when both lie on the circle.
pub fn chord_pole(center: Point, radius: f64, a: Point, b: Point) -> Point {
    let mid = a.midpoint(b);
    let len = radius * radius / distance(mid, center);
    center + (mid - center).unit() * len
}
