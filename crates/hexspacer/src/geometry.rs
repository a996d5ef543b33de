//! Core geometry types for hexspacer.
//!
//! Everything the boundary synthesizer computes is built from [`Vector`]:
//! node positions, hole vertices, fillet centres and line endpoints.
//! Coordinates are y-up and angles are measured counter-clockwise from +x,
//! the convention the drawing sinks expect.
//!
//! ## Rust Lesson #3: Operator Overloading
//!
//! `impl Add for Vector` lets us write `a + b` instead of `a.add(b)`.
//! The traits live in `std::ops`; the compiler desugars the operator into
//! a method call, so there is no runtime cost.

use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a zero-length vector is asked for its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot normalize a zero-length vector")]
pub struct DegenerateVector;

/// A 2D vector (or point) with x,y coordinates.
///
/// Equality and hashing use exact coordinate matches, so two vectors only
/// collide when every bit of both coordinates agrees (with `-0.0 == 0.0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: Vector,
    pub max: Vector,
}

// ============================================================================
// IMPLEMENTATIONS (methods)
// ============================================================================

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `radians` (counter-clockwise from +x).
    #[inline]
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(&self, other: Vector) -> f64 {
        (other - *self).length()
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Same direction, unit length.
    ///
    /// Fails on a zero-length vector instead of producing NaN coordinates
    /// that would silently poison every shape built from them.
    pub fn normalize(self) -> Result<Self, DegenerateVector> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(DegenerateVector);
        }
        Ok(self.scale(1.0 / length))
    }

    /// Polar angle in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        normalize_angle(self.y.atan2(self.x))
    }

    #[inline]
    pub fn midpoint(self, other: Vector) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// z component of the 3D cross product.
    ///
    /// Positive when `other` lies counter-clockwise of `self`.
    #[inline]
    pub fn cross(&self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Exact-coordinate ordering, used to make tie-breaks total.
    pub fn total_cmp(&self, other: &Vector) -> std::cmp::Ordering {
        self.x.total_cmp(&other.x).then(self.y.total_cmp(&other.y))
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

// `f64` is not `Eq`, so we promise it ourselves. Shapes never carry NaN
// coordinates because `normalize` refuses to produce them.
impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Adding 0.0 folds -0.0 into 0.0 so equal vectors hash equally.
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

impl BoundingBox {
    pub fn from_point(point: Vector) -> Self {
        Self { min: point, max: point }
    }

    /// Bounding box of a point set, `None` when empty.
    pub fn from_points<I: IntoIterator<Item = Vector>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |bbox, p| bbox.including(p)))
    }

    pub fn including(self, point: Vector) -> Self {
        Self {
            min: Vector::new(self.min.x.min(point.x), self.min.y.min(point.y)),
            max: Vector::new(self.max.x.max(point.x), self.max.y.max(point.y)),
        }
    }

    pub fn merge(self, other: BoundingBox) -> Self {
        self.including(other.min).including(other.max)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn translate(self, offset: Vector) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Merge an optional running box with a new one.
pub fn merge_bounds(running: Option<BoundingBox>, next: Option<BoundingBox>) -> Option<BoundingBox> {
    match (running, next) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (a, b) => a.or(b),
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Arithmetic mean of a point list, `None` when empty.
pub fn centroid(points: &[Vector]) -> Option<Vector> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector::ZERO, |acc, p| acc + *p);
    Some(sum.scale(1.0 / points.len() as f64))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::collections::HashSet;
    use std::f64::consts::PI;

    #[test]
    fn vector_length_and_distance() {
        let v = Vector::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vector::ZERO.distance(v), 5.0);
    }

    #[test]
    fn normalize_zero_fails() {
        assert_eq!(Vector::ZERO.normalize(), Err(DegenerateVector));
        let unit = Vector::new(0.0, -7.0).normalize().unwrap();
        assert_eq!(unit, Vector::new(0.0, -1.0));
    }

    #[test]
    fn angle_covers_all_quadrants() {
        assert_abs_diff_eq!(Vector::new(1.0, 0.0).angle(), 0.0);
        assert_abs_diff_eq!(Vector::new(0.0, 1.0).angle(), PI / 2.0);
        assert_abs_diff_eq!(Vector::new(-1.0, 0.0).angle(), PI);
        assert_abs_diff_eq!(Vector::new(0.0, -1.0).angle(), 3.0 * PI / 2.0);
        assert_abs_diff_eq!(Vector::new(1.0, -1e-300).angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_angle_wraps() {
        assert_abs_diff_eq!(normalize_angle(-PI / 2.0), 3.0 * PI / 2.0);
        assert_abs_diff_eq!(normalize_angle(5.0 * PI), PI, epsilon = 1e-12);
        let tiny = normalize_angle(-1e-17);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn centroid_of_triangle() {
        let c = centroid(&[
            Vector::new(0.0, 0.0),
            Vector::new(3.0, 0.0),
            Vector::new(0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(c, Vector::new(1.0, 1.0));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn negative_zero_hashes_like_zero() {
        let mut set = HashSet::new();
        set.insert(Vector::new(0.0, 1.0));
        assert!(set.contains(&Vector::new(-0.0, 1.0)));
    }

    #[test]
    fn bounding_box_merge() {
        let a = BoundingBox::from_points([Vector::new(0.0, 0.0), Vector::new(2.0, 1.0)]).unwrap();
        let b = BoundingBox::from_point(Vector::new(-1.0, 5.0));
        let merged = a.merge(b);
        assert_eq!(merged.min, Vector::new(-1.0, 0.0));
        assert_eq!(merged.max, Vector::new(2.0, 5.0));
        assert_eq!(merged.height(), 5.0);
        assert_eq!(merged.width(), 3.0);
        assert_eq!(merge_bounds(None, Some(b)), Some(b));
        assert_eq!(BoundingBox::from_points(Vec::new()), None);
    }
}
