use crate::error::{Result, ViewportError};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// 2D affine map in the canvas/DOMMatrix layout:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
///
/// Values are never mutated in place; every pan or zoom builds a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// `self · rhs`: the result applies `rhs` first, then `self`.
    pub fn multiply(self, rhs: Affine) -> Self {
        Self {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }

    /// Translation in the source (logical) space, i.e. right-multiplied.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        self.multiply(Self::translation(dx, dy))
    }

    /// Uniform scale about `pivot` in the source space; `pivot` maps to the
    /// same output before and after.
    pub fn scaled_about(self, factor: f64, pivot: Point) -> Self {
        self.multiply(Self::translation(pivot.x, pivot.y))
            .multiply(Self::scaling(factor, factor))
            .multiply(Self::translation(-pivot.x, -pivot.y))
    }

    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Linear scale of the map (geometric mean of the axis scales).
    pub fn scale_factor(self) -> f64 {
        self.determinant().abs().sqrt()
    }

    pub fn inverse(self) -> Result<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(ViewportError::Singular(det));
        }
        Ok(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    pub fn apply(self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }
}

/// Placed markers in logical space. Append-only; index order is draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerStore {
    points: Vec<Point>,
}

impl MarkerStore {
    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
