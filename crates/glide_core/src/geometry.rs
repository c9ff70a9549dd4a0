//! Geometry primitives for the map viewport
//!
//! Global (map) coordinates need more precision than screen pixels, so every
//! type here is `f64` based.

// ─────────────────────────────────────────────────────────────────────────────
// Points and Sizes
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point, used for both global and pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from this point to `other`
    pub fn length(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Distance from the origin
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Approximate equality with an absolute tolerance per axis
    pub fn almost_eq(&self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }

    /// The shorter of the two sides
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rectangles
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Rect {
            origin: self.origin.offset(dx, dy),
            size: self.size,
        }
    }

    /// Scale the rect about its own center
    pub fn scale(&self, factor: f64) -> Self {
        let center = self.center();
        let size = Size::new(self.size.width * factor, self.size.height * factor);
        Rect {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }
}

/// Oriented rectangle: a local axis-aligned `rect` placed at `zero` and
/// rotated by `angle` radians around it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnyRect {
    zero: Point,
    angle: f64,
    rect: Rect,
}

impl AnyRect {
    pub fn new(zero: Point, angle: f64, rect: Rect) -> Self {
        Self { zero, angle, rect }
    }

    /// Origin of the local coordinate system in global coordinates
    pub fn global_zero(&self) -> Point {
        self.zero
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn local_rect(&self) -> Rect {
        self.rect
    }

    /// Convert a point from local to global coordinates
    pub fn to_global(&self, local: Point) -> Point {
        Affine2D::translation(self.zero.x, self.zero.y)
            .then(&Affine2D::rotation(self.angle))
            .transform_point(local)
    }

    /// The four corners in global coordinates, counter-clockwise from the local minimum
    pub fn corners(&self) -> [Point; 4] {
        let r = self.rect;
        [
            self.to_global(r.origin),
            self.to_global(Point::new(r.x() + r.width(), r.y())),
            self.to_global(Point::new(r.x() + r.width(), r.y() + r.height())),
            self.to_global(Point::new(r.x(), r.y() + r.height())),
        ]
    }

    /// Global position of the local rect's center
    pub fn global_center(&self) -> Point {
        self.to_global(self.rect.center())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f64; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    pub fn rotation(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            elements: [c, s, -s, c, 0.0, 0.0],
        }
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    /// Inverse transform, or `None` when the matrix is singular
    pub fn inverse(&self) -> Option<Affine2D> {
        let [a, b, c, d, tx, ty] = self.elements;
        let det = a * d - b * c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        let (ia, ib, ic, id) = (d * inv, -b * inv, -c * inv, a * inv);
        Some(Affine2D {
            elements: [ia, ib, ic, id, -(ia * tx + ic * ty), -(ib * tx + id * ty)],
        })
    }
}
