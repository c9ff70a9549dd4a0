//! Screen transform
//!
//! Maps global (map) coordinates to viewport pixels and back. The viewport is
//! described by the global point shown at the center of the pixel rect, the
//! rotation of the map plane and the number of global units per pixel.

use crate::geometry::{Affine2D, AnyRect, Point, Rect};

/// Viewport transform between global and pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pixel_rect: Rect,
    org: Point,
    angle: f64,
    scale: f64,
    g_to_p: Affine2D,
    p_to_g: Affine2D,
}

impl Screen {
    /// Create a screen showing `org` at the center of `pixel_rect`.
    ///
    /// `scale` is in global units per pixel and must be positive.
    pub fn new(pixel_rect: Rect, org: Point, angle: f64, scale: f64) -> Self {
        debug_assert!(scale > 0.0, "screen scale must be positive");
        let mut screen = Self {
            pixel_rect,
            org,
            angle,
            scale,
            g_to_p: Affine2D::IDENTITY,
            p_to_g: Affine2D::IDENTITY,
        };
        screen.update_transforms();
        screen
    }

    /// Screen of the given pixel size centered on the global origin, unrotated, one unit per pixel
    pub fn with_pixel_size(width: f64, height: f64) -> Self {
        Self::new(Rect::new(0.0, 0.0, width, height), Point::ZERO, 0.0, 1.0)
    }

    fn update_transforms(&mut self) {
        let center = self.pixel_rect.center();
        // Pixel y grows downwards, global y grows upwards.
        self.g_to_p = Affine2D::translation(center.x, center.y)
            .then(&Affine2D::scale(1.0 / self.scale, -1.0 / self.scale))
            .then(&Affine2D::rotation(-self.angle))
            .then(&Affine2D::translation(-self.org.x, -self.org.y));
        self.p_to_g = self.g_to_p.inverse().unwrap_or(Affine2D::IDENTITY);
    }

    pub fn pixel_rect(&self) -> Rect {
        self.pixel_rect
    }

    /// Global point at the center of the viewport
    pub fn org(&self) -> Point {
        self.org
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_org(&mut self, org: Point) {
        self.org = org;
        self.update_transforms();
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.update_transforms();
    }

    pub fn set_scale(&mut self, scale: f64) {
        debug_assert!(scale > 0.0, "screen scale must be positive");
        self.scale = scale;
        self.update_transforms();
    }

    pub fn set_pixel_rect(&mut self, pixel_rect: Rect) {
        self.pixel_rect = pixel_rect;
        self.update_transforms();
    }

    /// Global to pixel
    pub fn gtop(&self, point: Point) -> Point {
        self.g_to_p.transform_point(point)
    }

    /// Pixel to global
    pub fn ptog(&self, point: Point) -> Point {
        self.p_to_g.transform_point(point)
    }

    /// Visible area in global coordinates
    pub fn global_rect(&self) -> AnyRect {
        let center = self.pixel_rect.center();
        let local = self
            .pixel_rect
            .offset(-center.x, -center.y)
            .scale(self.scale);
        AnyRect::new(self.org, self.angle, local)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::with_pixel_size(640.0, 480.0)
    }
}
