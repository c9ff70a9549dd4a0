//! Glide Core
//!
//! Geometry and viewport primitives shared by the Glide crates:
//!
//! - **Geometry**: `f64` points, sizes, rects, oriented rects and affine transforms
//! - **Screen**: global-to-pixel transform of the map viewport
//! - **Interpolation**: linear interpolation of scalars and points
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Point, Screen};
//!
//! let screen = Screen::with_pixel_size(800.0, 600.0);
//! let center = screen.gtop(Point::ZERO);
//! assert_eq!(center, Point::new(400.0, 300.0));
//! ```

pub mod geometry;
pub mod interpolation;
pub mod screen;

pub use geometry::{Affine2D, AnyRect, Point, Rect, Size};
pub use interpolation::{interpolate_f64, interpolate_point};
pub use screen::Screen;
