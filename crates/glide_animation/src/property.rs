//! Animated objects, their properties and property values

use glide_core::Point;
use std::collections::BTreeSet;

/// Logical animation target
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Object {
    /// The map plane seen through the viewport (the camera)
    MapPlane,
    /// The user's position marker
    MyPosition,
    /// The selection marker
    Selection,
}

/// Attribute of an [`Object`] that an animation can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Position,
    Angle,
    Scale,
}

/// Objects touched by an animation
pub type ObjectSet = BTreeSet<Object>;

/// Properties driven on a single object
pub type PropertySet = BTreeSet<Property>;

/// Shared empty sets for animations that currently touch nothing
pub(crate) static EMPTY_OBJECTS: ObjectSet = BTreeSet::new();
pub(crate) static EMPTY_PROPERTIES: PropertySet = BTreeSet::new();

/// Current value of a property
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    /// Angle in radians or scale factor
    Scalar(f64),
    /// Position in global coordinates
    Point(Point),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Scalar(value) => Some(*value),
            PropertyValue::Point(_) => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            PropertyValue::Point(point) => Some(*point),
            PropertyValue::Scalar(_) => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<Point> for PropertyValue {
    fn from(point: Point) -> Self {
        PropertyValue::Point(point)
    }
}

impl Default for PropertyValue {
    fn default() -> Self {
        PropertyValue::Scalar(0.0)
    }
}
