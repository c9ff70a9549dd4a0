//! Follow animation
//!
//! Moves, rotates and zooms the map plane as one atomic unit. Only the
//! components whose endpoints differ get an interpolator, so a pure pan never
//! claims the angle or scale of the camera.

use crate::animation::{Action, Animation, Callbacks};
use crate::config::TimingConfig;
use crate::interpolator::{AngleInterpolator, PositionInterpolator, ScaleInterpolator};
use crate::property::{Object, ObjectSet, Property, PropertySet, PropertyValue, EMPTY_PROPERTIES};
use glide_core::{Point, Screen};

/// Camera transition bundling position, angle and scale of [`Object::MapPlane`]
#[derive(Debug)]
pub struct FollowAnimation {
    objects: ObjectSet,
    properties: PropertySet,
    timing: TimingConfig,
    position: Option<PositionInterpolator>,
    angle: Option<AngleInterpolator>,
    scale: Option<ScaleInterpolator>,
    callbacks: Callbacks,
}

impl FollowAnimation {
    /// Empty animation; fill it with [`set_move`](Self::set_move),
    /// [`set_rotate`](Self::set_rotate) and [`set_scale`](Self::set_scale).
    pub fn empty() -> Self {
        Self::empty_with_timing(TimingConfig::DEFAULT)
    }

    pub fn empty_with_timing(timing: TimingConfig) -> Self {
        let mut objects = ObjectSet::new();
        objects.insert(Object::MapPlane);
        Self {
            objects,
            properties: PropertySet::new(),
            timing,
            position: None,
            angle: None,
            scale: None,
            callbacks: Callbacks::new(),
        }
    }

    pub fn new(
        start_position: Point,
        end_position: Point,
        start_angle: f64,
        end_angle: f64,
        start_scale: f64,
        end_scale: f64,
        screen: &Screen,
    ) -> Self {
        Self::with_timing(
            start_position,
            end_position,
            start_angle,
            end_angle,
            start_scale,
            end_scale,
            screen,
            TimingConfig::DEFAULT,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_timing(
        start_position: Point,
        end_position: Point,
        start_angle: f64,
        end_angle: f64,
        start_scale: f64,
        end_scale: f64,
        screen: &Screen,
        timing: TimingConfig,
    ) -> Self {
        let mut animation = Self::empty_with_timing(timing);
        animation.set_move(start_position, end_position, screen);
        animation.set_rotate(start_angle, end_angle);
        animation.set_scale(start_scale, end_scale);
        animation
    }

    pub fn set_move(&mut self, start: Point, end: Point, screen: &Screen) {
        if start != end {
            self.position = Some(PositionInterpolator::with_timing(
                0.0,
                start,
                end,
                screen,
                &self.timing,
            ));
            self.properties.insert(Property::Position);
        }
    }

    pub fn set_rotate(&mut self, start: f64, end: f64) {
        if start != end {
            self.angle = Some(AngleInterpolator::with_timing(0.0, start, end, &self.timing));
            self.properties.insert(Property::Angle);
        }
    }

    pub fn set_scale(&mut self, start: f64, end: f64) {
        if start != end {
            self.scale = Some(ScaleInterpolator::with_timing(0.0, start, end, &self.timing));
            self.properties.insert(Property::Scale);
        }
    }

    /// Builder: run `action` when the scheduler starts this animation
    pub fn on_start_with<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.callbacks.add_start(Box::new(action) as Action);
        self
    }

    /// Builder: run `action` when this animation completes
    pub fn on_finish_with<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.callbacks.add_finish(Box::new(action) as Action);
        self
    }

    /// Builder: run `action` when this animation is evicted early
    pub fn on_interrupt_with<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.callbacks.add_interrupt(Box::new(action) as Action);
        self
    }

    pub fn position_interpolator(&self) -> Option<&PositionInterpolator> {
        self.position.as_ref()
    }

    pub fn angle_interpolator(&self) -> Option<&AngleInterpolator> {
        self.angle.as_ref()
    }

    pub fn scale_interpolator(&self) -> Option<&ScaleInterpolator> {
        self.scale.as_ref()
    }
}

impl Animation for FollowAnimation {
    fn objects(&self) -> &ObjectSet {
        &self.objects
    }

    fn properties(&self, object: Object) -> &PropertySet {
        debug_assert_eq!(object, Object::MapPlane);
        if object == Object::MapPlane {
            &self.properties
        } else {
            &EMPTY_PROPERTIES
        }
    }

    fn has_property(&self, object: Object, property: Property) -> bool {
        self.has_object(object) && self.properties.contains(&property)
    }

    fn could_be_mixed(&self) -> bool {
        false
    }

    fn could_be_interrupted(&self) -> bool {
        true
    }

    fn on_start(&mut self) {
        self.callbacks.start();
    }

    fn on_finish(&mut self) {
        self.callbacks.finish();
    }

    fn interrupt(&mut self) {
        self.callbacks.interrupt();
    }

    fn advance(&mut self, elapsed_seconds: f64) {
        if let Some(angle) = self.angle.as_mut() {
            angle.advance(elapsed_seconds);
        }
        if let Some(scale) = self.scale.as_mut() {
            scale.advance(elapsed_seconds);
        }
        if let Some(position) = self.position.as_mut() {
            position.advance(elapsed_seconds);
        }
    }

    fn is_finished(&self) -> bool {
        self.angle.as_ref().map_or(true, |a| a.is_finished())
            && self.scale.as_ref().map_or(true, |s| s.is_finished())
            && self.position.as_ref().map_or(true, |p| p.is_finished())
    }

    /// The slowest component gates the whole move
    fn duration(&self) -> f64 {
        let angle = self.angle.as_ref().map_or(0.0, |a| a.duration());
        let scale = self.scale.as_ref().map_or(0.0, |s| s.duration());
        let position = self.position.as_ref().map_or(0.0, |p| p.duration());
        angle.max(scale).max(position)
    }

    fn set_max_duration(&mut self, max_duration: f64) {
        if let Some(angle) = self.angle.as_mut() {
            angle.set_max_duration(max_duration);
        }
        if let Some(scale) = self.scale.as_mut() {
            scale.set_max_duration(max_duration);
        }
        if let Some(position) = self.position.as_mut() {
            position.set_max_duration(max_duration);
        }
    }

    fn property(&self, object: Object, property: Property) -> PropertyValue {
        debug_assert_eq!(object, Object::MapPlane);

        let value: Option<PropertyValue> = match property {
            Property::Position => self.position.as_ref().map(|p| p.position().into()),
            Property::Angle => self.angle.as_ref().map(|a| a.angle().into()),
            Property::Scale => self.scale.as_ref().map(|s| s.scale().into()),
        };

        debug_assert!(
            value.is_some(),
            "follow animation does not drive {property:?}"
        );
        value.unwrap_or_else(|| {
            tracing::error!("Follow animation does not drive {:?}", property);
            PropertyValue::default()
        })
    }
}
