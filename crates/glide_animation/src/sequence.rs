//! Sequence animation
//!
//! Ordered pipeline of animations run one at a time. Only the running stage
//! matters for conflicts, so objects, properties and flags all come from the
//! current head.

use crate::animation::Animation;
use crate::property::{
    Object, ObjectSet, Property, PropertySet, PropertyValue, EMPTY_OBJECTS, EMPTY_PROPERTIES,
};
use std::collections::VecDeque;

/// Stages executed back to back
#[derive(Default)]
pub struct SequenceAnimation {
    animations: VecDeque<Box<dyn Animation>>,
}

impl SequenceAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_animation`](Self::add_animation)
    pub fn then(mut self, animation: Box<dyn Animation>) -> Self {
        self.add_animation(animation);
        self
    }

    pub fn add_animation(&mut self, animation: Box<dyn Animation>) {
        self.animations.push_back(animation);
    }

    /// Stages not yet finished, including the running one
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    fn head(&self) -> Option<&dyn Animation> {
        self.animations.front().map(|a| a.as_ref())
    }
}

impl Animation for SequenceAnimation {
    fn objects(&self) -> &ObjectSet {
        self.head().map_or(&EMPTY_OBJECTS, |head| head.objects())
    }

    fn has_object(&self, object: Object) -> bool {
        self.head().is_some_and(|head| head.has_object(object))
    }

    fn properties(&self, object: Object) -> &PropertySet {
        self.head()
            .map_or(&EMPTY_PROPERTIES, |head| head.properties(object))
    }

    fn has_property(&self, object: Object, property: Property) -> bool {
        self.head()
            .is_some_and(|head| head.has_property(object, property))
    }

    fn could_be_mixed(&self) -> bool {
        self.head().is_some_and(|head| head.could_be_mixed())
    }

    fn could_be_interrupted(&self) -> bool {
        self.head().map_or(true, |head| head.could_be_interrupted())
    }

    fn on_start(&mut self) {
        if let Some(head) = self.animations.front_mut() {
            head.on_start();
        }
    }

    /// Finishes the last stage, which is kept so its final values stay readable
    fn on_finish(&mut self) {
        if let Some(head) = self.animations.front_mut() {
            head.on_finish();
        }
    }

    fn interrupt(&mut self) {
        if let Some(head) = self.animations.front_mut() {
            head.interrupt();
        }
    }

    /// Advances the running stage only. A finished stage is dropped and the
    /// next one is started right away; the last stage stays in place until
    /// [`on_finish`](Animation::on_finish).
    fn advance(&mut self, elapsed_seconds: f64) {
        let Some(head) = self.animations.front_mut() else {
            return;
        };
        head.advance(elapsed_seconds);
        if head.is_finished() && self.animations.len() > 1 {
            if let Some(mut finished) = self.animations.pop_front() {
                finished.on_finish();
            }
            let left = self.animations.len();
            if let Some(next) = self.animations.front_mut() {
                tracing::trace!("Sequence promoted next stage, {} left", left);
                next.on_start();
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.animations.len() <= 1 && self.head().map_or(true, |head| head.is_finished())
    }

    /// Sum of all remaining stages
    fn duration(&self) -> f64 {
        self.animations.iter().map(|a| a.duration()).sum()
    }

    /// Caps the running stage
    fn set_max_duration(&mut self, max_duration: f64) {
        if let Some(head) = self.animations.front_mut() {
            head.set_max_duration(max_duration);
        }
    }

    fn property(&self, object: Object, property: Property) -> PropertyValue {
        debug_assert!(self.head().is_some(), "empty sequence has no properties");
        self.head()
            .map(|head| head.property(object, property))
            .unwrap_or_else(|| {
                tracing::error!("Empty sequence has no property {:?}.{:?}", object, property);
                PropertyValue::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::test_support::{event_log, StubAnimation};

    #[test]
    fn test_declarations_follow_head() {
        let log = event_log();
        let mut sequence = SequenceAnimation::new()
            .then(
                StubAnimation::new("a", &[Property::Position], &log)
                    .mixable(false)
                    .duration(0.5)
                    .boxed(),
            )
            .then(StubAnimation::new("b", &[Property::Scale], &log).boxed());

        assert!(sequence.has_property(Object::MapPlane, Property::Position));
        assert!(!sequence.has_property(Object::MapPlane, Property::Scale));
        assert!(!sequence.could_be_mixed());

        sequence.advance(0.5);
        assert!(!sequence.has_property(Object::MapPlane, Property::Position));
        assert!(sequence.has_property(Object::MapPlane, Property::Scale));
        assert!(sequence.could_be_mixed());
    }

    #[test]
    fn test_only_head_advances() {
        let log = event_log();
        let mut sequence = SequenceAnimation::new()
            .then(
                StubAnimation::new("a", &[Property::Position], &log)
                    .duration(1.0)
                    .boxed(),
            )
            .then(
                StubAnimation::new("b", &[Property::Position], &log)
                    .duration(1.0)
                    .boxed(),
            );

        sequence.on_start();
        sequence.advance(0.5);
        assert_eq!(*log.borrow(), vec!["a:start", "a:advance"]);
        assert_eq!(sequence.len(), 2);
    }

    #[test]
    fn test_promoted_stage_is_started() {
        let log = event_log();
        let mut sequence = SequenceAnimation::new()
            .then(
                StubAnimation::new("a", &[Property::Position], &log)
                    .duration(0.5)
                    .boxed(),
            )
            .then(
                StubAnimation::new("b", &[Property::Angle], &log)
                    .duration(0.5)
                    .boxed(),
            );

        sequence.on_start();
        sequence.advance(0.5);
        sequence.advance(0.5);
        assert!(sequence.is_finished());
        assert_eq!(sequence.len(), 1);
        sequence.on_finish();
        assert_eq!(
            *log.borrow(),
            vec![
                "a:start", "a:advance", "a:finish", "b:start", "b:advance", "b:finish",
            ]
        );
    }

    #[test]
    fn test_last_stage_keeps_final_values() {
        let log = event_log();
        let mut sequence = SequenceAnimation::new()
            .then(
                StubAnimation::new("a", &[Property::Position], &log)
                    .duration(0.5)
                    .boxed(),
            )
            .then(
                StubAnimation::new("b", &[Property::Scale], &log)
                    .duration(0.5)
                    .value(1.0)
                    .boxed(),
            );

        sequence.advance(0.5);
        sequence.advance(0.5);
        assert!(sequence.is_finished());
        assert!(sequence.has_property(Object::MapPlane, Property::Scale));
        assert_eq!(
            sequence.property(Object::MapPlane, Property::Scale),
            PropertyValue::Scalar(1.5)
        );
    }

    #[test]
    fn test_duration_sums_stages() {
        let log = event_log();
        let mut sequence = SequenceAnimation::new()
            .then(
                StubAnimation::new("a", &[Property::Position], &log)
                    .duration(0.5)
                    .boxed(),
            )
            .then(
                StubAnimation::new("b", &[Property::Angle], &log)
                    .duration(1.5)
                    .boxed(),
            );
        assert_eq!(sequence.duration(), 2.0);

        sequence.set_max_duration(0.25);
        assert_eq!(sequence.duration(), 1.75);
    }

    #[test]
    fn test_empty_sequence() {
        let mut sequence = SequenceAnimation::new();
        assert!(sequence.is_finished());
        assert!(sequence.objects().is_empty());
        assert!(!sequence.has_object(Object::MapPlane));
        assert!(!sequence.could_be_mixed());
        assert!(sequence.could_be_interrupted());
        sequence.advance(1.0);
        sequence.on_start();
        assert!(sequence.is_finished());
    }
}
