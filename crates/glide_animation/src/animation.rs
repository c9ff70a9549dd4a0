//! Animation trait and mixing rules
//!
//! An animation declares which objects it touches and, per object, which
//! properties it drives exclusively while it runs. The scheduler uses these
//! declarations to decide whether two animations may run side by side.

use crate::property::{Object, ObjectSet, Property, PropertySet, PropertyValue};
use smallvec::SmallVec;

/// Lifecycle callback attached to an animation
pub type Action = Box<dyn FnMut()>;

/// A unit of work driven by the [`AnimationSystem`](crate::AnimationSystem)
pub trait Animation {
    /// Objects this animation touches
    fn objects(&self) -> &ObjectSet;

    fn has_object(&self, object: Object) -> bool {
        self.objects().contains(&object)
    }

    /// Properties driven on `object`
    fn properties(&self, object: Object) -> &PropertySet;

    fn has_property(&self, object: Object, property: Property) -> bool {
        self.has_object(object) && self.properties(object).contains(&property)
    }

    /// Whether this animation may share its objects with other animations
    fn could_be_mixed(&self) -> bool;

    /// Whether this animation may be evicted by a forced insertion
    fn could_be_interrupted(&self) -> bool;

    /// True when this animation is mixable and drives none of `properties` on `object`
    fn could_be_mixed_with_properties(&self, object: Object, properties: &PropertySet) -> bool {
        if !self.could_be_mixed() {
            return false;
        }
        debug_assert!(self.has_object(object));
        self.properties(object).is_disjoint(properties)
    }

    /// True when this animation is mixable, `other` is *not* mixable, and
    /// they drive disjoint properties on every shared object.
    fn could_be_mixed_with(&self, other: &dyn Animation) -> bool {
        if !self.could_be_mixed() || other.could_be_mixed() {
            return false;
        }

        other
            .objects()
            .iter()
            .filter(|object| self.has_object(**object))
            .all(|object| self.could_be_mixed_with_properties(*object, other.properties(*object)))
    }

    fn on_start(&mut self) {}

    fn on_finish(&mut self) {}

    /// Called when the scheduler evicts this animation before it finished
    fn interrupt(&mut self) {}

    fn advance(&mut self, elapsed_seconds: f64);

    fn is_finished(&self) -> bool;

    /// Total run time in seconds
    fn duration(&self) -> f64;

    /// Force completion no later than `max_duration` seconds
    fn set_max_duration(&mut self, max_duration: f64);

    /// Current value of a declared property
    fn property(&self, object: Object, property: Property) -> PropertyValue;
}

/// Optional start/finish/interrupt callbacks
#[derive(Default)]
pub struct Callbacks {
    on_start: SmallVec<[Action; 1]>,
    on_finish: SmallVec<[Action; 1]>,
    on_interrupt: SmallVec<[Action; 1]>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_start(&mut self, action: Action) {
        self.on_start.push(action);
    }

    pub fn add_finish(&mut self, action: Action) {
        self.on_finish.push(action);
    }

    pub fn add_interrupt(&mut self, action: Action) {
        self.on_interrupt.push(action);
    }

    pub fn start(&mut self) {
        for action in self.on_start.iter_mut() {
            action();
        }
    }

    pub fn finish(&mut self) {
        for action in self.on_finish.iter_mut() {
            action();
        }
    }

    pub fn interrupt(&mut self) {
        for action in self.on_interrupt.iter_mut() {
            action();
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_start", &self.on_start.len())
            .field("on_finish", &self.on_finish.len())
            .field("on_interrupt", &self.on_interrupt.len())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{event_log, StubAnimation};
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn props(list: &[Property]) -> PropertySet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_mixed_with_properties_requires_mixable() {
        let log = event_log();
        let mixable = StubAnimation::new("a", &[Property::Position], &log);
        let locked = StubAnimation::new("b", &[Property::Position], &log).mixable(false);

        let angle = props(&[Property::Angle]);
        assert!(mixable.could_be_mixed_with_properties(Object::MapPlane, &angle));
        assert!(!locked.could_be_mixed_with_properties(Object::MapPlane, &angle));

        let position = props(&[Property::Position, Property::Scale]);
        assert!(!mixable.could_be_mixed_with_properties(Object::MapPlane, &position));
    }

    #[test]
    fn test_mixed_with_is_asymmetric() {
        let log = event_log();
        let mixable = StubAnimation::new("a", &[Property::Position], &log);
        let locked = StubAnimation::new("b", &[Property::Angle], &log).mixable(false);
        let other_mixable = StubAnimation::new("c", &[Property::Scale], &log);

        // Only "mixable with non-mixable" passes, and only in that direction.
        assert!(mixable.could_be_mixed_with(&locked));
        assert!(!locked.could_be_mixed_with(&mixable));

        // Two mixable animations never pass, even with disjoint properties.
        assert!(!mixable.could_be_mixed_with(&other_mixable));
        assert!(!other_mixable.could_be_mixed_with(&mixable));
    }

    #[test]
    fn test_mixed_with_checks_shared_properties() {
        let log = event_log();
        let mixable = StubAnimation::new("a", &[Property::Position], &log);
        let overlapping = StubAnimation::new("b", &[Property::Position], &log).mixable(false);
        assert!(!mixable.could_be_mixed_with(&overlapping));

        let detached = StubAnimation::detached("c", &log).mixable(false);
        assert!(mixable.could_be_mixed_with(&detached));
    }

    #[test]
    fn test_callbacks_run_in_order() {
        let hits = Rc::new(Cell::new(0u32));
        let mut callbacks = Callbacks::new();

        let first = hits.clone();
        callbacks.add_finish(Box::new(move || first.set(first.get() * 10 + 1)));
        let second = hits.clone();
        callbacks.add_finish(Box::new(move || second.set(second.get() * 10 + 2)));

        callbacks.start();
        callbacks.interrupt();
        assert_eq!(hits.get(), 0);

        callbacks.finish();
        assert_eq!(hits.get(), 12);
    }
}
