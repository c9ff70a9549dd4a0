//! Parallel animation
//!
//! Runs independent animations side by side. From the scheduler's point of
//! view the container is one unit whose objects and properties are the union
//! of its members'.

use crate::animation::Animation;
use crate::property::{
    Object, ObjectSet, Property, PropertySet, PropertyValue, EMPTY_PROPERTIES,
};
use std::collections::BTreeMap;

/// Bag of animations advanced together
#[derive(Default)]
pub struct ParallelAnimation {
    objects: ObjectSet,
    properties: BTreeMap<Object, PropertySet>,
    animations: Vec<Box<dyn Animation>>,
}

impl ParallelAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_animation`](Self::add_animation)
    pub fn with(mut self, animation: Box<dyn Animation>) -> Self {
        self.add_animation(animation);
        self
    }

    pub fn add_animation(&mut self, animation: Box<dyn Animation>) {
        for object in animation.objects() {
            self.objects.insert(*object);
            self.properties
                .entry(*object)
                .or_default()
                .extend(animation.properties(*object).iter().copied());
        }
        self.animations.push(animation);
    }

    /// Members still running
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl Animation for ParallelAnimation {
    fn objects(&self) -> &ObjectSet {
        &self.objects
    }

    fn properties(&self, object: Object) -> &PropertySet {
        debug_assert!(self.has_object(object));
        self.properties.get(&object).unwrap_or(&EMPTY_PROPERTIES)
    }

    /// Declared sets keep finished members' properties; reads only see running members.
    fn has_property(&self, object: Object, property: Property) -> bool {
        self.animations
            .iter()
            .any(|a| a.has_property(object, property))
    }

    /// Mixable only if every member is
    fn could_be_mixed(&self) -> bool {
        self.animations.iter().all(|a| a.could_be_mixed())
    }

    /// Interruptible only if every member is
    fn could_be_interrupted(&self) -> bool {
        self.animations.iter().all(|a| a.could_be_interrupted())
    }

    fn on_start(&mut self) {
        for animation in self.animations.iter_mut() {
            animation.on_start();
        }
    }

    fn interrupt(&mut self) {
        for animation in self.animations.iter_mut() {
            animation.interrupt();
        }
    }

    fn advance(&mut self, elapsed_seconds: f64) {
        let mut index = 0;
        while index < self.animations.len() {
            let animation = &mut self.animations[index];
            animation.advance(elapsed_seconds);
            if animation.is_finished() {
                animation.on_finish();
                self.animations.remove(index);
            } else {
                index += 1;
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.animations.is_empty()
    }

    fn duration(&self) -> f64 {
        self.animations
            .iter()
            .map(|a| a.duration())
            .fold(0.0, f64::max)
    }

    fn set_max_duration(&mut self, max_duration: f64) {
        for animation in self.animations.iter_mut() {
            animation.set_max_duration(max_duration);
        }
    }

    fn property(&self, object: Object, property: Property) -> PropertyValue {
        let value = self
            .animations
            .iter()
            .find(|a| a.has_property(object, property))
            .map(|a| a.property(object, property));

        debug_assert!(
            value.is_some(),
            "parallel animation has no running member driving {object:?}.{property:?}"
        );
        value.unwrap_or_else(|| {
            tracing::error!(
                "Parallel animation has no running member driving {:?}.{:?}",
                object,
                property
            );
            PropertyValue::default()
        })
    }
}
