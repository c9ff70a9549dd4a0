//! Animation scheduler
//!
//! Owns every running animation and reconciles them into one per-frame state.
//!
//! Animations are kept in a chain of groups. Members of a group run side by
//! side and never drive the same property of the same object; only the head
//! group is advanced. An animation that conflicts with a group either waits in
//! a later group or, when inserted with `force`, evicts the interruptible
//! members it conflicts with. Values of animations that finish or get evicted
//! are cached until read once, so the camera does not snap back for a frame.

use crate::animation::Animation;
use crate::property::{Object, Property, PropertyValue};
use glide_core::{AnyRect, Screen};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::collections::VecDeque;

new_key_type! {
    /// Handle of an animation owned by the scheduler
    pub struct AnimationId;
}

/// Animations running concurrently
type Group = SmallVec<[AnimationId; 4]>;

/// Last committed values of properties no longer driven by any animation
type PropertyCache = FxHashMap<(Object, Property), PropertyValue>;

/// The scheduler that ticks the head group of animations each frame
pub struct AnimationSystem {
    animations: SlotMap<AnimationId, Box<dyn Animation>>,
    chain: VecDeque<Group>,
    cache: PropertyCache,
}

impl AnimationSystem {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            chain: VecDeque::new(),
            cache: FxHashMap::default(),
        }
    }

    /// Merge `animation` into the first group that can take it, or queue it
    /// in a new group at the end of the chain.
    ///
    /// With `force`, interruptible members that conflict with `animation` are
    /// evicted on the spot; a conflicting member that cannot be interrupted
    /// still rejects its whole group.
    pub fn add_animation(&mut self, mut animation: Box<dyn Animation>, force: bool) -> AnimationId {
        for group_index in 0..self.chain.len() {
            let mut accepted = true;
            let mut member_index = 0;
            while member_index < self.chain[group_index].len() {
                let id = self.chain[group_index][member_index];
                let (fits, interruptible) = match self.animations.get(id) {
                    Some(member) => (
                        can_share_group(member.as_ref(), animation.as_ref()),
                        member.could_be_interrupted(),
                    ),
                    None => {
                        self.chain[group_index].remove(member_index);
                        continue;
                    }
                };

                if fits {
                    member_index += 1;
                    continue;
                }

                if !force || !interruptible {
                    accepted = false;
                    break;
                }

                // TODO: evict only once the whole group is known to accept the animation
                self.chain[group_index].remove(member_index);
                self.evict(id);
            }

            if accepted {
                animation.on_start();
                let id = self.animations.insert(animation);
                self.chain[group_index].push(id);
                tracing::debug!("Merged animation {:?} into group {}", id, group_index);
                return id;
            }
        }

        self.push_animation(animation)
    }

    fn push_animation(&mut self, mut animation: Box<dyn Animation>) -> AnimationId {
        animation.on_start();
        let id = self.animations.insert(animation);
        self.chain.push_back(smallvec![id]);
        tracing::debug!("Queued animation {:?} in group {}", id, self.chain.len() - 1);
        id
    }

    fn evict(&mut self, id: AnimationId) {
        if let Some(mut animation) = self.animations.remove(id) {
            tracing::debug!("Interrupting animation {:?}", id);
            animation.interrupt();
            save_into(&mut self.cache, animation.as_ref());
        }
    }

    /// Advance the head group by `elapsed_seconds`
    ///
    /// Finished members are finished, cached and dropped in insertion order.
    /// An emptied head group is removed so the next group starts running on
    /// the following frame.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        self.pop_empty_groups();

        let Some(group) = self.chain.front_mut() else {
            return;
        };

        let mut index = 0;
        while index < group.len() {
            let id = group[index];
            let Some(animation) = self.animations.get_mut(id) else {
                group.remove(index);
                continue;
            };

            animation.advance(elapsed_seconds);
            if !animation.is_finished() {
                index += 1;
                continue;
            }

            animation.on_finish();
            save_into(&mut self.cache, animation.as_ref());
            group.remove(index);
            self.animations.remove(id);
            tracing::debug!("Finished animation {:?}", id);
        }

        self.pop_empty_groups();
    }

    fn pop_empty_groups(&mut self) {
        while self.chain.front().is_some_and(|group| group.is_empty()) {
            self.chain.pop_front();
            tracing::trace!("Promoted next animation group, {} left", self.chain.len());
        }
    }

    /// Current value of `property`: the head group first, then the cache
    /// (consuming the entry), then `fallback`.
    pub fn property(
        &mut self,
        object: Object,
        property: Property,
        fallback: PropertyValue,
    ) -> PropertyValue {
        if let Some(group) = self.chain.front() {
            let driver = group
                .iter()
                .filter_map(|id| self.animations.get(*id))
                .find(|animation| animation.has_property(object, property));
            if let Some(animation) = driver {
                return animation.property(object, property);
            }
        }

        self.cache.remove(&(object, property)).unwrap_or(fallback)
    }

    /// Viewport of `screen` with every animated camera property applied
    pub fn rect(&mut self, screen: &Screen) -> AnyRect {
        let object = Object::MapPlane;
        let scale = self
            .property(object, Property::Scale, screen.scale().into())
            .as_f64()
            .unwrap_or_else(|| screen.scale());
        let angle = self
            .property(object, Property::Angle, screen.angle().into())
            .as_f64()
            .unwrap_or_else(|| screen.angle());
        let position = self
            .property(object, Property::Position, screen.org().into())
            .as_point()
            .unwrap_or_else(|| screen.org());

        let pixel_rect = screen.pixel_rect();
        let center = pixel_rect.center();
        let rect = pixel_rect.offset(-center.x, -center.y).scale(scale);
        AnyRect::new(position, angle, rect)
    }

    /// Whether `object` is animated by the head group or has unread cached values
    pub fn animation_exists(&self, object: Object) -> bool {
        let running = self.chain.front().is_some_and(|group| {
            group
                .iter()
                .filter_map(|id| self.animations.get(*id))
                .any(|animation| animation.has_object(object))
        });
        running || self.cache.keys().any(|(cached, _)| *cached == object)
    }

    /// Cache the current value of every property `animation` drives
    pub fn save_animation_result(&mut self, animation: &dyn Animation) {
        save_into(&mut self.cache, animation);
    }

    /// Cached value without consuming it
    pub fn cached_property(&self, object: Object, property: Property) -> Option<PropertyValue> {
        self.cache.get(&(object, property)).copied()
    }

    /// Whether the animation is still owned by the scheduler
    pub fn is_running(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    pub fn animation(&self, id: AnimationId) -> Option<&dyn Animation> {
        self.animations.get(id).map(|animation| animation.as_ref())
    }

    /// Check if any animation is queued or running
    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Number of groups in the chain, the head included
    pub fn group_count(&self) -> usize {
        self.chain.len()
    }

    /// Members of the group at `index` (0 is the head)
    pub fn group(&self, index: usize) -> &[AnimationId] {
        self.chain.get(index).map_or(&[], |group| group.as_slice())
    }

    pub fn cached_property_count(&self) -> usize {
        self.cache.len()
    }

    /// Drop every animation and cached value without running callbacks
    pub fn clear(&mut self) {
        self.animations.clear();
        self.chain.clear();
        self.cache.clear();
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Two animations may run in one group unless, on some object both touch,
/// either side refuses to mix with the other's properties.
fn can_share_group(member: &dyn Animation, candidate: &dyn Animation) -> bool {
    member
        .objects()
        .iter()
        .filter(|object| candidate.has_object(**object))
        .all(|object| {
            member.could_be_mixed_with_properties(*object, candidate.properties(*object))
                && candidate.could_be_mixed_with_properties(*object, member.properties(*object))
        })
}

fn save_into(cache: &mut PropertyCache, animation: &dyn Animation) {
    for object in animation.objects() {
        for property in animation.properties(*object) {
            if animation.has_property(*object, *property) {
                cache.insert((*object, *property), animation.property(*object, *property));
            }
        }
    }
}
