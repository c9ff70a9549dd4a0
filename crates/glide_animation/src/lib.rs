//! Glide Animation System
//!
//! Camera animation scheduling for a 2D map viewport.
//!
//! # Features
//!
//! - **Interpolators**: Position, angle and scale interpolation with speed-derived durations
//! - **Follow Animations**: Move, rotate and zoom the camera in one step
//! - **Composition**: Run animations in parallel or as sequences
//! - **Scheduling**: Mix compatible animations, queue conflicting ones, force interruptions
//! - **Continuity**: Finished and interrupted animations leave their last values behind

pub mod animation;
pub mod config;
pub mod error;
pub mod follow;
pub mod interpolator;
pub mod parallel;
pub mod property;
pub mod scheduler;
pub mod sequence;

pub use animation::{Action, Animation, Callbacks};
pub use config::TimingConfig;
pub use error::{ConfigError, Result};
pub use follow::FollowAnimation;
pub use interpolator::{AngleInterpolator, Interpolator, PositionInterpolator, ScaleInterpolator};
pub use parallel::ParallelAnimation;
pub use property::{Object, ObjectSet, Property, PropertySet, PropertyValue};
pub use scheduler::{AnimationId, AnimationSystem};
pub use sequence::SequenceAnimation;
