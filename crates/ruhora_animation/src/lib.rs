//! Ruhora Animation System
//!
//! Tweens, timelines and scroll observers for the headless page model.
//!
//! # Features
//!
//! - **Tweens**: property animations with delay, repeat, yoyo and completion hooks
//! - **Timelines**: declared step order with overlaps and staggered groups
//! - **Scroll observers**: one-shot reveals, scroll-scrubbed parallax, crossing notifications
//! - **Scopes**: every tween, observer and listener a setup closure creates is
//!   released by one idempotent [`Teardown`]

pub mod easing;
pub mod presets;
pub mod runtime;
pub mod scheduler;
pub mod scope;
pub mod scroll;
pub mod stagger;
pub mod timeline;
pub mod tween;

pub use easing::Easing;
pub use presets::{DurationPreset, EasePreset, ScrollDefaults};
pub use runtime::{MotionRuntime, Stage};
pub use scheduler::{AnimationScheduler, TweenId};
pub use scope::{Scope, Teardown};
pub use scroll::{
    Edge, ScrollObserverRegistry, ScrollTrigger, Scrub, TriggerEvent, TriggerId, TriggerPoint,
};
pub use stagger::{Stagger, StaggerDirection};
pub use timeline::{Position, Timeline, TimelineStep};
pub use tween::{Props, Repeat, TweenSpec};
