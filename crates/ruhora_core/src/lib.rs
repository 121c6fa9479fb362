//! Ruhora Core Runtime
//!
//! Foundational primitives for the headless page model:
//!
//! - **Scene**: elements with the visual properties a browser would paint
//!   (opacity, vertical offset, scale, elevation, height, display)
//! - **Viewport**: scroll position, size and media queries
//! - **Events**: pointer, focus and key events with a listener dispatcher
//! - **State Machines**: transition tables for interactive components
//!
//! # Example
//!
//! ```rust
//! use ruhora_core::{Rect, Scene, VisualState};
//!
//! let mut scene = Scene::new();
//! let headline = scene.insert("hero-headline", Rect::new(120.0, 80.0));
//!
//! scene.update_style(headline, |s| s.opacity = 0.0);
//! assert_eq!(scene.style(headline).map(|s| s.opacity), Some(0.0));
//!
//! scene.set_style(headline, VisualState::revealed());
//! assert!(scene.style(headline).is_some_and(|s| s.is_revealed()));
//! ```

pub mod element;
pub mod error;
pub mod events;
pub mod fsm;
pub mod platform;
pub mod scene;
pub mod viewport;

pub use element::{Element, ElementId, Height, Rect, VisualState};
pub use error::{CoreError, Result};
pub use events::{Event, EventData, EventDispatcher, EventType, KeyCode, ListenerId, Modifiers};
pub use fsm::{EventId, FsmId, FsmRuntime, StateId, StateMachine};
pub use scene::Scene;
pub use viewport::{MediaQuery, Viewport};
