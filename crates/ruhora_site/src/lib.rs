//! Ruhora Site
//!
//! The RUHORA landing page as a headless model: the content catalogue, the
//! scroll and load choreography of every section, the journal cards and the
//! ritual overlay, wired together by [`Page`].
//!
//! # Example
//!
//! ```rust
//! use ruhora_animation::MotionRuntime;
//! use ruhora_core::Viewport;
//! use ruhora_site::Page;
//!
//! let mut rt = MotionRuntime::new(Viewport::new(1440.0, 900.0), false);
//! let mut page = Page::mount(&mut rt);
//! page.animate(&mut rt).unwrap();
//!
//! page.scroll(&mut rt, 1200.0);
//! for _ in 0..120 {
//!     page.tick(&mut rt, 16.0);
//! }
//!
//! page.unmount(&mut rt);
//! ```

pub mod assets;
pub mod content;
pub mod error;
pub mod journal;
pub mod links;
pub mod overlay;
pub mod page;
pub mod sections;

pub use content::{journal_entries, products, JournalEntry, Product};
pub use error::{Result, SiteError};
pub use journal::JournalGroup;
pub use overlay::{OverlayClick, OverlayState, RitualOverlay};
pub use page::{Page, PageAction};
pub use sections::{NavItem, Section};
