//! Scenario scripts
//!
//! A scenario is a JSON document with a list of steps run in order against
//! a freshly mounted page. Elements are addressed by their labels.
//!
//! ```json
//! {
//!   "name": "open the first ritual",
//!   "steps": [
//!     { "type": "scroll", "y": 2400 },
//!     { "type": "wait", "ms": 1500 },
//!     { "type": "click", "element": "ritual-cta-product-1" },
//!     { "type": "assert_overlay", "open": true },
//!     { "type": "key", "key": "Escape" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Advance simulated time, in whole frames
    Wait { ms: u32 },
    Tick { frames: u32 },
    Scroll { y: f32 },
    Resize { width: f32, height: f32 },
    Hover { element: String },
    Leave { element: String },
    Click { element: String },
    Key {
        key: String,
        #[serde(default)]
        shift: bool,
    },
    AssertVisible { element: String },
    AssertHidden { element: String },
    AssertOverlay { open: bool },
    /// `None` asserts that every journal card is collapsed
    AssertExpanded { entry: Option<u32> },
    AssertActiveNav { section: String },
}

impl Step {
    /// The step's `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Wait { .. } => "wait",
            Step::Tick { .. } => "tick",
            Step::Scroll { .. } => "scroll",
            Step::Resize { .. } => "resize",
            Step::Hover { .. } => "hover",
            Step::Leave { .. } => "leave",
            Step::Click { .. } => "click",
            Step::Key { .. } => "key",
            Step::AssertVisible { .. } => "assert_visible",
            Step::AssertHidden { .. } => "assert_hidden",
            Step::AssertOverlay { .. } => "assert_overlay",
            Step::AssertExpanded { .. } => "assert_expanded",
            Step::AssertActiveNav { .. } => "assert_active_nav",
        }
    }
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
