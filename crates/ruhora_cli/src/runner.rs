//! Headless scenario runner
//!
//! Mounts and animates the page once, then executes scenario steps in
//! order. The first failing step stops the run; the report says which one
//! and why.

use crate::config::SiteConfig;
use crate::scenario::{Scenario, Step};
use ruhora_animation::MotionRuntime;
use ruhora_core::{ElementId, KeyCode, Modifiers};
use ruhora_site::{NavItem, Page, PageAction, SiteError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Opacity at or below which an element counts as hidden
const HIDDEN_OPACITY: f32 = 0.01;

/// Why a step failed
#[derive(Error, Debug)]
pub enum StepError {
    #[error("No element labelled {0:?}")]
    UnknownElement(String),

    #[error("Unknown key {0:?}")]
    UnknownKey(String),

    #[error("Unknown section {0:?}")]
    UnknownSection(String),

    #[error("{0}")]
    Assertion(String),

    #[error(transparent)]
    Site(#[from] SiteError),
}

/// Outcome of a scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub passed: bool,
    pub reduced_motion: bool,
    pub steps_run: usize,
    /// Zero-based index of the failing step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub frames: u64,
    pub elapsed_ms: f64,
    /// Outbound links the run would have opened
    #[serde(default)]
    pub opened_links: Vec<String>,
}

pub struct Runner {
    rt: MotionRuntime,
    page: Page,
    frame_ms: f32,
    frames: u64,
    opened_links: Vec<String>,
}

impl Runner {
    pub fn new(config: &SiteConfig, force_reduced_motion: bool) -> Result<Self, SiteError> {
        let mut rt = config.runtime(force_reduced_motion);
        let mut page = Page::mount(&mut rt);
        page.animate(&mut rt)?;
        Ok(Self {
            rt,
            page,
            frame_ms: config.motion.frame_ms,
            frames: 0,
            opened_links: Vec::new(),
        })
    }

    pub fn runtime(&self) -> &MotionRuntime {
        &self.rt
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Run every step, stopping at the first failure
    pub fn run(mut self, scenario: &Scenario) -> Report {
        let mut failure = None;
        let mut steps_run = 0;

        for (index, step) in scenario.steps.iter().enumerate() {
            steps_run += 1;
            if let Err(err) = self.step(step) {
                info!(index, kind = step.kind(), error = %err, "step failed");
                failure = Some((index, step.kind(), err.to_string()));
                break;
            }
        }

        let reduced_motion = self.rt.reduced_motion();
        self.page.unmount(&mut self.rt);

        let (failed_step, failed_kind, message) = match failure {
            Some((index, kind, message)) => (Some(index), Some(kind.to_string()), Some(message)),
            None => (None, None, None),
        };
        Report {
            scenario: scenario.name.clone(),
            passed: failed_step.is_none(),
            reduced_motion,
            steps_run,
            failed_step,
            failed_kind,
            message,
            frames: self.frames,
            elapsed_ms: self.rt.elapsed_ms(),
            opened_links: self.opened_links,
        }
    }

    fn advance(&mut self, frames: u32) {
        for _ in 0..frames {
            self.page.tick(&mut self.rt, self.frame_ms);
        }
        self.frames += u64::from(frames);
    }

    fn element(&self, label: &str) -> Result<ElementId, StepError> {
        self.rt
            .scene()
            .find(label)
            .ok_or_else(|| StepError::UnknownElement(label.to_string()))
    }

    /// Displayed, not transparent, and inside displayed ancestors
    fn is_visible(&self, id: ElementId) -> bool {
        let scene = self.rt.scene();
        let Some(element) = scene.get(id) else {
            return false;
        };
        if element.style.opacity <= HIDDEN_OPACITY {
            return false;
        }
        let mut current = Some(id);
        while let Some(el) = current.and_then(|c| scene.get(c)) {
            if !el.style.display {
                return false;
            }
            current = el.parent;
        }
        true
    }

    fn record(&mut self, action: PageAction) {
        debug!(?action, "page action");
        if let PageAction::OpenLink(url) = action {
            self.opened_links.push(url.to_string());
        }
    }

    fn step(&mut self, step: &Step) -> Result<(), StepError> {
        match step {
            Step::Wait { ms } => {
                let frames = (*ms as f32 / self.frame_ms).ceil() as u32;
                self.advance(frames);
            }
            Step::Tick { frames } => self.advance(*frames),
            Step::Scroll { y } => {
                self.page.scroll(&mut self.rt, *y);
            }
            Step::Resize { width, height } => self.rt.resize(*width, *height),
            Step::Hover { element } => {
                let id = self.element(element)?;
                self.page.hover(&mut self.rt, id);
            }
            Step::Leave { element } => {
                let id = self.element(element)?;
                self.page.leave(&mut self.rt, id);
            }
            Step::Click { element } => {
                let id = self.element(element)?;
                let action = self.page.click(&mut self.rt, id)?;
                self.record(action);
            }
            Step::Key { key, shift } => {
                let code = KeyCode::from_name(key);
                if code == KeyCode::UNKNOWN {
                    return Err(StepError::UnknownKey(key.clone()));
                }
                let modifiers = if *shift {
                    Modifiers::shift_only()
                } else {
                    Modifiers::NONE
                };
                let action = self.page.key(&mut self.rt, code, modifiers)?;
                self.record(action);
            }
            Step::AssertVisible { element } => {
                let id = self.element(element)?;
                if !self.is_visible(id) {
                    return Err(StepError::Assertion(format!("{element} is not visible")));
                }
            }
            Step::AssertHidden { element } => {
                let visible = self
                    .rt
                    .scene()
                    .find(element)
                    .is_some_and(|id| self.is_visible(id));
                if visible {
                    return Err(StepError::Assertion(format!("{element} is visible")));
                }
            }
            Step::AssertOverlay { open } => {
                let actual = self.page.is_overlay_open();
                if actual != *open {
                    return Err(StepError::Assertion(format!(
                        "overlay open is {actual}, expected {open}"
                    )));
                }
            }
            Step::AssertExpanded { entry } => {
                let actual = self.page.expanded_entry();
                if actual != *entry {
                    return Err(StepError::Assertion(format!(
                        "expanded journal entry is {actual:?}, expected {entry:?}"
                    )));
                }
            }
            Step::AssertActiveNav { section } => {
                let expected = NavItem::from_key(section)
                    .ok_or_else(|| StepError::UnknownSection(section.clone()))?;
                let actual = self.page.active_nav(&self.rt);
                if actual != expected {
                    return Err(StepError::Assertion(format!(
                        "active nav item is {}, expected {}",
                        actual.key(),
                        expected.key()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(reduced: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.motion.reduced_motion = Some(reduced);
        config
    }

    #[test]
    fn test_unknown_element_fails_step() {
        let runner = Runner::new(&config(true), false).unwrap();
        let scenario = Scenario {
            name: None,
            steps: vec![Step::Click {
                element: "nope".into(),
            }],
        };
        let report = runner.run(&scenario);
        assert!(!report.passed);
        assert_eq!(report.failed_step, Some(0));
        assert_eq!(report.failed_kind.as_deref(), Some("click"));
    }

    #[test]
    fn test_wait_rounds_up_to_frames() {
        let runner = Runner::new(&config(false), false).unwrap();
        let scenario = Scenario {
            name: Some("wait".into()),
            steps: vec![Step::Wait { ms: 100 }],
        };
        let report = runner.run(&scenario);
        assert!(report.passed);
        assert_eq!(report.frames, 7);
        assert_eq!(report.elapsed_ms, 112.0);
    }
}
