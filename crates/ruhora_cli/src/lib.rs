//! Ruhora CLI internals
//!
//! Configuration loading, scenario scripts and the headless runner behind
//! the `ruhora` binary.

pub mod config;
pub mod scenario;
pub mod runner;

pub use config::SiteConfig;
pub use runner::{Report, Runner, StepError};
pub use scenario::{Scenario, Step};
