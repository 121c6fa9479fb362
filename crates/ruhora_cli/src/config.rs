//! Ruhora configuration file handling

use anyhow::{Context, Result};
use ruhora_animation::MotionRuntime;
use ruhora_core::{platform, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up inside a config directory
pub const CONFIG_FILE: &str = "ruhora.toml";

/// Top-level configuration (ruhora.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Simulated browser window
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1440.0
}

fn default_height() -> f32 {
    900.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Forced reduced-motion preference; the host preference when absent
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    /// Simulated frame length
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f32,
}

fn default_frame_ms() -> f32 {
    16.0
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: None,
            frame_ms: default_frame_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a directory (looks for ruhora.toml) or a file
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!("No {} found in {}", CONFIG_FILE, path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the current directory,
    /// falling back to defaults when no file exists there
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_dir(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load_from_dir(Path::new(".")),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            anyhow::bail!(
                "Viewport must be positive, got {}x{}",
                self.viewport.width,
                self.viewport.height
            );
        }
        if self.motion.frame_ms <= 0.0 {
            anyhow::bail!("frame_ms must be positive, got {}", self.motion.frame_ms);
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    /// Effective reduced-motion preference: the override, then the config,
    /// then the host
    pub fn reduced_motion(&self, force: bool) -> bool {
        force
            || self
                .motion
                .reduced_motion
                .unwrap_or_else(platform::detect_reduced_motion)
    }

    /// A fresh runtime for this configuration
    pub fn runtime(&self, force_reduced_motion: bool) -> MotionRuntime {
        match (force_reduced_motion, self.motion.reduced_motion) {
            (true, _) => MotionRuntime::new(self.viewport(), true),
            (false, Some(reduced)) => MotionRuntime::new(self.viewport(), reduced),
            (false, None) => MotionRuntime::with_host_preference(self.viewport()),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: SiteConfig = toml::from_str("[motion]\nreduced_motion = true\n").unwrap();
        assert_eq!(config.viewport, ViewportConfig::default());
        assert_eq!(config.motion.reduced_motion, Some(true));
        assert_eq!(config.motion.frame_ms, 16.0);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_forced_reduced_motion_wins() {
        let mut config = SiteConfig::default();
        config.motion.reduced_motion = Some(false);
        assert!(config.reduced_motion(true));
        assert!(!config.reduced_motion(false));
    }

    #[test]
    fn test_round_trip() {
        let mut config = SiteConfig::default();
        config.viewport.width = 390.0;
        let text = config.to_toml().unwrap();
        let parsed: SiteConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
