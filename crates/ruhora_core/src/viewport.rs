//! Viewport geometry and media queries

/// Minimum width treated as a desktop layout
pub const DESKTOP_MIN_WIDTH: f32 = 1024.0;

/// Minimum width treated as a tablet layout
pub const TABLET_MIN_WIDTH: f32 = 768.0;

/// The visible window onto the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Distance scrolled from the top of the document
    pub scroll_y: f32,
    /// Total document height (bounds `scroll_y`)
    pub document_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            document_height: height,
        }
    }

    /// Largest reachable scroll position
    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.height).max(0.0)
    }

    /// Clamp a scroll position to the document
    pub fn clamp_scroll(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_scroll())
    }

    /// Document-space y of a line `fraction` down the viewport
    pub fn line_at(&self, fraction: f32) -> f32 {
        self.scroll_y + self.height * fraction
    }

    pub fn is_desktop(&self) -> bool {
        MediaQuery::MinWidth(DESKTOP_MIN_WIDTH).matches(self)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1440.0, 900.0)
    }
}

/// Width-based media query
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaQuery {
    /// `(min-width: N)`
    MinWidth(f32),
    /// `(max-width: N)`
    MaxWidth(f32),
}

impl MediaQuery {
    /// Desktop-only query used for parallax and hover enhancements
    pub const fn desktop() -> Self {
        MediaQuery::MinWidth(DESKTOP_MIN_WIDTH)
    }

    pub fn matches(&self, viewport: &Viewport) -> bool {
        match self {
            MediaQuery::MinWidth(w) => viewport.width >= *w,
            MediaQuery::MaxWidth(w) => viewport.width <= *w,
        }
    }
}
