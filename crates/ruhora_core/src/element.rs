//! Elements and their paintable visual state

use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Handle to an element in a [`Scene`](crate::Scene)
    pub struct ElementId;
}

/// Vertical placement of an element in document space (pixels from the top of the page)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> f32 {
        self.top + self.height * 0.5
    }
}

/// Resolved height of an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Height {
    /// Follows the natural content height (reflows with content)
    #[default]
    Auto,
    /// Fixed pixel height
    Px(f32),
}

impl Height {
    /// Pixel value, resolving `Auto` against the natural content height
    pub fn resolve(&self, natural: f32) -> f32 {
        match self {
            Height::Auto => natural,
            Height::Px(px) => *px,
        }
    }
}

/// Properties the browser would paint for an element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Vertical offset in pixels (positive = down)
    pub translate_y: f32,
    /// Uniform scale factor
    pub scale: f32,
    /// Shadow depth (0.0 = resting, 1.0 = fully lifted)
    pub elevation: f32,
    /// Box height
    pub height: Height,
    /// Whether the element takes part in layout at all
    pub display: bool,
}

impl VisualState {
    /// The final visible state every reveal animates toward
    pub const fn revealed() -> Self {
        Self {
            opacity: 1.0,
            translate_y: 0.0,
            scale: 1.0,
            elevation: 0.0,
            height: Height::Auto,
            display: true,
        }
    }

    /// Hidden pre-reveal state: transparent and pushed down by `offset` pixels
    pub fn concealed(offset: f32) -> Self {
        Self {
            opacity: 0.0,
            translate_y: offset,
            ..Self::revealed()
        }
    }

    /// Fully opaque with no vertical offset
    pub fn is_revealed(&self) -> bool {
        self.display && (self.opacity - 1.0).abs() < 1e-4 && self.translate_y.abs() < 1e-4
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::revealed()
    }
}

/// A node in the scene
#[derive(Clone, Debug)]
pub struct Element {
    /// Stable label used by diagnostics and scenario scripts
    pub label: String,
    pub rect: Rect,
    pub style: VisualState,
    /// Height of the content when unconstrained
    pub natural_height: f32,
    /// Reachable with Tab
    pub focusable: bool,
    pub parent: Option<ElementId>,
    pub(crate) children: SmallVec<[ElementId; 4]>,
}

impl Element {
    pub fn new(label: impl Into<String>, rect: Rect) -> Self {
        Self {
            label: label.into(),
            rect,
            style: VisualState::revealed(),
            natural_height: rect.height,
            focusable: false,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Rendered height, honouring `display` and a fixed height
    pub fn rendered_height(&self) -> f32 {
        if !self.style.display {
            return 0.0;
        }
        self.style.height.resolve(self.natural_height)
    }
}
