//! Per-element start offsets for groups that reveal one after another

/// Order in which a group is staggered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
}

/// Fixed delay between consecutive members of a group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stagger {
    /// Delay between each member's start (ms)
    pub each_ms: u32,
    pub direction: StaggerDirection,
}

impl Stagger {
    pub const fn new(each_ms: u32) -> Self {
        Self {
            each_ms,
            direction: StaggerDirection::Forward,
        }
    }

    pub const fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Start offset for the member at `index` in a group of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
        };
        self.each_ms * effective_index as u32
    }

    /// Offset of the last member to start
    pub fn span(&self, total: usize) -> u32 {
        self.each_ms * total.saturating_sub(1) as u32
    }
}
