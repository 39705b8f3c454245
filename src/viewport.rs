//! The tracker's window onto the page.
//!
//! `ViewPort` is the only way the tracker touches the host: it asks for
//! targets to be watched or unwatched and may poll intersection ratios.
//! Everything the tracker wants changed on screen comes back as
//! [`ViewEffect`] values for the host to apply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// One visibility watcher per kind of region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    Sections,
    Reveal,
    Stats,
    Skills,
    Images,
}

/// Margins (px) applied to the viewport before intersecting; negative
/// values shrink it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootMargin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: RootMargin::default(),
        }
    }

    pub fn with_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: impl Into<ElementId>, ratio: f64) -> Self {
        Self {
            target: target.into(),
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    pub fn qualifies(&self, options: &ObserverOptions) -> bool {
        self.is_intersecting && self.ratio >= options.threshold
    }
}

pub trait ViewPort {
    fn observe(&mut self, observer: ObserverKind, target: &ElementId, options: &ObserverOptions);

    fn unobserve(&mut self, observer: ObserverKind, target: &ElementId);

    /// Current visible fraction of `target`, `None` when it is not laid out.
    fn intersection_ratio(&self, target: &ElementId) -> Option<f64>;
}

// Presentation changes requested by the tracker and the page
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    ClearActiveNav,
    ActivateNav(ElementId),
    Conceal(ElementId),
    Reveal(ElementId),
    SetText { target: ElementId, text: String },
    SetWidth { target: ElementId, percent: u8, delay_ms: u64 },
    SetSource { target: ElementId, src: String },
    SetVisible { target: ElementId, visible: bool },
    ScrollTo { target: ElementId, smooth: bool },
    PushHash(ElementId),
    ApplyTheme(Theme),
    MarkLoaded,
    Delayed { after: Duration, effect: Box<ViewEffect> },
}

impl ViewEffect {
    pub fn delayed(after: Duration, effect: ViewEffect) -> Self {
        Self::Delayed {
            after,
            effect: Box::new(effect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_must_reach_threshold() {
        let opts = ObserverOptions::threshold(0.5);
        assert!(!IntersectionEntry::new("a", 0.49).qualifies(&opts));
        assert!(IntersectionEntry::new("a", 0.5).qualifies(&opts));
    }

    #[test]
    fn zero_threshold_still_needs_intersection() {
        let opts = ObserverOptions::threshold(0.0);
        assert!(!IntersectionEntry::new("a", 0.0).qualifies(&opts));
        let touching = IntersectionEntry {
            target: "a".into(),
            is_intersecting: true,
            ratio: 0.0,
        };
        assert!(touching.qualifies(&opts));
    }
}
