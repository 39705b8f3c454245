use std::time::Duration;
use tracing::warn;

use crate::validation::validate_nav_target;
use crate::viewport::{
    ElementId, IntersectionEntry, ObserverKind, ObserverOptions, RootMargin, ViewEffect, ViewPort,
};

pub const SECTION_THRESHOLD: f64 = 0.6;
// Biased toward the middle of the screen: fixed header on top, a little at the bottom
pub const SECTION_MARGIN: RootMargin = RootMargin {
    top: -80,
    right: 0,
    bottom: -50,
    left: 0,
};
pub const INITIAL_HASH_DELAY: Duration = Duration::from_millis(500);

/// Turns `"#about"` (or `"about"`) into a section id, if it is a safe one.
pub fn parse_nav_target(href: &str) -> Option<ElementId> {
    let id = href.strip_prefix('#').unwrap_or(href);
    validate_nav_target(id).then(|| ElementId::new(id))
}

// Keeps the nav item of the section in view marked active
#[derive(Debug, Clone)]
pub struct NavHighlighter {
    sections: Vec<ElementId>,
    links: Vec<ElementId>,
    options: ObserverOptions,
}

impl NavHighlighter {
    /// Links that do not point at an in-page section (external URLs,
    /// downloads) take no part in highlighting and are skipped.
    pub fn new(sections: Vec<ElementId>, hrefs: &[String]) -> Self {
        let links = hrefs
            .iter()
            .filter_map(|href| {
                let target = parse_nav_target(href);
                if target.is_none() {
                    warn!(href = %href, "nav link is not an in-page anchor, ignoring");
                }
                target
            })
            .collect();
        Self {
            sections,
            links,
            options: ObserverOptions::threshold(SECTION_THRESHOLD).with_margin(SECTION_MARGIN),
        }
    }

    pub fn sections(&self) -> &[ElementId] {
        &self.sections
    }

    pub fn arm(&self, viewport: &mut dyn ViewPort) {
        for section in &self.sections {
            viewport.observe(ObserverKind::Sections, section, &self.options);
        }
    }

    pub fn disconnect(&self, viewport: &mut dyn ViewPort) {
        for section in &self.sections {
            viewport.unobserve(ObserverKind::Sections, section);
        }
    }

    pub fn on_entries(&self, entries: &[IntersectionEntry]) -> Vec<ViewEffect> {
        let mut effects = Vec::new();
        for entry in entries.iter().filter(|e| e.qualifies(&self.options)) {
            if !self.sections.contains(&entry.target) {
                continue;
            }
            effects.push(ViewEffect::ClearActiveNav);
            if self.links.contains(&entry.target) {
                effects.push(ViewEffect::ActivateNav(entry.target.clone()));
            }
        }
        effects
    }

    /// Nav click: smooth scroll to the section and record it in the URL.
    pub fn navigate(&self, href: &str) -> Vec<ViewEffect> {
        match parse_nav_target(href) {
            Some(target) if self.sections.contains(&target) => vec![
                ViewEffect::ScrollTo {
                    target: target.clone(),
                    smooth: true,
                },
                ViewEffect::PushHash(target),
            ],
            _ => Vec::new(),
        }
    }

    // Page opened with "#section" in the URL; any id of a known section will do
    pub fn initial_hash(&self, hash: &str) -> Option<ViewEffect> {
        let id = hash.strip_prefix('#').unwrap_or(hash);
        if id.is_empty() {
            return None;
        }
        let target = ElementId::new(id);
        self.sections.contains(&target).then(|| {
            ViewEffect::delayed(
                INITIAL_HASH_DELAY,
                ViewEffect::ScrollTo {
                    target,
                    smooth: true,
                },
            )
        })
    }
}
