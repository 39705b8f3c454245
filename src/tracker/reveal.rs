use crate::viewport::{ElementId, IntersectionEntry, ObserverKind, ObserverOptions, ViewEffect, ViewPort};

pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Cards that start hidden and slide in when scrolled to.
///
/// Targets stay observed, so scrolling back in reveals again; revealing an
/// already revealed element changes nothing.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    targets: Vec<ElementId>,
    options: ObserverOptions,
}

impl RevealAnimator {
    pub fn new(targets: Vec<ElementId>) -> Self {
        Self {
            targets,
            options: ObserverOptions::threshold(REVEAL_THRESHOLD),
        }
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    // Hide everything, then start watching
    pub fn arm(&self, viewport: &mut dyn ViewPort) -> Vec<ViewEffect> {
        self.targets
            .iter()
            .map(|target| {
                viewport.observe(ObserverKind::Reveal, target, &self.options);
                ViewEffect::Conceal(target.clone())
            })
            .collect()
    }

    pub fn disconnect(&self, viewport: &mut dyn ViewPort) {
        for target in &self.targets {
            viewport.unobserve(ObserverKind::Reveal, target);
        }
    }

    pub fn on_entries(&self, entries: &[IntersectionEntry]) -> Vec<ViewEffect> {
        entries
            .iter()
            .filter(|e| e.qualifies(&self.options) && self.targets.contains(&e.target))
            .map(|e| ViewEffect::Reveal(e.target.clone()))
            .collect()
    }
}
