use tracing::debug;

use crate::viewport::{ElementId, IntersectionEntry, ObserverKind, ObserverOptions, ViewPort};

/// Lifecycle of one watched target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmState {
    Unarmed,
    Armed,
    Fired,
}

/// A visibility watcher whose targets each fire at most once.
///
/// `Unarmed -> Armed` happens in [`arm`](Self::arm) (the target is observed),
/// `Armed -> Fired` on the first qualifying entry (the target is unobserved).
/// `Fired` is terminal: later entries for that target are ignored.
#[derive(Debug, Clone)]
pub struct ArmedObserver {
    kind: ObserverKind,
    options: ObserverOptions,
    targets: Vec<(ElementId, ArmState)>,
}

impl ArmedObserver {
    pub fn new(kind: ObserverKind, options: ObserverOptions) -> Self {
        Self {
            kind,
            options,
            targets: Vec::new(),
        }
    }

    // Duplicates are ignored
    pub fn add(&mut self, target: ElementId) {
        if self.state(&target).is_none() {
            self.targets.push((target, ArmState::Unarmed));
        }
    }

    pub fn arm(&mut self, viewport: &mut dyn ViewPort) {
        for (target, state) in self.targets.iter_mut() {
            if *state == ArmState::Unarmed {
                viewport.observe(self.kind, target, &self.options);
                *state = ArmState::Armed;
            }
        }
    }

    /// Fires every armed target with a qualifying entry and returns them in
    /// entry order.
    pub fn fire(
        &mut self,
        entries: &[IntersectionEntry],
        viewport: &mut dyn ViewPort,
    ) -> Vec<ElementId> {
        let mut fired = Vec::new();
        for entry in entries.iter().filter(|e| e.qualifies(&self.options)) {
            let Some((target, state)) = self.targets.iter_mut().find(|(t, _)| *t == entry.target)
            else {
                continue;
            };
            if *state != ArmState::Armed {
                continue;
            }
            viewport.unobserve(self.kind, target);
            *state = ArmState::Fired;
            debug!(observer = ?self.kind, target = %target, "one-shot observer fired");
            fired.push(target.clone());
        }
        fired
    }

    // Targets still being watched
    pub fn armed(&self) -> impl Iterator<Item = &ElementId> {
        self.targets
            .iter()
            .filter(|(_, s)| *s == ArmState::Armed)
            .map(|(t, _)| t)
    }

    pub fn state(&self, target: &ElementId) -> Option<ArmState> {
        self.targets
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, s)| *s)
    }

    pub fn is_spent(&self) -> bool {
        self.targets.iter().all(|(_, s)| *s == ArmState::Fired)
    }

    /// Stops watching everything still armed. Fired targets stay fired.
    pub fn disconnect(&mut self, viewport: &mut dyn ViewPort) {
        for (target, state) in self.targets.iter_mut() {
            if *state == ArmState::Armed {
                viewport.unobserve(self.kind, target);
                *state = ArmState::Unarmed;
            }
        }
    }
}
