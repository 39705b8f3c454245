//! View-state tracking: what happens when page regions scroll into view.
//!
//! Continuous watchers (nav highlight, reveal) react every time; one-shot
//! watchers (stat counters, skill bars, lazy images) go through an
//! [`ArmedObserver`] and act exactly once per page load.

pub mod armed;
pub mod counter;
pub mod images;
pub mod nav;
pub mod reveal;
pub mod skills;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::viewport::{
    ElementId, IntersectionEntry, ObserverKind, ObserverOptions, ViewEffect, ViewPort,
};

pub use armed::{ArmState, ArmedObserver};
pub use counter::{COUNTER_TICK, CounterAnimation, StatCounter};
pub use images::{LazyImage, LazyImages};
pub use nav::{NavHighlighter, parse_nav_target};
pub use reveal::RevealAnimator;
pub use skills::{SkillBar, SkillBars};

pub const STATS_THRESHOLD: f64 = 0.5;
pub const SKILLS_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsBlock {
    pub region: ElementId,
    pub counters: Vec<StatCounter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsBlock {
    pub region: ElementId,
    pub bars: Vec<SkillBar>,
}

/// The watched regions of the page, as the host finds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub sections: Vec<ElementId>,
    pub nav_links: Vec<String>,
    pub reveal: Vec<ElementId>,
    pub stats: Option<StatsBlock>,
    pub skills: Option<SkillsBlock>,
    pub images: Vec<LazyImage>,
}

struct StatsWatch {
    region: ElementId,
    observer: ArmedObserver,
    counters: Vec<StatCounter>,
}

struct SkillsWatch {
    observer: ArmedObserver,
    bars: SkillBars,
}

pub struct ViewStateTracker {
    nav: NavHighlighter,
    reveal: RevealAnimator,
    stats: Option<StatsWatch>,
    skills: Option<SkillsWatch>,
    images: LazyImages,
    running: Vec<CounterAnimation>,
}

impl ViewStateTracker {
    pub fn new(layout: PageLayout) -> Result<Self, LayoutError> {
        let nav = NavHighlighter::new(layout.sections, &layout.nav_links);

        let stats = layout.stats.map(|block| {
            let mut observer = ArmedObserver::new(ObserverKind::Stats, ObserverOptions::threshold(STATS_THRESHOLD));
            observer.add(block.region.clone());
            StatsWatch {
                region: block.region,
                observer,
                counters: block.counters,
            }
        });

        let skills = match layout.skills {
            Some(block) => {
                let bars = SkillBars::new(&block.bars)?;
                let mut observer =
                    ArmedObserver::new(ObserverKind::Skills, ObserverOptions::threshold(SKILLS_THRESHOLD));
                observer.add(block.region);
                Some(SkillsWatch { observer, bars })
            }
            None => None,
        };

        Ok(Self {
            nav,
            reveal: RevealAnimator::new(layout.reveal),
            stats,
            skills,
            images: LazyImages::new(layout.images),
            running: Vec::new(),
        })
    }

    /// Starts every watcher. Returns the initial concealment of reveal targets.
    pub fn arm(&mut self, viewport: &mut dyn ViewPort) -> Vec<ViewEffect> {
        self.nav.arm(viewport);
        let effects = self.reveal.arm(viewport);
        if let Some(stats) = self.stats.as_mut() {
            stats.observer.arm(viewport);
        }
        if let Some(skills) = self.skills.as_mut() {
            skills.observer.arm(viewport);
        }
        self.images.arm(viewport);
        effects
    }

    pub fn on_intersection(
        &mut self,
        kind: ObserverKind,
        entries: &[IntersectionEntry],
        viewport: &mut dyn ViewPort,
    ) -> Vec<ViewEffect> {
        match kind {
            ObserverKind::Sections => self.nav.on_entries(entries),
            ObserverKind::Reveal => self.reveal.on_entries(entries),
            ObserverKind::Stats => {
                let Some(stats) = self.stats.as_mut() else {
                    return Vec::new();
                };
                if stats.observer.fire(entries, viewport).is_empty() {
                    return Vec::new();
                }
                self.running.extend(
                    stats
                        .counters
                        .iter()
                        .map(|c| CounterAnimation::new(c.id.clone(), c.target)),
                );
                // First frame right away, the rest on the host's timer
                self.tick()
            }
            ObserverKind::Skills => {
                let Some(skills) = self.skills.as_mut() else {
                    return Vec::new();
                };
                if skills.observer.fire(entries, viewport).is_empty() {
                    return Vec::new();
                }
                skills.bars.effects()
            }
            ObserverKind::Images => self.images.on_entries(entries, viewport),
        }
    }

    /// For hosts without push notifications: reads the ratio of every watched
    /// target and feeds the result through the same handlers.
    pub fn poll(&mut self, viewport: &mut dyn ViewPort) -> Vec<ViewEffect> {
        let mut batches: Vec<(ObserverKind, Vec<ElementId>)> = vec![
            (ObserverKind::Sections, self.nav.sections().to_vec()),
            (ObserverKind::Reveal, self.reveal.targets().to_vec()),
            (ObserverKind::Images, self.images.observer().armed().cloned().collect()),
        ];
        if let Some(stats) = &self.stats {
            batches.push((ObserverKind::Stats, stats.observer.armed().cloned().collect()));
        }
        if let Some(skills) = &self.skills {
            batches.push((ObserverKind::Skills, skills.observer.armed().cloned().collect()));
        }

        let mut effects = Vec::new();
        for (kind, targets) in batches {
            let entries: Vec<IntersectionEntry> = targets
                .into_iter()
                .filter_map(|t| {
                    let ratio = viewport.intersection_ratio(&t)?;
                    Some(IntersectionEntry::new(t, ratio))
                })
                .collect();
            if !entries.is_empty() {
                effects.extend(self.on_intersection(kind, &entries, viewport));
            }
        }
        effects
    }

    /// Advances running counters by one step (call every [`COUNTER_TICK`]).
    pub fn tick(&mut self) -> Vec<ViewEffect> {
        let effects = self.running.iter_mut().filter_map(|c| c.tick()).collect();
        self.running.retain(|c| !c.is_done());
        effects
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    pub fn navigate(&self, href: &str) -> Vec<ViewEffect> {
        self.nav.navigate(href)
    }

    pub fn initial_hash(&self, hash: &str) -> Option<ViewEffect> {
        self.nav.initial_hash(hash)
    }

    // Page unload
    pub fn disconnect(&mut self, viewport: &mut dyn ViewPort) {
        self.nav.disconnect(viewport);
        self.reveal.disconnect(viewport);
        if let Some(stats) = self.stats.as_mut() {
            stats.observer.disconnect(viewport);
        }
        if let Some(skills) = self.skills.as_mut() {
            skills.observer.disconnect(viewport);
        }
        self.images.disconnect(viewport);
        self.running.clear();
    }

    pub fn stats_state(&self) -> Option<ArmState> {
        let stats = self.stats.as_ref()?;
        stats.observer.state(&stats.region)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeViewPort;
    use super::*;
    use crate::viewport::RootMargin;

    fn layout() -> PageLayout {
        PageLayout {
            sections: vec!["home".into(), "skills".into(), "contact".into()],
            nav_links: vec!["#home".into(), "#skills".into(), "#contact".into()],
            reveal: vec!["card-1".into(), "card-2".into()],
            stats: Some(StatsBlock {
                region: "stats".into(),
                counters: vec![
                    StatCounter { id: "years".into(), target: 5 },
                    StatCounter { id: "projects".into(), target: 50 },
                ],
            }),
            skills: Some(SkillsBlock {
                region: "skill-list".into(),
                bars: vec![
                    SkillBar { id: "rust".into(), width: "90%".into() },
                    SkillBar { id: "sql".into(), width: "75%".into() },
                ],
            }),
            images: vec![LazyImage {
                id: "hero".into(),
                data_src: "/img/hero.webp".into(),
            }],
        }
    }

    fn armed() -> (ViewStateTracker, FakeViewPort, Vec<ViewEffect>) {
        let mut vp = FakeViewPort::default();
        let mut tracker = ViewStateTracker::new(layout()).unwrap();
        let effects = tracker.arm(&mut vp);
        (tracker, vp, effects)
    }

    #[test]
    fn arm_observes_everything_and_conceals_cards() {
        let (tracker, vp, effects) = armed();
        assert_eq!(
            effects,
            vec![ViewEffect::Conceal("card-1".into()), ViewEffect::Conceal("card-2".into())]
        );
        // 3 sections + 2 cards + stats + skills + 1 image
        assert_eq!(vp.observed.len(), 8);
        assert_eq!(tracker.stats_state(), Some(ArmState::Armed));
    }

    #[test]
    fn only_sections_shrink_the_viewport() {
        let (_, vp, _) = armed();
        let sections = vp.options[&ObserverKind::Sections];
        assert_eq!(sections.root_margin, nav::SECTION_MARGIN);
        assert_eq!(sections.root_margin.top, -80);
        assert_eq!(sections.root_margin.bottom, -50);
        for kind in [
            ObserverKind::Reveal,
            ObserverKind::Stats,
            ObserverKind::Skills,
            ObserverKind::Images,
        ] {
            assert_eq!(vp.options[&kind].root_margin, RootMargin::default(), "{:?}", kind);
        }
    }

    #[test]
    fn external_nav_link_keeps_tracker_running() {
        let mut layout = layout();
        layout.nav_links.push("/resume.pdf".into());
        layout.nav_links.push("https://github.com/someone".into());

        let mut vp = FakeViewPort::default();
        let mut tracker = ViewStateTracker::new(layout).unwrap();
        tracker.arm(&mut vp);
        assert!(vp.is_observing(ObserverKind::Images, &"hero".into()));

        let effects = tracker.on_intersection(
            ObserverKind::Images,
            &[IntersectionEntry::new("hero", 0.2)],
            &mut vp,
        );
        assert_eq!(
            effects,
            vec![ViewEffect::SetSource { target: "hero".into(), src: "/img/hero.webp".into() }]
        );
    }

    #[test]
    fn stats_fire_once_and_count_up() {
        let (mut tracker, mut vp, _) = armed();
        let entries = [IntersectionEntry::new("stats", 0.7)];

        let first = tracker.on_intersection(ObserverKind::Stats, &entries, &mut vp);
        assert_eq!(first.len(), 2);
        assert!(tracker.is_animating());
        assert!(!vp.is_observing(ObserverKind::Stats, &"stats".into()));
        assert_eq!(tracker.stats_state(), Some(ArmState::Fired));

        // Scrolled past and back: nothing restarts
        assert!(tracker.on_intersection(ObserverKind::Stats, &entries, &mut vp).is_empty());

        let mut last_projects = None;
        let mut ticks = 0;
        while tracker.is_animating() {
            for effect in tracker.tick() {
                if let ViewEffect::SetText { target, text } = effect {
                    if target.as_str() == "projects" {
                        last_projects = Some(text);
                    }
                }
            }
            ticks += 1;
            assert!(ticks < 1_000);
        }
        assert_eq!(last_projects.as_deref(), Some("50+"));
        assert!(tracker.tick().is_empty());
    }

    #[test]
    fn stats_below_threshold_do_not_fire() {
        let (mut tracker, mut vp, _) = armed();
        let effects =
            tracker.on_intersection(ObserverKind::Stats, &[IntersectionEntry::new("stats", 0.4)], &mut vp);
        assert!(effects.is_empty());
        assert!(!tracker.is_animating());
        assert_eq!(tracker.stats_state(), Some(ArmState::Armed));
    }

    #[test]
    fn skills_fire_once() {
        let (mut tracker, mut vp, _) = armed();
        let entries = [IntersectionEntry::new("skill-list", 0.3)];
        let effects = tracker.on_intersection(ObserverKind::Skills, &entries, &mut vp);
        assert_eq!(
            effects,
            vec![
                ViewEffect::SetWidth { target: "rust".into(), percent: 90, delay_ms: 0 },
                ViewEffect::SetWidth { target: "sql".into(), percent: 75, delay_ms: 100 },
            ]
        );
        assert!(tracker.on_intersection(ObserverKind::Skills, &entries, &mut vp).is_empty());
    }

    #[test]
    fn reveal_repeats_on_reentry() {
        let (mut tracker, mut vp, _) = armed();
        let entries = [IntersectionEntry::new("card-2", 0.15)];
        let once = tracker.on_intersection(ObserverKind::Reveal, &entries, &mut vp);
        let twice = tracker.on_intersection(ObserverKind::Reveal, &entries, &mut vp);
        assert_eq!(once, vec![ViewEffect::Reveal("card-2".into())]);
        assert_eq!(once, twice);
        assert!(vp.is_observing(ObserverKind::Reveal, &"card-2".into()));
    }

    #[test]
    fn poll_uses_viewport_ratios() {
        let (mut tracker, mut vp, _) = armed();
        vp.ratios.insert("hero".into(), 0.05);
        vp.ratios.insert("skills".into(), 0.9);
        vp.ratios.insert("home".into(), 0.1);

        let effects = tracker.poll(&mut vp);
        assert!(effects.contains(&ViewEffect::ActivateNav("skills".into())));
        assert!(!effects.contains(&ViewEffect::ActivateNav("home".into())));
        assert!(effects.contains(&ViewEffect::SetSource {
            target: "hero".into(),
            src: "/img/hero.webp".into()
        }));

        // The image is done; a second poll only re-highlights the nav
        let again = tracker.poll(&mut vp);
        assert!(!again.iter().any(|e| matches!(e, ViewEffect::SetSource { .. })));
    }

    #[test]
    fn disconnect_stops_everything() {
        let (mut tracker, mut vp, _) = armed();
        tracker.on_intersection(ObserverKind::Stats, &[IntersectionEntry::new("stats", 1.0)], &mut vp);
        tracker.disconnect(&mut vp);
        assert!(vp.observed.is_empty());
        assert!(!tracker.is_animating());
    }

    #[test]
    fn layout_deserializes_with_defaults() {
        let layout: PageLayout = serde_json::from_str(
            r##"{"sections":["home"],"nav_links":["#home"],"skills":{"region":"s","bars":[{"id":"rust","width":"80%"}]}}"##,
        )
        .unwrap();
        assert!(layout.reveal.is_empty());
        assert!(layout.stats.is_none());
        assert!(ViewStateTracker::new(layout).is_ok());
    }
}
