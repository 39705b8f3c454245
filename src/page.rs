use std::time::Duration;
use tracing::{error, info};

use crate::theme::{KeyValueStore, ThemeStore};
use crate::tracker::{PageLayout, ViewStateTracker};
use crate::viewport::{ViewEffect, ViewPort};

// Fade-in delay after a normal start
pub const LOADED_DELAY: Duration = Duration::from_millis(100);

pub struct Boot<S: KeyValueStore> {
    pub tracker: Option<ViewStateTracker>,
    pub themes: ThemeStore<S>,
    pub effects: Vec<ViewEffect>,
}

/// Starts the page. Decorative setup may fail; the content is revealed
/// either way.
pub fn boot<S: KeyValueStore>(
    layout: PageLayout,
    viewport: &mut dyn ViewPort,
    store: S,
    location_hash: &str,
) -> Boot<S> {
    let themes = ThemeStore::load(store);
    let mut effects = vec![themes.effect()];

    match ViewStateTracker::new(layout) {
        Ok(mut tracker) => {
            effects.extend(tracker.arm(viewport));
            effects.extend(tracker.initial_hash(location_hash));
            effects.push(ViewEffect::delayed(LOADED_DELAY, ViewEffect::MarkLoaded));
            info!("page initialized");
            Boot {
                tracker: Some(tracker),
                themes,
                effects,
            }
        }
        Err(e) => {
            error!("Initialization error: {}", e);
            effects.push(ViewEffect::MarkLoaded);
            Boot {
                tracker: None,
                themes,
                effects,
            }
        }
    }
}
