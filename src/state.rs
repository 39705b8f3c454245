use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::clock::SystemClock;
use crate::gatekeeper::Gatekeeper;
use crate::metrics::TRACKED_CLIENTS;
use crate::rate_limit::RateLimits;
use crate::submit::Submitter;

// app's shared state
pub struct AppState {
    pub gatekeepers: DashMap<String, Gatekeeper<SystemClock>>, // client key -> its own window
    pub limits: RateLimits,
    pub delivery: Arc<dyn Submitter>,
}

impl AppState {
    pub fn new(limits: RateLimits, delivery: Arc<dyn Submitter>) -> Self {
        Self {
            gatekeepers: DashMap::new(),
            limits,
            delivery,
        }
    }

    // Drop clients whose window has passed; returns how many went
    pub fn prune_idle(&self) -> usize {
        let before = self.gatekeepers.len();
        self.gatekeepers.retain(|_, gate| !gate.is_idle());
        TRACKED_CLIENTS.set(self.gatekeepers.len() as f64);
        before.saturating_sub(self.gatekeepers.len())
    }
}

// Janitor - runs every `every`
pub async fn janitor(state: Arc<AppState>, every: Duration) {
    let mut interval = interval(every);

    info!("Janitor started (interval: {:?})", every);

    loop {
        interval.tick().await;
        let removed = state.prune_idle();
        if removed > 0 {
            debug!(removed, "dropped idle clients");
        }
    }
}
