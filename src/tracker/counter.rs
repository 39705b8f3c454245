use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::viewport::{ElementId, ViewEffect};

pub const COUNTER_STEPS: u32 = 100;
pub const COUNTER_TICK: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCounter {
    pub id: ElementId,
    pub target: u32,
}

/// Counts a stat up to its goal, one step per tick, showing `N+`.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: ElementId,
    goal: u32,
    current: f64,
    increment: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: ElementId, goal: u32) -> Self {
        Self {
            target,
            goal,
            current: 0.0,
            increment: f64::from(goal) / f64::from(COUNTER_STEPS),
            done: false,
        }
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances one step; `None` once the goal has been shown.
    pub fn tick(&mut self) -> Option<ViewEffect> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        let shown = if self.current >= f64::from(self.goal) {
            self.done = true;
            self.goal
        } else {
            self.current.ceil() as u32
        };
        Some(ViewEffect::SetText {
            target: self.target.clone(),
            text: format!("{}+", shown),
        })
    }
}
