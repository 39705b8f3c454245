use serde::{Deserialize, Serialize};

use crate::viewport::{ElementId, ViewEffect};

pub const ALL_PROJECTS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: ElementId,
    #[serde(default)]
    pub categories: Vec<String>,
}

// Show/hide project cards by category
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    cards: Vec<ProjectCard>,
}

impl ProjectFilter {
    pub fn new(cards: Vec<ProjectCard>) -> Self {
        Self { cards }
    }

    /// One `SetVisible` per card. `"all"` shows everything.
    pub fn apply(&self, category: &str) -> Vec<ViewEffect> {
        let category = category.trim();
        self.cards
            .iter()
            .map(|card| ViewEffect::SetVisible {
                target: card.id.clone(),
                visible: category.eq_ignore_ascii_case(ALL_PROJECTS)
                    || card
                        .categories
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(category)),
            })
            .collect()
    }

    // Distinct categories in first-seen order, for building the buttons
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for c in self.cards.iter().flat_map(|card| card.categories.iter()) {
            if !seen.iter().any(|s| s.eq_ignore_ascii_case(c)) {
                seen.push(c.clone());
            }
        }
        seen
    }
}
