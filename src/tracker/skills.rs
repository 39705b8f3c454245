use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::viewport::{ElementId, ViewEffect};

// Delay between consecutive bars starting to grow
pub const SKILL_STAGGER_MS: u64 = 100;

// As described by the page: the width comes straight from a data attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBar {
    pub id: ElementId,
    pub width: String,
}

/// Parses a data-attribute width such as `"85"` or `"85%"`.
pub fn parse_width(raw: &str) -> Option<u8> {
    let value = raw.trim();
    let value = value.strip_suffix('%').unwrap_or(value).trim();
    value.parse::<u8>().ok().filter(|p| *p <= 100)
}

#[derive(Debug, Clone)]
pub struct SkillBars {
    bars: Vec<(ElementId, u8)>,
}

impl SkillBars {
    pub fn new(bars: &[SkillBar]) -> Result<Self, LayoutError> {
        let bars = bars
            .iter()
            .map(|bar| {
                parse_width(&bar.width)
                    .map(|pct| (bar.id.clone(), pct))
                    .ok_or_else(|| LayoutError::InvalidSkillWidth {
                        id: bar.id.to_string(),
                        value: bar.width.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bars })
    }

    // Every bar, staggered by its position
    pub fn effects(&self) -> Vec<ViewEffect> {
        self.bars
            .iter()
            .enumerate()
            .map(|(index, (id, percent))| ViewEffect::SetWidth {
                target: id.clone(),
                percent: *percent,
                delay_ms: index as u64 * SKILL_STAGGER_MS,
            })
            .collect()
    }
}
