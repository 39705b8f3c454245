use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::tracker::armed::ArmedObserver;
use crate::viewport::{ElementId, IntersectionEntry, ObserverKind, ObserverOptions, ViewEffect, ViewPort};

// An <img> whose real source waits in a placeholder attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyImage {
    pub id: ElementId,
    pub data_src: String,
}

// Swaps in each image's source the first time it shows up
#[derive(Debug, Clone)]
pub struct LazyImages {
    observer: ArmedObserver,
    sources: HashMap<ElementId, String>,
}

impl LazyImages {
    pub fn new(images: Vec<LazyImage>) -> Self {
        let mut observer = ArmedObserver::new(ObserverKind::Images, ObserverOptions::threshold(0.0));
        let mut sources = HashMap::with_capacity(images.len());
        for image in images {
            observer.add(image.id.clone());
            sources.insert(image.id, image.data_src);
        }
        Self { observer, sources }
    }

    pub fn observer(&self) -> &ArmedObserver {
        &self.observer
    }

    pub fn arm(&mut self, viewport: &mut dyn ViewPort) {
        self.observer.arm(viewport);
    }

    pub fn disconnect(&mut self, viewport: &mut dyn ViewPort) {
        self.observer.disconnect(viewport);
    }

    pub fn on_entries(&mut self, entries: &[IntersectionEntry], viewport: &mut dyn ViewPort) -> Vec<ViewEffect> {
        self.observer
            .fire(entries, viewport)
            .into_iter()
            .filter_map(|target| {
                let src = self.sources.get(&target)?.clone();
                Some(ViewEffect::SetSource { target, src })
            })
            .collect()
    }
}
