use std::rc::Rc;
use std::time::Duration;

use showcase_core::{stagger_delay, FadeCollection, FadeSettings};
use showcase_logging::showcase_debug;

use crate::classes::VISIBLE;
use crate::schedule::ScheduledTask;
use crate::surface::{IntersectionEntry, NodeId, ObserverId, ObserverOptions, SurfaceRef};

pub(crate) fn observer_options(fade: &FadeSettings) -> ObserverOptions {
    ObserverOptions {
        threshold: fade.threshold,
        root_margin: fade.root_margin.clone(),
    }
}

/// Reveal each target once, the first time it enters the viewport.
///
/// Entries arriving in the same batch are staggered by their position in the
/// batch. A revealed element is no longer watched.
pub fn observe_fade_ins(
    surface: &SurfaceRef,
    targets: &[NodeId],
    stagger: Duration,
    fade: &FadeSettings,
) -> Option<ObserverId> {
    if targets.is_empty() {
        return None;
    }

    let weak = Rc::downgrade(surface);
    let observer = surface.create_intersection_observer(
        &observer_options(fade),
        Rc::new(move |observer: ObserverId, entries: &[IntersectionEntry]| {
            let Some(surface) = weak.upgrade() else {
                return;
            };
            for (index, entry) in entries.iter().enumerate() {
                if !entry.is_intersecting {
                    continue;
                }
                let node = entry.node;
                let target = Rc::downgrade(&surface);
                ScheduledTask::schedule(&surface, stagger_delay(index, stagger), move || {
                    if let Some(surface) = target.upgrade() {
                        surface.add_class(node, VISIBLE);
                    }
                });
                surface.unobserve(observer, node);
            }
        }),
    );

    for target in targets {
        surface.observe(observer, *target);
    }
    Some(observer)
}

/// Every element matching the collection's selectors, in selector order then
/// document order. First-only selectors contribute a single element.
pub fn collection_targets(surface: &SurfaceRef, collection: &FadeCollection) -> Vec<NodeId> {
    let mut targets: Vec<NodeId> = Vec::new();
    for selector in &collection.selectors {
        let mut matches = surface.query_all(selector);
        if collection.takes_first_only(selector) {
            matches.truncate(1);
        }
        for node in matches {
            if !targets.contains(&node) {
                targets.push(node);
            }
        }
    }
    targets
}

/// Whether the page has an element that activates the collection.
pub fn collection_active(surface: &SurfaceRef, collection: &FadeCollection) -> bool {
    collection
        .gate_selectors()
        .iter()
        .any(|selector| !surface.query_all(selector).is_empty())
}

/// Watch one configured collection. Returns `None` when the page lacks the
/// elements that activate it.
pub fn observe_collection(
    surface: &SurfaceRef,
    collection: &FadeCollection,
    fade: &FadeSettings,
) -> Option<ObserverId> {
    if !collection_active(surface, collection) {
        return None;
    }
    let targets = collection_targets(surface, collection);
    let observer = observe_fade_ins(surface, &targets, collection.stagger(), fade)?;
    showcase_debug!(
        "fade-in: watching {} elements of {}",
        targets.len(),
        collection.name
    );
    Some(observer)
}
