use std::cell::RefCell;
use std::rc::{Rc, Weak};

use showcase_core::{
    in_page_anchor, smooth_scroll_target, update_nav, FadeSettings, NavEffect, NavMsg, NavState,
    NavView, ScrollSample, ScrollSettings, SectionSpan, ShowcaseSettings,
};
use showcase_logging::{showcase_debug, showcase_trace};

use crate::classes::{ACTIVE, STICKY, VISIBLE};
use crate::fade::observer_options;
use crate::surface::{
    DomEvent, EventKind, IntersectionEntry, NodeId, ObserverId, ScrollBehavior, Surface,
    SurfaceRef, Target,
};

/// Sticky navigation with section highlighting and smooth in-page links.
pub struct ScrollController {
    surface: Weak<dyn Surface>,
    nav: NodeId,
    spacer: NodeId,
    links: Vec<NodeId>,
    /// Resolved once at attach; missing sections stay `None`.
    sections: Vec<Option<NodeId>>,
    settings: ScrollSettings,
    state: RefCell<NavState>,
}

impl ScrollController {
    /// Wire the nav element: spacer, scroll/resize tracking, link clicks and
    /// a one-shot reveal. `section_ids[i]` is highlighted through the `i`-th
    /// link inside the nav.
    pub fn attach(
        surface: &SurfaceRef,
        nav: NodeId,
        section_ids: Vec<String>,
        settings: &ShowcaseSettings,
    ) -> Rc<Self> {
        let links = surface.query_within(nav, "a");
        let spacer = Self::insert_spacer(surface.as_ref(), nav, &settings.scroll.spacer_id);
        let sections = section_ids
            .iter()
            .map(|id| surface.element_by_id(id))
            .collect();

        let controller = Rc::new(Self {
            surface: Rc::downgrade(surface),
            nav,
            spacer,
            links,
            sections,
            settings: settings.scroll.clone(),
            state: RefCell::new(NavState::new(surface.offset_top(nav))),
        });

        // The surface's listeners own the controller; it only follows the
        // surface weakly.
        let owner = controller.clone();
        surface.listen(
            Target::Window,
            EventKind::Resize,
            Rc::new(move |_: &DomEvent| owner.on_resize()),
        );

        let owner = controller.clone();
        surface.listen(
            Target::Window,
            EventKind::Scroll,
            Rc::new(move |_: &DomEvent| owner.on_scroll()),
        );

        for link in &controller.links {
            let owner = controller.clone();
            let link = *link;
            surface.listen(
                Target::Node(link),
                EventKind::Click,
                Rc::new(move |event: &DomEvent| owner.on_link_click(link, event)),
            );
        }

        Self::reveal_once(surface, nav, &settings.fade);

        showcase_debug!(
            "sticky nav: attached with {} links, offset {}",
            controller.links.len(),
            controller.state.borrow().offset_top()
        );
        controller
    }

    pub fn view(&self) -> NavView {
        self.state.borrow().view()
    }

    pub fn spacer(&self) -> NodeId {
        self.spacer
    }

    fn insert_spacer(surface: &dyn Surface, nav: NodeId, spacer_id: &str) -> NodeId {
        let spacer = surface.create_element("div");
        surface.set_attribute(spacer, "id", spacer_id);
        surface.set_style(spacer, "display", "none");
        surface.set_style(spacer, "height", &px(surface.offset_height(nav)));
        surface.insert_after(nav, spacer);
        spacer
    }

    fn reveal_once(surface: &SurfaceRef, nav: NodeId, fade: &FadeSettings) {
        let weak = Rc::downgrade(surface);
        let observer = surface.create_intersection_observer(
            &observer_options(fade),
            Rc::new(move |observer: ObserverId, entries: &[IntersectionEntry]| {
                let Some(surface) = weak.upgrade() else {
                    return;
                };
                if entries.iter().any(|entry| entry.is_intersecting) {
                    surface.add_class(nav, VISIBLE);
                    surface.unobserve(observer, nav);
                }
            }),
        );
        surface.observe(observer, nav);
    }

    fn on_resize(&self) {
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        let msg = NavMsg::Resized {
            natural_offset: surface.offset_top(self.nav),
        };
        self.apply(surface.as_ref(), msg);
    }

    fn on_scroll(&self) {
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        let sample = self.sample(surface.as_ref());
        self.apply(surface.as_ref(), NavMsg::Scrolled(sample));
    }

    fn sample(&self, surface: &dyn Surface) -> ScrollSample {
        let scroll_y = surface.scroll_y();
        let sections = self
            .sections
            .iter()
            .map(|section| {
                section.map(|section| {
                    let top = surface.bounding_top(section) + scroll_y;
                    SectionSpan {
                        top,
                        bottom: top + surface.bounding_height(section),
                    }
                })
            })
            .collect();
        ScrollSample {
            scroll_y,
            natural_offset: surface.offset_top(self.nav),
            nav_height: surface.offset_height(self.nav),
            sections,
        }
    }

    fn apply(&self, surface: &dyn Surface, msg: NavMsg) {
        let effects = {
            let mut guard = self.state.borrow_mut();
            let state = std::mem::take(&mut *guard);
            let (state, effects) = update_nav(state, msg, &self.settings);
            *guard = state;
            effects
        };

        for effect in effects {
            showcase_trace!("sticky nav: {:?}", effect);
            match effect {
                NavEffect::Stick { spacer_height } => {
                    surface.add_class(self.nav, STICKY);
                    surface.set_style(self.spacer, "display", "block");
                    surface.set_style(self.spacer, "height", &px(spacer_height));
                }
                NavEffect::Unstick => {
                    surface.remove_class(self.nav, STICKY);
                    surface.set_style(self.spacer, "display", "none");
                }
                NavEffect::Highlight(index) => {
                    for link in &self.links {
                        surface.remove_class(*link, ACTIVE);
                    }
                    if let Some(link) = self.links.get(index) {
                        surface.add_class(*link, ACTIVE);
                    }
                }
            }
        }
    }

    fn on_link_click(&self, link: NodeId, event: &DomEvent) {
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        let Some(href) = surface.attribute(link, "href") else {
            return;
        };
        let Some(target_id) = in_page_anchor(&href) else {
            return;
        };
        event.prevent_default();

        let Some(section) = surface.element_by_id(target_id) else {
            return;
        };
        let top = smooth_scroll_target(
            surface.offset_top(section),
            surface.offset_height(self.nav),
            self.state.borrow().is_sticky(),
        );
        showcase_debug!("sticky nav: scrolling to #{} at {}", target_id, top);
        surface.scroll_to(top, ScrollBehavior::Smooth);
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}
