use std::rc::Rc;
use std::sync::Once;

use pretty_assertions::assert_eq;
use showcase_core::{NavView, ShowcaseSettings};
use showcase_engine::classes::{ACTIVE, STICKY, VISIBLE};
use showcase_engine::fake::{FakeSurface, ScrollRequest};
use showcase_engine::{NodeId, ScrollBehavior, ScrollController, Surface, SurfaceRef};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(showcase_logging::initialize_for_tests);
}

struct Page {
    fake: Rc<FakeSurface>,
    nav: NodeId,
    links: Vec<NodeId>,
    external: NodeId,
    controller: Rc<ScrollController>,
}

/// Nav at 300px (60px tall) above three 600px sections starting at 800px.
fn page() -> Page {
    let fake = FakeSurface::shared();
    let header = fake.add_element(None, "header", None);
    let nav = fake.add_element(None, "nav", Some("sticky-nav"));
    fake.add_element(None, "main", None);
    fake.set_geometry(header, 0.0, 300.0);
    fake.set_geometry(nav, 300.0, 60.0);

    let mut links = Vec::new();
    for (index, id) in ["products", "automations", "web-design"].into_iter().enumerate() {
        let link = fake.add_element(Some(nav), "a", None);
        fake.set_attribute(link, "href", &format!("#{id}"));
        links.push(link);
        let section = fake.add_element(None, "section", Some(id));
        fake.set_geometry(section, 800.0 + 600.0 * index as f64, 600.0);
    }
    let external = fake.add_element(Some(nav), "a", None);
    fake.set_attribute(external, "href", "https://journal.example/");

    let surface: SurfaceRef = fake.clone();
    let settings = ShowcaseSettings::default();
    let controller = ScrollController::attach(
        &surface,
        nav,
        settings.scroll.section_ids.clone(),
        &settings,
    );
    Page {
        fake,
        nav,
        links,
        external,
        controller,
    }
}

impl Page {
    fn active_links(&self) -> Vec<usize> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| self.fake.has_class(**link, ACTIVE))
            .map(|(index, _)| index)
            .collect()
    }
}

#[test]
fn spacer_is_inserted_after_the_nav_and_hidden() {
    init_logging();
    let page = page();
    let spacer = page.controller.spacer();

    let body = page.fake.children(page.fake.body());
    let nav_at = body.iter().position(|node| *node == page.nav).expect("nav");
    assert_eq!(body.get(nav_at + 1), Some(&spacer));
    assert_eq!(page.fake.attribute(spacer, "id").as_deref(), Some("nav-spacer"));
    assert_eq!(page.fake.style(spacer, "display").as_deref(), Some("none"));
    assert_eq!(page.fake.style(spacer, "height").as_deref(), Some("60px"));
    assert_eq!(page.controller.view(), NavView::default());
}

#[test]
fn nav_sticks_at_its_offset_and_releases_above_it() {
    init_logging();
    let page = page();
    let spacer = page.controller.spacer();

    page.fake.user_scroll(299.0);
    assert!(!page.fake.has_class(page.nav, STICKY));

    page.fake.user_scroll(300.0);
    assert!(page.fake.has_class(page.nav, STICKY));
    assert_eq!(page.fake.style(spacer, "display").as_deref(), Some("block"));
    assert_eq!(page.fake.style(spacer, "height").as_deref(), Some("60px"));
    assert!(page.controller.view().sticky);

    page.fake.user_scroll(120.0);
    assert!(!page.fake.has_class(page.nav, STICKY));
    assert_eq!(page.fake.style(spacer, "display").as_deref(), Some("none"));
    assert!(!page.controller.view().spacer_visible);
}

#[test]
fn highlight_follows_the_section_under_the_nav() {
    init_logging();
    let page = page();

    page.fake.user_scroll(600.0);
    assert!(page.active_links().is_empty());

    // Sticky: a section counts once its top is within 160px of the viewport top.
    page.fake.user_scroll(640.0);
    assert_eq!(page.active_links(), vec![0]);

    page.fake.user_scroll(1240.0);
    assert_eq!(page.active_links(), vec![1]);

    page.fake.user_scroll(1900.0);
    assert_eq!(page.active_links(), vec![2]);
    assert_eq!(page.controller.view().active_section, Some(2));
}

#[test]
fn highlight_is_kept_when_no_section_matches() {
    init_logging();
    let page = page();
    page.fake.user_scroll(700.0);
    assert_eq!(page.active_links(), vec![0]);

    page.fake.user_scroll(350.0);
    assert_eq!(page.active_links(), vec![0]);

    page.fake.user_scroll(5000.0);
    assert_eq!(page.active_links(), vec![0]);
}

#[test]
fn scrolling_reuses_the_sections_resolved_at_attach() {
    init_logging();
    let page = page();
    let lookups = page.fake.id_lookups();

    for y in [640.0, 1240.0, 1900.0, 350.0] {
        page.fake.user_scroll(y);
    }
    assert_eq!(page.fake.id_lookups(), lookups);
    assert_eq!(page.active_links(), vec![2]);
}

#[test]
fn in_page_link_scrolls_smoothly_below_the_nav() {
    init_logging();
    let page = page();

    let event = page.fake.click(page.links[1]);

    assert!(event.is_default_prevented());
    assert_eq!(
        page.fake.scroll_requests(),
        vec![ScrollRequest {
            top: 1340.0,
            behavior: ScrollBehavior::Smooth,
        }]
    );

    page.fake.user_scroll(400.0);
    page.fake.click(page.links[0]);
    assert_eq!(
        page.fake.scroll_requests().last().map(|request| request.top),
        Some(740.0)
    );
}

#[test]
fn external_link_keeps_its_default_action() {
    init_logging();
    let page = page();

    let event = page.fake.click(page.external);

    assert!(!event.is_default_prevented());
    assert!(page.fake.scroll_requests().is_empty());
}

#[test]
fn link_to_a_missing_section_only_cancels_navigation() {
    init_logging();
    let page = page();
    page.fake.set_attribute(page.links[2], "href", "#retired");

    let event = page.fake.click(page.links[2]);

    assert!(event.is_default_prevented());
    assert!(page.fake.scroll_requests().is_empty());
}

#[test]
fn resize_refreshes_the_sticky_boundary() {
    init_logging();
    let page = page();
    page.fake.user_scroll(320.0);
    assert!(page.fake.has_class(page.nav, STICKY));

    page.fake.set_geometry(page.nav, 500.0, 60.0);
    page.fake.resize_viewport(1024.0);
    page.fake.user_scroll(450.0);

    assert!(!page.fake.has_class(page.nav, STICKY));
}

#[test]
fn sticky_boundary_is_frozen_while_pinned() {
    init_logging();
    let page = page();
    page.fake.user_scroll(320.0);

    page.fake.set_geometry(page.nav, 500.0, 60.0);
    page.fake.user_scroll(450.0);

    assert!(page.fake.has_class(page.nav, STICKY));
}

#[test]
fn nav_fades_in_once_it_enters_the_viewport() {
    init_logging();
    let page = page();
    assert!(page.fake.is_observed(page.nav));

    page.fake.intersect(&[page.nav]);

    assert!(page.fake.has_class(page.nav, VISIBLE));
    assert!(!page.fake.is_observed(page.nav));
}
