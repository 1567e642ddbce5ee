use std::rc::Rc;

use showcase_core::{
    initial_scroll, is_direct_load, parse_project_list, InitialScroll, ShowcaseSettings,
};
use showcase_logging::{showcase_debug, showcase_info, showcase_warn};

use crate::classes::{
    DEFAULT_PROJECTS_TARGET, NAV_ANCHOR_ID, PROJECTS_SCRIPT_ID, SETTINGS_SCRIPT_ID,
};
use crate::embed::{ContainerTarget, EmbedBuilder};
use crate::fade::observe_collection;
use crate::intro::{intro_present, run_intro};
use crate::responsive::init_responsive;
use crate::schedule::ScheduledTask;
use crate::scroll::ScrollController;
use crate::surface::{NodeId, ObserverId, ScrollBehavior, Surface, SurfaceRef};

/// What the page-load entry point activated.
pub struct Page {
    pub initial_scroll: Option<InitialScroll>,
    pub intro: Vec<ScheduledTask>,
    pub nav: Option<Rc<ScrollController>>,
    pub fade_observers: Vec<(String, ObserverId)>,
    pub responsive_installed: bool,
    pub embed_grid: Option<NodeId>,
}

/// Settings from the page's `#showcase-settings` JSON block, or defaults.
pub fn load_settings(surface: &dyn Surface) -> ShowcaseSettings {
    let Some(node) = surface.element_by_id(SETTINGS_SCRIPT_ID) else {
        return ShowcaseSettings::default();
    };
    match ShowcaseSettings::from_json(&surface.text(node)) {
        Ok(settings) => settings,
        Err(err) => {
            showcase_warn!("settings block ignored: {}", err);
            ShowcaseSettings::default()
        }
    }
}

/// Activate every component whose elements exist on the page.
pub fn bootstrap(surface: &SurfaceRef, settings: &ShowcaseSettings) -> Page {
    let initial_scroll = resolve_initial_scroll(surface, settings);

    let direct = is_direct_load(surface.referrer().as_deref(), &surface.location_href());
    let intro = if intro_present(surface.as_ref()) && direct {
        run_intro(surface, &settings.intro)
    } else {
        Vec::new()
    };

    let nav = surface.element_by_id(&settings.scroll.nav_id).map(|nav| {
        ScrollController::attach(surface, nav, settings.scroll.section_ids.clone(), settings)
    });

    let fade_observers = settings
        .fade
        .collections
        .iter()
        .filter_map(|collection| {
            observe_collection(surface, collection, &settings.fade)
                .map(|observer| (collection.name.clone(), observer))
        })
        .collect::<Vec<_>>();

    let responsive_installed = init_responsive(surface, settings);
    let embed_grid = mount_page_projects(surface, settings);

    showcase_info!(
        "page ready: intro={} nav={} fade_groups={} embeds={}",
        !intro.is_empty(),
        nav.is_some(),
        fade_observers.len(),
        embed_grid.is_some()
    );

    Page {
        initial_scroll,
        intro,
        nav,
        fade_observers,
        responsive_installed,
        embed_grid,
    }
}

/// Jump to the top, or to the nav anchor once layout settles when the
/// location asks for it. Pages without a nav anchor are left alone.
pub fn resolve_initial_scroll(
    surface: &SurfaceRef,
    settings: &ShowcaseSettings,
) -> Option<InitialScroll> {
    let anchor_present = surface.element_by_id(NAV_ANCHOR_ID).is_some();
    let plan = initial_scroll(
        &surface.location_hash(),
        anchor_present,
        settings.intro.anchor_settle(),
    )?;

    match plan {
        InitialScroll::Anchor { settle } => {
            let weak = Rc::downgrade(surface);
            let nav_id = settings.scroll.nav_id.clone();
            ScheduledTask::schedule(surface, settle, move || {
                let Some(surface) = weak.upgrade() else {
                    return;
                };
                if surface.element_by_id(&nav_id).is_none() {
                    return;
                }
                if let Some(anchor) = surface.element_by_id(NAV_ANCHOR_ID) {
                    surface.scroll_to(surface.offset_top(anchor), ScrollBehavior::Smooth);
                }
            });
        }
        InitialScroll::Top => surface.scroll_to(0.0, ScrollBehavior::Instant),
    }
    Some(plan)
}

/// Build the projects listed in the page's `#showcase-projects` JSON block
/// into the element named by its `data-target` attribute.
pub fn mount_page_projects(surface: &SurfaceRef, settings: &ShowcaseSettings) -> Option<NodeId> {
    let script = surface.element_by_id(PROJECTS_SCRIPT_ID)?;
    let projects = match parse_project_list(&surface.text(script)) {
        Ok(projects) => projects,
        Err(err) => {
            showcase_warn!("project list ignored: {}", err);
            return None;
        }
    };
    let target = surface
        .attribute(script, "data-target")
        .filter(|target| !target.is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECTS_TARGET.to_string());
    showcase_debug!("mounting {} listed projects into {}", projects.len(), target);

    EmbedBuilder::new(surface.clone(), settings)
        .build_many(Some(projects.as_slice()), &ContainerTarget::Selector(target))
}
