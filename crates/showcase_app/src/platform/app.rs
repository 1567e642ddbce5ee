use std::rc::Rc;

use showcase_engine::{bootstrap, load_settings, SurfaceRef};
use showcase_logging::showcase_info;

use super::dom::WebSurface;
use super::logging;

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize();

    let surface: SurfaceRef = Rc::new(WebSurface::from_window()?);
    let settings = load_settings(surface.as_ref());
    let page = bootstrap(&surface, &settings);
    showcase_info!(
        "showcase_app started (sticky nav: {}, embeds: {})",
        page.nav.is_some(),
        page.embed_grid.is_some()
    );

    // Components only hold the surface weakly; it lives as long as the page.
    std::mem::forget(surface);
    Ok(())
}
