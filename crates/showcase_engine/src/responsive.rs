use std::cell::Cell;
use std::rc::Rc;

use showcase_core::{LayoutSettings, ShowcaseSettings};
use showcase_logging::{showcase_debug, showcase_trace};

use crate::classes::CONTENT_REGION;
use crate::embed::apply_content_size;
use crate::schedule::Debouncer;
use crate::surface::{DomEvent, EventKind, Surface, SurfaceRef, Target};

thread_local! {
    /// Whether the window resize listener is installed. The page runs one
    /// event loop per thread, so this is the page-wide flag.
    static RESPONSIVE_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Install the debounced window-resize listener that re-sizes every live
/// content region. Only the first call installs anything; later calls
/// return `false`.
pub fn init_responsive(surface: &SurfaceRef, settings: &ShowcaseSettings) -> bool {
    if RESPONSIVE_INSTALLED.with(|installed| installed.replace(true)) {
        showcase_debug!("ProjectEmbed: responsive layout already initialized");
        return false;
    }

    let debouncer = Debouncer::new(surface, settings.embed.resize_debounce());
    let weak = Rc::downgrade(surface);
    let layout = settings.layout.clone();
    surface.listen(
        Target::Window,
        EventKind::Resize,
        Rc::new(move |_: &DomEvent| {
            let weak = weak.clone();
            let layout = layout.clone();
            debouncer.call(move || {
                if let Some(surface) = weak.upgrade() {
                    relayout_all(surface.as_ref(), &layout);
                }
            });
        }),
    );
    true
}

pub fn is_responsive_initialized() -> bool {
    RESPONSIVE_INSTALLED.with(Cell::get)
}

/// Re-derive the breakpoint from the current viewport and apply it to every
/// content region in the document. Returns how many regions were updated.
pub fn relayout_all(surface: &dyn Surface, layout: &LayoutSettings) -> usize {
    let size = layout.content_size(surface.viewport_width());
    let regions = surface.query_all(&format!(".{CONTENT_REGION}"));
    for region in &regions {
        apply_content_size(surface, *region, size);
    }
    showcase_trace!(
        "ProjectEmbed: relayout {} regions as {:?} ({}px)",
        regions.len(),
        size.breakpoint,
        size.height_px
    );
    regions.len()
}
