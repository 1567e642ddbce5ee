//! Showcase engine: runs the page components against a [`Surface`].
mod bootstrap;
pub mod classes;
mod embed;
mod fade;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
mod intro;
mod responsive;
mod schedule;
mod scroll;
mod surface;

pub use bootstrap::{bootstrap, load_settings, mount_page_projects, resolve_initial_scroll, Page};
pub use embed::{ContainerTarget, EmbedBuilder};
pub use fade::{collection_active, collection_targets, observe_collection, observe_fade_ins};
pub use intro::{intro_present, run_intro, Typewriter};
pub use responsive::{init_responsive, is_responsive_initialized, relayout_all};
pub use schedule::{CancellationToken, Debouncer, ScheduledTask};
pub use scroll::ScrollController;
pub use surface::{
    DomEvent, EventKind, IntersectionCallback, IntersectionEntry, Listener, NodeId, ObserverId,
    ObserverOptions, ScrollBehavior, Surface, SurfaceRef, Target, TimerId, TimerTask,
};
