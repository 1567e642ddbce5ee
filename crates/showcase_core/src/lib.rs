//! Showcase core: pure state machines, layout rules and timing helpers.
mod descriptor;
mod effect;
mod error;
mod layout;
mod msg;
mod settings;
mod state;
mod timing;
mod update;
mod view_model;

pub use descriptor::{generate_container_id, parse_project_list, ProjectDescriptor};
pub use effect::{EmbedEffect, NavEffect};
pub use error::{SettingsError, ValidationError};
pub use layout::{Breakpoint, ContentSize, LayoutSettings};
pub use msg::{EmbedMsg, NavMsg, ScrollSample, SectionSpan};
pub use settings::{
    EmbedSettings, FadeCollection, FadeSettings, IntroSettings, ScrollSettings, ShowcaseSettings,
};
pub use state::{EmbedState, NavState};
pub use timing::{
    in_page_anchor, initial_scroll, is_direct_load, smooth_scroll_target, stagger_delay,
    InitialScroll, IntroCue, IntroTarget, NAV_ANCHOR_FRAGMENT,
};
pub use update::{update_embed, update_nav};
pub use view_model::{NavView, OverlayView};
