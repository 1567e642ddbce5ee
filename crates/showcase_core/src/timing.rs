use std::time::Duration;

use url::Url;

/// Fragment that asks the page to open scrolled to the navigation bar.
pub const NAV_ANCHOR_FRAGMENT: &str = "#nav-anchor";

/// Element revealed by the intro sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroTarget {
    RightDot,
    LeftDot,
    StudioText,
    Tagline,
}

impl IntroTarget {
    pub fn element_id(self) -> &'static str {
        match self {
            IntroTarget::RightDot => "right-dot",
            IntroTarget::LeftDot => "left-dot",
            IntroTarget::StudioText => "design-studio-text",
            IntroTarget::Tagline => "tagline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroCue {
    pub target: IntroTarget,
    pub at: Duration,
}

impl IntroCue {
    pub fn new(target: IntroTarget, at_ms: u64) -> Self {
        Self {
            target,
            at: Duration::from_millis(at_ms),
        }
    }
}

/// Where the page should be scrolled once it has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialScroll {
    /// Smooth-scroll to the nav anchor after the layout settles.
    Anchor { settle: Duration },
    /// Jump to the top immediately.
    Top,
}

/// `None` when the page has no nav anchor; such pages keep the browser's
/// own restore behavior.
pub fn initial_scroll(fragment: &str, anchor_present: bool, settle: Duration) -> Option<InitialScroll> {
    if !anchor_present {
        return None;
    }
    if fragment == NAV_ANCHOR_FRAGMENT {
        Some(InitialScroll::Anchor { settle })
    } else {
        Some(InitialScroll::Top)
    }
}

/// Delay before revealing the `index`-th element of a batch.
pub fn stagger_delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// A load counts as direct unless the referrer shares the page's origin.
/// Unparsable input on either side counts as direct.
pub fn is_direct_load(referrer: Option<&str>, location: &str) -> bool {
    let Some(referrer) = referrer.filter(|r| !r.is_empty()) else {
        return true;
    };
    match (Url::parse(referrer), Url::parse(location)) {
        (Ok(referrer), Ok(current)) => referrer.origin() != current.origin(),
        _ => true,
    }
}

/// Target scroll position for an in-page nav link.
///
/// Both branches yield the same value; the sticky distinction is kept so the
/// visual tuning stays adjustable per state.
#[allow(clippy::if_same_then_else)]
pub fn smooth_scroll_target(section_offset_top: f64, nav_height: f64, is_sticky: bool) -> f64 {
    let offset = if is_sticky { nav_height } else { nav_height };
    section_offset_top - offset
}

/// The element id a link points at, when its href is an in-page anchor.
pub fn in_page_anchor(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}
