use std::sync::Once;

use pretty_assertions::assert_eq;
use showcase_core::{
    update_nav, NavEffect, NavMsg, NavState, NavView, ScrollSample, ScrollSettings, SectionSpan,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(showcase_logging::initialize_for_tests);
}

const NAV_OFFSET: f64 = 800.0;
const NAV_HEIGHT: f64 = 60.0;

fn sections() -> Vec<Option<SectionSpan>> {
    vec![
        Some(SectionSpan {
            top: 1000.0,
            bottom: 1800.0,
        }),
        Some(SectionSpan {
            top: 1800.0,
            bottom: 2600.0,
        }),
        Some(SectionSpan {
            top: 2600.0,
            bottom: 3400.0,
        }),
    ]
}

fn scroll(state: NavState, scroll_y: f64) -> (NavState, Vec<NavEffect>) {
    let sample = ScrollSample {
        scroll_y,
        natural_offset: NAV_OFFSET,
        nav_height: NAV_HEIGHT,
        sections: sections(),
    };
    update_nav(state, NavMsg::Scrolled(sample), &ScrollSettings::default())
}

#[test]
fn crossing_down_sticks_once() {
    init_logging();
    let state = NavState::new(NAV_OFFSET);

    let (state, effects) = scroll(state, 100.0);
    assert!(effects.is_empty());
    assert!(!state.is_sticky());

    let (state, effects) = scroll(state, 800.0);
    assert_eq!(
        effects,
        vec![NavEffect::Stick {
            spacer_height: NAV_HEIGHT
        }]
    );

    let (state, effects) = scroll(state, 820.0);
    assert!(effects.is_empty());
    assert!(state.is_sticky());
}

#[test]
fn crossing_up_unsticks_once() {
    init_logging();
    let (state, _) = scroll(NavState::new(NAV_OFFSET), 810.0);

    let (state, effects) = scroll(state, 700.0);
    assert_eq!(effects, vec![NavEffect::Unstick]);

    let (state, effects) = scroll(state, 500.0);
    assert!(effects.is_empty());
    assert_eq!(state.view(), NavView::default());
}

#[test]
fn sticky_offset_is_not_reread_while_pinned() {
    init_logging();
    let settings = ScrollSettings::default();
    let (state, _) = scroll(NavState::new(NAV_OFFSET), 900.0);

    // A pinned nav reports a layout offset near zero; it must not move the boundary.
    let sample = ScrollSample {
        scroll_y: 850.0,
        natural_offset: 0.0,
        nav_height: NAV_HEIGHT,
        sections: Vec::new(),
    };
    let (state, effects) = update_nav(state, NavMsg::Scrolled(sample), &settings);
    assert!(effects.is_empty());
    assert_eq!(state.offset_top(), NAV_OFFSET);
}

#[test]
fn unpinned_offset_follows_layout_shifts() {
    init_logging();
    let settings = ScrollSettings::default();
    let sample = ScrollSample {
        scroll_y: 850.0,
        natural_offset: 1000.0,
        nav_height: NAV_HEIGHT,
        sections: Vec::new(),
    };
    let (state, effects) = update_nav(NavState::new(NAV_OFFSET), NavMsg::Scrolled(sample), &settings);

    assert_eq!(state.offset_top(), 1000.0);
    assert!(!state.is_sticky());
    assert!(effects.is_empty());
}

#[test]
fn resize_records_new_offset() {
    init_logging();
    let (state, effects) = update_nav(
        NavState::new(NAV_OFFSET),
        NavMsg::Resized {
            natural_offset: 640.0,
        },
        &ScrollSettings::default(),
    );
    assert_eq!(state.offset_top(), 640.0);
    assert!(effects.is_empty());
}

#[test]
fn active_section_uses_nav_height_and_lookahead() {
    init_logging();
    // Sticky window for the first section starts at 1000 - 60 - 100 = 840.
    let (state, effects) = scroll(NavState::new(NAV_OFFSET), 839.0);
    assert_eq!(
        effects,
        vec![NavEffect::Stick {
            spacer_height: NAV_HEIGHT
        }]
    );
    assert_eq!(state.active_section(), None);

    let (state, effects) = scroll(state, 840.0);
    assert_eq!(effects, vec![NavEffect::Highlight(0)]);

    let (state, effects) = scroll(state, 1640.0);
    assert_eq!(effects, vec![NavEffect::Highlight(1)]);

    let (state, effects) = scroll(state, 1700.0);
    assert!(effects.is_empty());
    assert_eq!(state.active_section(), Some(1));
}

#[test]
fn unpinned_nav_adds_bias_to_the_window() {
    init_logging();
    let settings = ScrollSettings::default();
    // Boundary far below so the nav stays unpinned.
    let sample = ScrollSample {
        scroll_y: 790.0,
        natural_offset: 5000.0,
        nav_height: NAV_HEIGHT,
        sections: sections(),
    };
    // Unpinned window starts at 1000 - 60 - 50 - 100 = 790.
    let (state, effects) = update_nav(NavState::new(5000.0), NavMsg::Scrolled(sample), &settings);
    assert_eq!(effects, vec![NavEffect::Highlight(0)]);
    assert_eq!(state.active_section(), Some(0));
}

#[test]
fn highlight_is_kept_when_nothing_matches() {
    init_logging();
    let (state, _) = scroll(NavState::new(NAV_OFFSET), 900.0);
    assert_eq!(state.active_section(), Some(0));

    let (state, effects) = scroll(state, 10_000.0);
    assert!(effects.is_empty());
    assert_eq!(state.active_section(), Some(0));
}

#[test]
fn missing_sections_are_skipped() {
    init_logging();
    let sample = ScrollSample {
        scroll_y: 1700.0,
        natural_offset: NAV_OFFSET,
        nav_height: NAV_HEIGHT,
        sections: vec![
            None,
            Some(SectionSpan {
                top: 1800.0,
                bottom: 2600.0,
            }),
        ],
    };
    let (state, _) = update_nav(
        NavState::new(NAV_OFFSET),
        NavMsg::Scrolled(sample),
        &ScrollSettings::default(),
    );
    assert_eq!(state.active_section(), Some(1));
}
