use crate::{
    EmbedEffect, EmbedMsg, EmbedState, NavEffect, NavMsg, NavState, ScrollSample, ScrollSettings,
};

/// Pure update for one embed: applies a frame event and returns the overlay
/// mutations to perform.
///
/// `load` and `error` are applied whenever they arrive, so the last one to
/// fire decides what is shown. A timeout only counts while still loading.
pub fn update_embed(state: EmbedState, msg: EmbedMsg) -> (EmbedState, Vec<EmbedEffect>) {
    match msg {
        EmbedMsg::FrameLoaded => (
            EmbedState::Loaded,
            vec![
                EmbedEffect::CancelLoadTimer,
                EmbedEffect::HideLoading,
                EmbedEffect::HideError,
            ],
        ),
        EmbedMsg::FrameFailed => (
            EmbedState::Errored,
            vec![
                EmbedEffect::CancelLoadTimer,
                EmbedEffect::HideLoading,
                EmbedEffect::ShowError,
            ],
        ),
        EmbedMsg::LoadTimedOut => match state {
            EmbedState::Loading => (
                EmbedState::Errored,
                vec![EmbedEffect::HideLoading, EmbedEffect::ShowError],
            ),
            EmbedState::Loaded | EmbedState::Errored => (state, Vec::new()),
        },
    }
}

/// Pure update for the navigation bar.
pub fn update_nav(
    mut state: NavState,
    msg: NavMsg,
    settings: &ScrollSettings,
) -> (NavState, Vec<NavEffect>) {
    let effects = match msg {
        NavMsg::Resized { natural_offset } => {
            state.set_offset_top(natural_offset);
            Vec::new()
        }
        NavMsg::Scrolled(sample) => {
            let mut effects = Vec::new();
            // Layout can shift under async content; re-read while unpinned.
            if !state.is_sticky() {
                state.set_offset_top(sample.natural_offset);
            }

            let past_boundary = sample.scroll_y >= state.offset_top();
            if past_boundary && !state.is_sticky() {
                state.set_sticky(true);
                effects.push(NavEffect::Stick {
                    spacer_height: sample.nav_height,
                });
            } else if !past_boundary && state.is_sticky() {
                state.set_sticky(false);
                effects.push(NavEffect::Unstick);
            }

            if let Some(index) = active_section(&sample, state.is_sticky(), settings) {
                if state.active_section() != Some(index) {
                    state.set_active_section(index);
                    effects.push(NavEffect::Highlight(index));
                }
            }
            effects
        }
    };

    (state, effects)
}

fn active_section(sample: &ScrollSample, sticky: bool, settings: &ScrollSettings) -> Option<usize> {
    let offset = if sticky {
        sample.nav_height
    } else {
        sample.nav_height + settings.unstuck_bias_px
    };
    let lead = offset + settings.lookahead_px;

    sample
        .sections
        .iter()
        .enumerate()
        .find_map(|(index, span)| {
            let span = span.as_ref()?;
            let inside = sample.scroll_y >= span.top - lead && sample.scroll_y < span.bottom - lead;
            inside.then_some(index)
        })
}
