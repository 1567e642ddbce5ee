use crate::view_model::{NavView, OverlayView};

/// Load state of one embedded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedState {
    #[default]
    Loading,
    Loaded,
    Errored,
}

impl EmbedState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EmbedState::Loading)
    }

    pub fn view(self) -> OverlayView {
        match self {
            EmbedState::Loading => OverlayView {
                loading_visible: true,
                error_visible: false,
            },
            EmbedState::Loaded => OverlayView {
                loading_visible: false,
                error_visible: false,
            },
            EmbedState::Errored => OverlayView {
                loading_visible: false,
                error_visible: true,
            },
        }
    }
}

/// Sticky boundary and highlight bookkeeping for the navigation bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavState {
    offset_top: f64,
    is_sticky: bool,
    active_section: Option<usize>,
}

impl NavState {
    pub fn new(offset_top: f64) -> Self {
        Self {
            offset_top,
            ..Self::default()
        }
    }

    pub fn offset_top(&self) -> f64 {
        self.offset_top
    }

    pub fn is_sticky(&self) -> bool {
        self.is_sticky
    }

    pub fn active_section(&self) -> Option<usize> {
        self.active_section
    }

    pub fn view(&self) -> NavView {
        NavView {
            sticky: self.is_sticky,
            spacer_visible: self.is_sticky,
            active_section: self.active_section,
        }
    }

    pub(crate) fn set_offset_top(&mut self, offset_top: f64) {
        self.offset_top = offset_top;
    }

    pub(crate) fn set_sticky(&mut self, sticky: bool) {
        self.is_sticky = sticky;
    }

    pub(crate) fn set_active_section(&mut self, index: usize) {
        self.active_section = Some(index);
    }
}
