/// Overlay visibility of one embed, as the stylesheet should show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayView {
    pub loading_visible: bool,
    pub error_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavView {
    pub sticky: bool,
    pub spacer_visible: bool,
    pub active_section: Option<usize>,
}
