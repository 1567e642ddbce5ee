#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMsg {
    /// The frame fired `load`.
    FrameLoaded,
    /// The frame fired `error`.
    FrameFailed,
    /// The load timer expired.
    LoadTimedOut,
}

/// Document-relative vertical span of a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub top: f64,
    pub bottom: f64,
}

/// Everything the nav tracker needs from one scroll tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    /// The nav's current layout offset; only trusted while not sticky.
    pub natural_offset: f64,
    pub nav_height: f64,
    /// One entry per configured section id; `None` when the section is absent.
    pub sections: Vec<Option<SectionSpan>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavMsg {
    Resized { natural_offset: f64 },
    Scrolled(ScrollSample),
}
